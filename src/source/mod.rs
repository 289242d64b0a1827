pub mod msr;
pub mod powercap;

use std::fmt::Debug;

use log::debug;

use crate::energy::EnergySample;
use crate::error::{Error, Result};
use crate::source::msr::MsrSource;
use crate::source::powercap::PowercapSource;

/// Trait for the different backends a RAPL energy counter can be read
/// through
pub trait EnergySource: Debug {
	/// Performs a single read of the counter, returning the value and
	/// the monotonic instant it was taken at as one sample
	fn read_sample(&mut self) -> Result<EnergySample>;

	/// Human-readable description of the backing counter
	fn description(&self) -> String;
}

/// Factory function to open the best counter available on this machine
///
/// The powercap sysfs counter is preferred since it is already scaled to
/// microjoules by the kernel; direct MSR access is the fallback when
/// powercap is missing or unreadable.
pub fn open_default_source() -> Result<Box<dyn EnergySource>> {
	let powercap_err = match PowercapSource::open_default() {
		Ok(source) => return Ok(Box::new(source)),
		Err(e) => e,
	};
	debug!("powercap counter unavailable ({powercap_err}), trying MSR access");

	match MsrSource::new() {
		Ok(source) => Ok(Box::new(source)),
		Err(msr_err) => Err(Error::SourceUnavailable {
			reason: format!("powercap: {powercap_err}; msr: {msr_err}"),
		}),
	}
}
