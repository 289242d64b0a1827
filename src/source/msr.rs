use std::io;

use msru::{Accessor, Msr};

use crate::clock::MonotonicInstant;
use crate::constants::{
	AMD_ENERGY_PKG_MSR, AMD_ENERGY_UNIT_MSR, INTEL_PKG_ENERGY_MSR, INTEL_POWER_UNIT_MSR, MICROJOULE_SCALE,
	MSR_ENERGY_MASK,
};
use crate::cpu_type::{CpuType, detect_cpu_type};
use crate::energy::EnergySample;
use crate::error::{Error, Result};
use crate::source::EnergySource;

/// Energy counter read directly from the package energy MSR
///
/// Fallback for machines without a readable powercap tree. Raw register
/// values are scaled to microjoules with the energy status unit, so the
/// rest of the pipeline never sees backend-specific units. The register
/// is 32 bits wide; a wrap shows up as a backward step and costs one
/// sampling round.
#[derive(Debug)]
pub struct MsrSource {
	energy_msr: u32,
	energy_unit: u64,
	vendor: CpuType,
}

impl MsrSource {
	/// Selects the vendor-specific RAPL registers and reads the energy
	/// status unit once
	pub fn new() -> Result<Self> {
		let vendor = detect_cpu_type();
		let (unit_msr, energy_msr) = match vendor {
			CpuType::Intel => (INTEL_POWER_UNIT_MSR, INTEL_PKG_ENERGY_MSR),
			CpuType::Amd => (AMD_ENERGY_UNIT_MSR, AMD_ENERGY_PKG_MSR),
			CpuType::Unsupported => {
				return Err(Error::SourceUnavailable {
					reason: "unrecognized CPU vendor, no known RAPL registers".to_string(),
				});
			},
		};

		// Bits 12:8 hold the energy unit as a power of two
		let energy_unit = (read_msr(unit_msr, 0)? >> 8) & 0x1F;

		Ok(Self {
			energy_msr,
			energy_unit,
			vendor,
		})
	}
}

impl EnergySource for MsrSource {
	fn read_sample(&mut self) -> Result<EnergySample> {
		let raw = read_msr(self.energy_msr, 0)?;
		let taken_at = MonotonicInstant::now();

		Ok(EnergySample::new(raw_to_microjoules(raw, self.energy_unit), taken_at))
	}

	fn description(&self) -> String {
		format!("{:?} package energy MSR {:#x}", self.vendor, self.energy_msr)
	}
}

/// Reads a value from a Model-Specific Register (MSR) on the given CPU
fn read_msr(msr_address: u32, cpu_id: u16) -> io::Result<u64> {
	Msr::new(msr_address, cpu_id)
		.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
		.read()
		.map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

/// Converts a raw energy register value to microjoules
///
/// The register counts in units of 2^-unit Joules and is 32 bits wide
/// inside a 64-bit register, so the value is masked before scaling.
const fn raw_to_microjoules(raw: u64, energy_unit: u64) -> i64 {
	(((raw & MSR_ENERGY_MASK) * MICROJOULE_SCALE) >> energy_unit) as i64
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn one_joule_scales_exactly() {
		// With a 2^-16 J unit, 2^16 raw counts are exactly one Joule
		assert_eq!(raw_to_microjoules(1 << 16, 16), 1_000_000);
	}

	#[test]
	fn scaling_respects_the_energy_unit() {
		assert_eq!(raw_to_microjoules(1 << 10, 10), 1_000_000);
		assert_eq!(raw_to_microjoules(3 << 14, 14), 3_000_000);
	}

	#[test]
	fn high_register_bits_are_masked_off() {
		let raw = (0xDEAD_u64 << 32) | (1 << 16);
		assert_eq!(raw_to_microjoules(raw, 16), 1_000_000);
	}
}
