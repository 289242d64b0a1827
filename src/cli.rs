use std::time::Duration;

use clap::Parser;

use crate::constants::{DEFAULT_DURATION, DURATION_MAX, DURATION_MIN};

const EXAMPLES: &str = "\
Examples:
  rapl-power                    Single measurement with the default 1.00 s duration
  rapl-power 1.5                Single measurement over 1.5 s
  rapl-power --continuous       Continuous measurement at the default interval
  rapl-power 1.5 --continuous   Continuous measurement every 1.5 s";

/// Measures average CPU package power draw from the RAPL energy counter
#[derive(Debug, Parser)]
#[command(version, about, after_help = EXAMPLES)]
pub struct Cli {
	/// Measurement duration in seconds (from 0.1 to 60)
	#[arg(value_parser = parse_duration)]
	pub duration: Option<f64>,

	/// Perform continuous measurements with the given interval
	#[arg(long)]
	pub continuous: bool,
}

impl Cli {
	/// The sampling interval: the requested duration, or the default
	pub fn interval(&self) -> Duration {
		Duration::from_secs_f64(self.duration.unwrap_or(DEFAULT_DURATION))
	}
}

/// Validates the duration argument: numeric form and supported range
fn parse_duration(arg: &str) -> Result<f64, String> {
	let duration: f64 = arg.parse().map_err(|_| format!("'{arg}' is not a number"))?;
	if !(DURATION_MIN..=DURATION_MAX).contains(&duration) {
		return Err(format!(
			"duration must be in range from {DURATION_MIN} to {DURATION_MAX}"
		));
	}
	Ok(duration)
}
