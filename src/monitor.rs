use std::io;
use std::thread;
use std::time::Duration;

use log::debug;

use crate::constants::{COOL_DOWN, SINGLE_SHOT_ROUNDS};
use crate::display::print_watts;
use crate::power::PowerTracker;
use crate::source::EnergySource;

/// Drives timed sampling rounds against an energy counter
///
/// Owns the counter source, the tracker holding the sliding sample pair,
/// and the interval that doubles as the integration window of the rate
/// computation.
pub struct PowerMonitor {
	source: Box<dyn EnergySource>,
	tracker: PowerTracker,
	interval: Duration,
}

impl PowerMonitor {
	/// Creates a monitor sampling the given source at the given interval
	pub fn new(source: Box<dyn EnergySource>, interval: Duration) -> Self {
		Self {
			source,
			tracker: PowerTracker::new(),
			interval,
		}
	}

	/// Lets the counter settle before the first sample is taken.
	/// Sampling immediately after process start risks catching a stale
	/// or in-flight counter value.
	fn settle(&self) {
		thread::sleep(COOL_DOWN);
	}

	/// Runs one sampling round. A failed or unparseable read is
	/// absorbed here: the tracker keeps its state and the next
	/// scheduled round recovers.
	fn sample_round(&mut self) -> Option<f64> {
		match self.source.read_sample() {
			Ok(sample) => self.tracker.submit(sample),
			Err(e) => {
				debug!("sampling round skipped: {e}");
				None
			},
		}
	}

	/// Takes a single measurement over the configured interval.
	///
	/// Reads a baseline, waits, reads again. When a round yields no
	/// reading (counter reset, clock anomaly, failed read) at most one
	/// extra round is taken before giving up and reporting the
	/// carried-forward value, which may still be zero.
	pub fn measure_once(&mut self) -> f64 {
		self.settle();

		let mut rounds = 0;
		loop {
			if let Some(watts) = self.sample_round() {
				return watts;
			}
			rounds += 1;
			if rounds > SINGLE_SHOT_ROUNDS {
				return self.tracker.last_watts();
			}
			thread::sleep(self.interval);
		}
	}

	/// Samples indefinitely, printing one value per line for every
	/// interval that yields a fresh reading.
	///
	/// The loop never terminates on a reading; it returns only when
	/// writing to stdout fails.
	pub fn run_continuous(&mut self) -> io::Result<()> {
		self.settle();

		loop {
			if let Some(watts) = self.sample_round() {
				print_watts(watts)?;
			}
			thread::sleep(self.interval);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::VecDeque;

	use crate::clock::MonotonicInstant;
	use crate::energy::EnergySample;
	use crate::error::{Error, Result};

	const EPSILON: f64 = 1e-9;

	/// Replays a fixed list of read outcomes
	#[derive(Debug)]
	struct ScriptedSource {
		outcomes: VecDeque<Result<EnergySample>>,
	}

	impl ScriptedSource {
		fn new(outcomes: Vec<Result<EnergySample>>) -> Box<Self> {
			Box::new(Self {
				outcomes: outcomes.into(),
			})
		}
	}

	impl EnergySource for ScriptedSource {
		fn read_sample(&mut self) -> Result<EnergySample> {
			self.outcomes.pop_front().unwrap_or_else(|| {
				Err(Error::SourceUnavailable {
					reason: "script exhausted".to_string(),
				})
			})
		}

		fn description(&self) -> String {
			"scripted counter".to_string()
		}
	}

	fn ok(microjoules: i64, nanos: i64) -> Result<EnergySample> {
		let taken_at = MonotonicInstant::from_parts(nanos / 1_000_000_000, nanos % 1_000_000_000);
		Ok(EnergySample::new(microjoules, taken_at))
	}

	fn read_error() -> Result<EnergySample> {
		Err(Error::Read(io::Error::new(io::ErrorKind::UnexpectedEof, "no data")))
	}

	fn monitor(outcomes: Vec<Result<EnergySample>>) -> PowerMonitor {
		PowerMonitor::new(ScriptedSource::new(outcomes), Duration::ZERO)
	}

	#[test]
	fn single_shot_derives_the_rate_from_two_samples() {
		let mut monitor = monitor(vec![ok(1_000_000, 0), ok(1_050_000, 100_000_000)]);
		assert!((monitor.measure_once() - 0.50).abs() < EPSILON);
	}

	#[test]
	fn single_shot_spends_an_extra_round_on_a_counter_reset() {
		let mut monitor = monitor(vec![
			ok(900_000, 0),
			ok(100_000, 100_000_000),
			ok(150_000, 200_000_000),
		]);
		assert!((monitor.measure_once() - 0.50).abs() < EPSILON);
	}

	#[test]
	fn single_shot_gives_up_after_the_extra_round() {
		// Every round steps backward, so no rate can be derived and the
		// carry-forward value is still zero
		let mut monitor = monitor(vec![
			ok(900_000, 0),
			ok(800_000, 100_000_000),
			ok(700_000, 200_000_000),
		]);
		assert_eq!(monitor.measure_once(), 0.0);
	}

	#[test]
	fn single_shot_absorbs_a_transient_read_failure() {
		let mut monitor = monitor(vec![read_error(), ok(1_000_000, 0), ok(1_050_000, 100_000_000)]);
		assert!((monitor.measure_once() - 0.50).abs() < EPSILON);
	}
}
