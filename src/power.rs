use crate::energy::EnergySample;

/// Derives power values from a stream of energy samples
///
/// Keeps exactly one prior sample as the comparison baseline (a sliding
/// pair, not an accumulating history) plus the last power value that was
/// successfully computed, for callers that want a carry-forward display
/// value when a round yields no fresh reading.
#[derive(Debug, Default)]
pub struct PowerTracker {
	last_sample: Option<EnergySample>,
	last_watts: f64,
}

impl PowerTracker {
	/// Creates a tracker with no baseline and a zero carry-forward value
	pub fn new() -> Self {
		Self::default()
	}

	/// Accepts a new sample and derives a power value when one is available.
	///
	/// Returns `None` when no baseline exists yet, when the baseline
	/// counter is not strictly positive (an uninitialized or reset
	/// domain), when the counter went backward (a domain reset or
	/// register wrap, absorbed rather than propagated), or when no time
	/// elapsed between the samples. The new sample always replaces the
	/// baseline, so a reset costs exactly one round.
	pub fn submit(&mut self, sample: EnergySample) -> Option<f64> {
		let reading = match self.last_sample {
			Some(last) if last.microjoules > 0 && sample.microjoules >= last.microjoules => {
				let elapsed_nanos = sample.taken_at.nanos_since(&last.taken_at);
				if elapsed_nanos > 0 {
					// uJ/ns would be MW; the factor of 1000 lands on Watts
					let watts = (sample.microjoules - last.microjoules) as f64 * 1000.0 / elapsed_nanos as f64;
					self.last_watts = watts;
					Some(watts)
				} else {
					None
				}
			},
			_ => None,
		};
		self.last_sample = Some(sample);
		reading
	}

	/// Last successfully computed power value, 0.0 until the first one
	pub fn last_watts(&self) -> f64 {
		self.last_watts
	}
}
