use crate::clock::MonotonicInstant;

/// A single reading of the energy counter
///
/// Captures the raw counter value together with the monotonic instant it
/// was taken at. The instant is recorded immediately after the data
/// acquisition to keep measurement skew to a minimum.
#[derive(Debug, Clone, Copy)]
pub struct EnergySample {
	/// Raw counter value in microjoules
	pub microjoules: i64,

	/// Monotonic time of the reading
	pub taken_at: MonotonicInstant,
}

impl EnergySample {
	pub const fn new(microjoules: i64, taken_at: MonotonicInstant) -> Self {
		Self { microjoules, taken_at }
	}
}
