//! Samples a monotonically increasing hardware energy counter and
//! derives average power draw in Watts from the rate of change of the
//! counter over elapsed monotonic time.
//!
//! The counter is the RAPL package energy accounting the kernel exposes
//! through powercap (microjoules, text-encoded), with direct MSR access
//! as a fallback. Sampling is single-threaded and synchronous: the sleep
//! between two samples is the integration window of the rate
//! computation.

pub mod cli;
pub mod clock;
pub mod constants;
pub mod cpu_type;
pub mod display;
pub mod energy;
pub mod error;
pub mod monitor;
pub mod power;
pub mod source;

pub use crate::clock::MonotonicInstant;
pub use crate::energy::EnergySample;
pub use crate::error::{Error, Result};
pub use crate::monitor::PowerMonitor;
pub use crate::power::PowerTracker;
pub use crate::source::{EnergySource, open_default_source};
