use std::time::Duration;

// Powercap sysfs layout
pub const POWERCAP_ROOT: &str = "/sys/class/powercap";
pub const RAPL_DOMAIN_PREFIX: &str = "intel-rapl:";
pub const ENERGY_FILE: &str = "energy_uj";
pub const DOMAIN_NAME_FILE: &str = "name";

// AMD RAPL MSR addresses
pub const AMD_ENERGY_UNIT_MSR: u32 = 0xC001_0299;
pub const AMD_ENERGY_PKG_MSR: u32 = 0xC001_029B;

// Intel RAPL MSR addresses
pub const INTEL_POWER_UNIT_MSR: u32 = 0x606;
pub const INTEL_PKG_ENERGY_MSR: u32 = 0x611;

// The RAPL energy status registers are architecturally 32 bits wide
pub const MSR_ENERGY_MASK: u64 = 0xFFFF_FFFF;
pub const MICROJOULE_SCALE: u64 = 1_000_000;

// Sampling settings
pub const READ_BUFFER_SIZE: usize = 80;
pub const DURATION_MIN: f64 = 0.1;
pub const DURATION_MAX: f64 = 60.0;
pub const DEFAULT_DURATION: f64 = 1.0;
pub const COOL_DOWN: Duration = Duration::from_millis(100);

// Measurement rounds a single-shot run may spend after the baseline
// before it settles for the carry-forward value
pub const SINGLE_SHOT_ROUNDS: u32 = 2;

pub const NANOS_PER_SEC: i64 = 1_000_000_000;
