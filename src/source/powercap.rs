use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::str;

use log::debug;

use crate::clock::MonotonicInstant;
use crate::constants::{DOMAIN_NAME_FILE, ENERGY_FILE, POWERCAP_ROOT, RAPL_DOMAIN_PREFIX, READ_BUFFER_SIZE};
use crate::energy::EnergySample;
use crate::error::{Error, Result};
use crate::source::EnergySource;

/// Energy counter exposed by the powercap subsystem as a text-encoded
/// microjoule value
///
/// The file handle is held open for the lifetime of the source; each
/// read seeks back to the start so every sample is a fresh point-in-time
/// value.
#[derive(Debug)]
pub struct PowercapSource {
	file: File,
	path: PathBuf,
}

impl PowercapSource {
	/// Opens the counter file at the given path
	pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
		let path = path.into();
		let file = File::open(&path).map_err(|e| Error::SourceUnavailable {
			reason: format!("cannot open {}: {e}", path.display()),
		})?;
		Ok(Self { file, path })
	}

	/// Discovers the package energy counter under the powercap root and
	/// opens it
	pub fn open_default() -> Result<Self> {
		Self::open(discover_in(Path::new(POWERCAP_ROOT))?)
	}
}

impl EnergySource for PowercapSource {
	fn read_sample(&mut self) -> Result<EnergySample> {
		self.file.seek(SeekFrom::Start(0))?;

		let mut buffer = [0u8; READ_BUFFER_SIZE];
		let len = self.file.read(&mut buffer)?;
		// Timestamp immediately after the data acquisition to keep
		// measurement skew to a minimum
		let taken_at = MonotonicInstant::now();

		if len == 0 {
			return Err(Error::Read(io::Error::new(
				io::ErrorKind::UnexpectedEof,
				"counter read returned no data",
			)));
		}

		let microjoules = parse_energy(&buffer[..len])?;
		Ok(EnergySample::new(microjoules, taken_at))
	}

	fn description(&self) -> String {
		format!("powercap counter at {}", self.path.display())
	}
}

/// Locates the energy counter of the CPU package among the top-level
/// RAPL domains below `root`
///
/// Subdomains (`intel-rapl:N:M`) account for slices of the package and
/// are skipped. The domain whose `name` file identifies a package wins;
/// otherwise the lowest-numbered domain is used.
pub fn discover_in(root: &Path) -> Result<PathBuf> {
	let entries = fs::read_dir(root).map_err(|e| Error::SourceUnavailable {
		reason: format!("cannot scan {}: {e}", root.display()),
	})?;

	let mut domains: Vec<(u32, PathBuf)> = Vec::new();
	for entry in entries.filter_map(std::result::Result::ok) {
		let path = entry.path();
		let filename = path.file_name().unwrap_or_default().to_string_lossy();

		// Look for intel-rapl:N directories; the numeric parse rejects
		// subdomains like intel-rapl:0:0
		if let Some(suffix) = filename.strip_prefix(RAPL_DOMAIN_PREFIX) {
			if let Ok(index) = suffix.parse::<u32>() {
				domains.push((index, path));
			}
		}
	}
	domains.sort_by_key(|&(index, _)| index);

	if domains.is_empty() {
		return Err(Error::SourceUnavailable {
			reason: format!("no {RAPL_DOMAIN_PREFIX}* domains under {}", root.display()),
		});
	}

	for (_, path) in &domains {
		if let Ok(name) = fs::read_to_string(path.join(DOMAIN_NAME_FILE)) {
			if name.trim().starts_with("package") {
				return Ok(path.join(ENERGY_FILE));
			}
		}
	}

	let (index, path) = &domains[0];
	debug!("no package domain below {}, using domain {index}", root.display());
	Ok(path.join(ENERGY_FILE))
}

/// Parses a text-encoded counter value, tolerating a single trailing
/// newline. The counter is non-negative by contract; anything else is
/// reported as unparseable.
fn parse_energy(raw: &[u8]) -> Result<i64> {
	let content = || String::from_utf8_lossy(raw).into_owned();

	let text = str::from_utf8(raw).map_err(|_| Error::Parse { content: content() })?;
	let trimmed = text.strip_suffix('\n').unwrap_or(text);

	let value: i64 = trimmed.parse().map_err(|_| Error::Parse { content: content() })?;
	if value < 0 {
		return Err(Error::Parse { content: content() });
	}
	Ok(value)
}
