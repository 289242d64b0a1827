use std::io;

use thiserror::Error;

/// Errors produced while locating or sampling an energy counter
#[derive(Debug, Error)]
pub enum Error {
	/// No usable counter exists on this machine. Fatal: absence means
	/// missing hardware support rather than a transient condition.
	#[error("no usable energy counter: {reason}")]
	SourceUnavailable { reason: String },

	/// A single read of the counter failed. Transient: the next
	/// scheduled sampling round is expected to recover.
	#[error("failed to read energy counter: {0}")]
	Read(#[from] io::Error),

	/// The counter produced data that does not parse as a non-negative
	/// integer. Transient, same recovery as `Read`.
	#[error("energy counter contained invalid data: {content:?}")]
	Parse { content: String },
}

pub type Result<T> = std::result::Result<T, Error>;
