//! Error types for the letter counter.

use std::io;

use thiserror::Error;

use crate::model::frequency_table::FrequencyTable;

/// Result type alias for counter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or counting a corpus.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// Reading or writing the corpus (or the count files) failed.
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	/// A worker message could not be encoded or decoded.
	#[error("Worker message encoding error: {0}")]
	Encoding(#[from] postcard::Error),

	/// The alphabet string could not be parsed.
	#[error("Invalid alphabet: {0}")]
	InvalidAlphabet(String),

	/// A setting is out of range.
	#[error("Invalid settings: {0}")]
	InvalidSettings(String),

	/// A thread or process worker failed to deliver its table.
	#[error("Worker for bytes {offset}..{end} failed: {reason}")]
	Worker { offset: u64, end: u64, reason: String },

	/// Two strategies disagree on the counts of the same corpus.
	#[error("Strategy '{strategy}' disagrees with the baseline: expected {expected}, got {actual}")]
	Mismatch {
		strategy: &'static str,
		expected: Box<FrequencyTable>,
		actual: Box<FrequencyTable>,
	},
}

impl Error {
	pub(crate) fn worker(offset: u64, len: u64, reason: impl Into<String>) -> Self {
		Error::Worker { offset, end: offset + len, reason: reason.into() }
	}
}
