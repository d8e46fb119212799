use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::strategy::process::WorkerCommand;
use super::alphabet::Alphabet;

/// Default number of letters in a generated corpus.
pub const DEFAULT_LENGTH: u64 = 10_000_000;

/// Default chunk size, in bytes, for the parallel strategies.
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

/// Default corpus location.
pub const DEFAULT_CORPUS_PATH: &str = "original.txt";

/// Run configuration shared by the generator and all strategies.
///
/// # Responsibilities
/// - Describe the corpus to generate (`length`, `alphabet`, `seed`, `corpus_path`)
/// - Describe how the parallel strategies split the work (`chunk_size`, `workers`)
/// - Optionally name a directory for per-letter count files (`counts_dir`)
/// - Tell the process strategy how to launch its workers (`worker`)
///
/// # Invariants
/// - `chunk_size >= 1`
/// - `workers >= 1`
#[derive(Clone, Debug)]
pub struct Settings {
	/// Number of letters to generate.
	pub length: u64,

	/// Letters the corpus is drawn from.
	pub alphabet: Alphabet,

	/// Seed for reproducible corpora; `None` seeds from the operating system.
	pub seed: Option<u64>,

	/// Where the corpus file is written and read from.
	pub corpus_path: PathBuf,

	/// Directory receiving one `<LETTER>.txt` file per letter, if set.
	pub counts_dir: Option<PathBuf>,

	/// Command that starts a process worker; required by the process strategy.
	pub worker: Option<WorkerCommand>,

	/// Bytes per chunk for the parallel strategies.
	chunk_size: usize,

	/// Size of the thread and process pools.
	workers: usize,
}

impl Settings {
	pub fn chunk_size(&self) -> usize {
		self.chunk_size
	}

	pub fn workers(&self) -> usize {
		self.workers
	}

	/// Sets the chunk size.
	///
	/// # Errors
	/// Returns an error if `chunk_size` is zero.
	pub fn set_chunk_size(&mut self, chunk_size: usize) -> Result<()> {
		if chunk_size == 0 {
			return Err(Error::InvalidSettings("chunk size must be at least 1".to_owned()));
		}
		self.chunk_size = chunk_size;
		Ok(())
	}

	/// Sets the pool size of the parallel strategies.
	///
	/// # Errors
	/// Returns an error if `workers` is zero.
	pub fn set_workers(&mut self, workers: usize) -> Result<()> {
		if workers == 0 {
			return Err(Error::InvalidSettings("worker count must be at least 1".to_owned()));
		}
		self.workers = workers;
		Ok(())
	}
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			length: DEFAULT_LENGTH,
			alphabet: Alphabet::default(),
			seed: None,
			corpus_path: PathBuf::from(DEFAULT_CORPUS_PATH),
			counts_dir: None,
			worker: None,
			chunk_size: DEFAULT_CHUNK_SIZE,
			workers: num_cpus::get().max(1),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn defaults_are_valid() {
		let settings = Settings::default();
		assert_eq!(settings.chunk_size(), DEFAULT_CHUNK_SIZE);
		assert!(settings.workers() >= 1);
		assert_eq!(settings.corpus_path, PathBuf::from("original.txt"));
	}

	#[test]
	fn rejects_zero_chunk_size_and_workers() {
		let mut settings = Settings::default();
		assert!(matches!(settings.set_chunk_size(0), Err(Error::InvalidSettings(_))));
		assert!(matches!(settings.set_workers(0), Err(Error::InvalidSettings(_))));
		assert_eq!(settings.chunk_size(), DEFAULT_CHUNK_SIZE);

		settings.set_chunk_size(10).unwrap();
		settings.set_workers(3).unwrap();
		assert_eq!((settings.chunk_size(), settings.workers()), (10, 3));
	}
}
