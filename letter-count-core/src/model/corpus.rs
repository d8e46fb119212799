use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;
use crate::io;
use super::generator::Generator;
use super::settings::Settings;

/// The letter corpus under test: its file and its bytes, loaded once.
///
/// The corpus is immutable after loading; every strategy reads the same
/// bytes (or, for process workers, the same file).
#[derive(Debug, Clone)]
pub struct Corpus {
	path: PathBuf,
	bytes: Vec<u8>,
}

impl Corpus {
	/// Loads an existing corpus file.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		let bytes = io::read_file(&path)?;
		debug!("Loaded corpus {} ({} bytes)", path.display(), bytes.len());
		Ok(Self { path, bytes })
	}

	/// Generates a corpus according to `settings`, writes it to
	/// `settings.corpus_path` and loads it back.
	pub fn generate(settings: &Settings) -> Result<Self> {
		let mut generator = match settings.seed {
			Some(seed) => Generator::with_seed(settings.alphabet.clone(), seed),
			None => Generator::new(settings.alphabet.clone()),
		};
		generator.write_file(settings.length, &settings.corpus_path)?;
		Self::load(&settings.corpus_path)
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	pub fn len(&self) -> u64 {
		self.bytes.len() as u64
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn generate_writes_and_loads() {
		let dir = tempfile::tempdir().unwrap();
		let mut settings = Settings::default();
		settings.length = 500;
		settings.seed = Some(1);
		settings.corpus_path = dir.path().join("corpus.txt");
		let corpus = Corpus::generate(&settings).unwrap();
		assert_eq!(corpus.len(), 500);
		assert_eq!(corpus.path(), settings.corpus_path.as_path());
		assert_eq!(corpus.bytes(), std::fs::read(&settings.corpus_path).unwrap());
	}

	#[test]
	fn load_missing_file_fails() {
		let dir = tempfile::tempdir().unwrap();
		assert!(matches!(Corpus::load(dir.path().join("nope.txt")), Err(crate::Error::Io(_))));
	}
}
