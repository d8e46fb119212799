use std::io::Write;
use std::path::Path;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::io;
use super::alphabet::Alphabet;

/// Number of letters produced per write when streaming a corpus to disk.
const BLOCK_SIZE: usize = 64 * 1024;

/// Random corpus generator.
///
/// Every letter is drawn independently and uniformly from the alphabet.
/// A seeded generator always yields the same corpus for the same alphabet
/// and length.
#[derive(Debug)]
pub struct Generator {
	alphabet: Alphabet,
	rng: StdRng,
}

impl Generator {
	/// Creates a generator seeded from the operating system.
	pub fn new(alphabet: Alphabet) -> Self {
		Self { alphabet, rng: StdRng::from_os_rng() }
	}

	/// Creates a reproducible generator.
	pub fn with_seed(alphabet: Alphabet, seed: u64) -> Self {
		Self { alphabet, rng: StdRng::seed_from_u64(seed) }
	}

	/// Generates `count` random letters in memory.
	pub fn generate(&mut self, count: usize) -> Vec<u8> {
		let mut letters = Vec::with_capacity(count);
		self.fill(&mut letters, count);
		letters
	}

	/// Appends `count` random letters to `buffer`.
	fn fill(&mut self, buffer: &mut Vec<u8>, count: usize) {
		let symbols = self.alphabet.letters();
		buffer.extend((0..count).map(|_| symbols[self.rng.random_range(0..symbols.len())]));
	}

	/// Streams `count` random letters into `writer`, block by block.
	///
	/// Nothing else is written: no header, no delimiter, no trailing newline.
	pub fn write_to<W: Write>(&mut self, count: u64, writer: &mut W) -> Result<()> {
		let mut remaining = count;
		let mut block = Vec::with_capacity(BLOCK_SIZE);
		while remaining > 0 {
			let size = remaining.min(BLOCK_SIZE as u64) as usize;
			block.clear();
			self.fill(&mut block, size);
			writer.write_all(&block)?;
			remaining -= size as u64;
		}
		writer.flush()?;
		Ok(())
	}

	/// Writes a corpus of `count` letters to `path`, replacing any existing file.
	///
	/// # Errors
	/// Returns an I/O error if the path cannot be created or written.
	pub fn write_file<P: AsRef<Path>>(&mut self, count: u64, path: P) -> Result<()> {
		let path = path.as_ref();
		debug!("Writing {count} letters from [{}] to {}", self.alphabet, path.display());
		let mut writer = io::create_file(path)?;
		self.write_to(count, &mut writer)?;
		info!("Generated corpus of {count} letters at {}", path.display());
		Ok(())
	}
}
