//! The three interchangeable counting strategies.
//!
//! Every strategy has the same contract: it takes the loaded corpus and
//! the run settings and returns the corpus's `FrequencyTable`.

use std::fmt;

use crate::error::Result;
use crate::model::corpus::Corpus;
use crate::model::frequency_table::FrequencyTable;
use crate::model::settings::Settings;

/// Chunk planning and per-worker span assignment.
pub mod chunk;

/// Worker-process pool and its stdin/stdout protocol.
pub mod process;

/// Single pass on the calling thread.
pub mod sequential;

/// Scoped thread pool over the in-memory corpus.
pub mod threaded;

/// A counting strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
	Sequential,
	Threaded,
	Process,
}

impl Strategy {
	/// All strategies, baseline first.
	pub const ALL: [Strategy; 3] = [Strategy::Sequential, Strategy::Threaded, Strategy::Process];

	pub fn name(&self) -> &'static str {
		match self {
			Strategy::Sequential => "sequential",
			Strategy::Threaded => "threaded",
			Strategy::Process => "process",
		}
	}

	/// Counts `corpus` with this strategy.
	pub fn count(&self, corpus: &Corpus, settings: &Settings) -> Result<FrequencyTable> {
		match self {
			Strategy::Sequential => sequential::count(corpus, settings),
			Strategy::Threaded => threaded::count(corpus, settings),
			Strategy::Process => process::count(corpus, settings),
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
