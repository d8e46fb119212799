//! Letter frequency counting library.
//!
//! This crate generates a corpus of random letters and counts per-letter
//! occurrences with three interchangeable strategies:
//! - Sequential single pass
//! - Thread-parallel over the shared in-memory corpus
//! - Process-parallel with isolated worker processes
//!
//! The reporter runs all of them on the same corpus, times them and checks
//! that their frequency tables agree.

/// Corpus, alphabet, generator, frequency table and settings.
pub mod model;

/// Counting strategies and the worker-process protocol.
pub mod strategy;

/// Strategy timing, consistency checking and the textual report.
pub mod report;

mod error;

/// File helpers (corpus reads, chunk reads, count files).
///
/// Not exposed
pub(crate) mod io;

pub use error::{Error, Result};
pub use model::alphabet::Alphabet;
pub use model::corpus::Corpus;
pub use model::frequency_table::FrequencyTable;
pub use model::generator::Generator;
pub use model::settings::Settings;
pub use report::{Report, StrategyResult};
pub use strategy::Strategy;
pub use strategy::process::WorkerCommand;
