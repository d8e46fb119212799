use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::info;

use crate::error::{Error, Result};
use crate::io;
use crate::model::corpus::Corpus;
use crate::model::frequency_table::FrequencyTable;
use crate::model::settings::Settings;
use crate::strategy::Strategy;

/// Outcome of one strategy on one corpus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrategyResult {
	pub strategy: Strategy,
	pub table: FrequencyTable,
	pub elapsed: Duration,
}

/// Results of every strategy that ran on a corpus, in run order.
#[derive(Clone, Debug)]
pub struct Report {
	pub corpus_path: PathBuf,
	pub corpus_len: u64,
	pub results: Vec<StrategyResult>,
	/// Count files written for the baseline table, if any.
	pub count_files: Vec<PathBuf>,
}

impl Report {
	/// The first strategy's table, which every other result was checked against.
	pub fn baseline(&self) -> Option<&FrequencyTable> {
		self.results.first().map(|result| &result.table)
	}
}

impl fmt::Display for Report {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Corpus: {} ({} bytes)", self.corpus_path.display(), self.corpus_len)?;
		for result in &self.results {
			writeln!(
				f,
				"Time taken by {}: {:.4} seconds",
				result.strategy,
				result.elapsed.as_secs_f64()
			)?;
			writeln!(f, "  {}", result.table)?;
		}
		if !self.results.is_empty() {
			writeln!(f, "All {} strategies agree", self.results.len())?;
		}
		Ok(())
	}
}

/// Times one strategy on `corpus`.
pub fn run_strategy(strategy: Strategy, corpus: &Corpus, settings: &Settings) -> Result<StrategyResult> {
	let start = Instant::now();
	let table = strategy.count(corpus, settings)?;
	let elapsed = start.elapsed();
	info!("Time taken by {strategy}: {:.4} seconds", elapsed.as_secs_f64());
	Ok(StrategyResult { strategy, table, elapsed })
}

/// Runs `strategies` on the same corpus and checks that they agree.
///
/// The first strategy is the baseline. If `settings.counts_dir` is set,
/// the baseline table is also written as one file per letter.
///
/// # Errors
/// - Any error from a strategy, unchanged.
/// - `Error::Mismatch` naming the first strategy that disagrees with the baseline.
pub fn run(corpus: &Corpus, settings: &Settings, strategies: &[Strategy]) -> Result<Report> {
	let mut results: Vec<StrategyResult> = Vec::with_capacity(strategies.len());
	for &strategy in strategies {
		let result = run_strategy(strategy, corpus, settings)?;
		if let Some(baseline) = results.first() {
			if baseline.table != result.table {
				return Err(Error::Mismatch {
					strategy: strategy.name(),
					expected: Box::new(baseline.table),
					actual: Box::new(result.table),
				});
			}
		}
		results.push(result);
	}

	let count_files = match (&settings.counts_dir, results.first()) {
		(Some(dir), Some(baseline)) => write_counts(dir, &baseline.table)?,
		_ => Vec::new(),
	};

	Ok(Report { corpus_path: corpus.path().to_path_buf(), corpus_len: corpus.len(), results, count_files })
}

fn write_counts(dir: &Path, table: &FrequencyTable) -> Result<Vec<PathBuf>> {
	let written = io::write_counts_to_files(dir, table)?;
	info!("Wrote {} count files to {}", written.len(), dir.display());
	Ok(written)
}
