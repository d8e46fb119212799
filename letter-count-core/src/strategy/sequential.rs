use log::debug;

use crate::error::Result;
use crate::model::corpus::Corpus;
use crate::model::frequency_table::FrequencyTable;
use crate::model::settings::Settings;

/// Counts the corpus in a single pass on the calling thread.
///
/// This is the baseline the parallel strategies are checked against.
pub fn count(corpus: &Corpus, _settings: &Settings) -> Result<FrequencyTable> {
	debug!("Sequential scan of {} bytes", corpus.len());
	Ok(FrequencyTable::count_bytes(corpus.bytes()))
}
