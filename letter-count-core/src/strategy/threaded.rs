use std::sync::mpsc;
use std::thread;

use log::debug;

use crate::error::{Error, Result};
use crate::model::corpus::Corpus;
use crate::model::frequency_table::FrequencyTable;
use crate::model::settings::Settings;
use super::chunk;

/// Counts the corpus with a fixed pool of threads sharing its bytes.
pub fn count(corpus: &Corpus, settings: &Settings) -> Result<FrequencyTable> {
	count_bytes(corpus.bytes(), settings.chunk_size(), settings.workers())
}

/// Splits `bytes` into chunks, counts each worker's span on its own
/// thread, and merges the partial tables.
///
/// # Behavior
/// - At most `workers` scoped threads are spawned, each borrowing `bytes`.
/// - Every worker accumulates into a local `FrequencyTable` and sends it
///   over an MPSC channel once its span is done.
/// - The calling thread merges the received tables; merge order does not
///   affect the result.
///
/// # Errors
/// Returns `Error::Worker` if a thread panics. Builds with `panic = "abort"`
/// (the release profile) terminate the whole process instead.
pub fn count_bytes(bytes: &[u8], chunk_size: usize, workers: usize) -> Result<FrequencyTable> {
	let chunks = chunk::plan(bytes.len() as u64, chunk_size);
	let groups = chunk::assign(&chunks, workers);
	debug!("Threaded count: {} chunks over {} threads", chunks.len(), groups.len());

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		let mut handles = Vec::with_capacity(groups.len());
		for (worker, group) in groups.into_iter().enumerate() {
			let tx = tx.clone();
			let handle = scope.spawn(move || {
				let mut partial = FrequencyTable::new();
				for chunk in group {
					partial.record(&bytes[chunk.offset as usize..chunk.end() as usize]);
				}
				debug!("Thread {worker} counted {} bytes", partial.total());
				// The receiver outlives the scope, so this cannot fail.
				let _ = tx.send(partial);
			});
			handles.push((chunk::span(group), handle));
		}
		drop(tx);

		let mut total = FrequencyTable::new();
		for partial in rx.iter() {
			total.merge(&partial);
		}

		let mut failure = None;
		for ((offset, len), handle) in handles {
			if handle.join().is_err() && failure.is_none() {
				failure = Some(Error::worker(offset, len, "thread panicked"));
			}
		}
		match failure {
			Some(error) => Err(error),
			None => Ok(total),
		}
	})
}
