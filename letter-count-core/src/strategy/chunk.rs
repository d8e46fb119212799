//! Splitting a corpus into chunks and chunks into per-worker spans.

/// A contiguous byte range `[offset, offset + len)` of the corpus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
	pub offset: u64,
	pub len: u64,
}

impl Chunk {
	pub fn end(&self) -> u64 {
		self.offset + self.len
	}
}

/// Splits `[0, len)` into consecutive chunks of `chunk_size` bytes.
///
/// The last chunk may be shorter. An empty corpus yields no chunks.
/// `chunk_size` must be at least 1.
pub fn plan(len: u64, chunk_size: usize) -> Vec<Chunk> {
	debug_assert!(chunk_size > 0, "chunk size must be at least 1");
	let chunk_size = chunk_size as u64;
	let count = len.div_ceil(chunk_size);
	(0..count)
		.map(|i| {
			let offset = i * chunk_size;
			Chunk { offset, len: chunk_size.min(len - offset) }
		})
		.collect()
}

/// Distributes `chunks` over at most `workers` contiguous, non-empty groups.
///
/// Group sizes differ by at most one chunk and chunk order is kept, so
/// each group covers one contiguous span of the corpus.
pub fn assign(chunks: &[Chunk], workers: usize) -> Vec<&[Chunk]> {
	if chunks.is_empty() || workers == 0 {
		return Vec::new();
	}
	let groups = workers.min(chunks.len());
	let base = chunks.len() / groups;
	let extra = chunks.len() % groups;

	let mut assigned = Vec::with_capacity(groups);
	let mut rest = chunks;
	for group in 0..groups {
		let size = if group < extra { base + 1 } else { base };
		let (head, tail) = rest.split_at(size);
		assigned.push(head);
		rest = tail;
	}
	assigned
}

/// Returns the `(offset, len)` covered by a contiguous group of chunks.
pub fn span(group: &[Chunk]) -> (u64, u64) {
	match (group.first(), group.last()) {
		(Some(first), Some(last)) => (first.offset, last.end() - first.offset),
		_ => (0, 0),
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use quickcheck_macros::quickcheck;

	#[test]
	fn plans_even_and_ragged_chunks() {
		assert!(plan(0, 10).is_empty());
		assert_eq!(plan(20, 10), vec![Chunk { offset: 0, len: 10 }, Chunk { offset: 10, len: 10 }]);
		assert_eq!(plan(25, 10).last(), Some(&Chunk { offset: 20, len: 5 }));
		assert_eq!(plan(3, 10), vec![Chunk { offset: 0, len: 3 }]);
	}

	#[test]
	fn assigns_balanced_groups() {
		let chunks = plan(100, 10);
		let groups = assign(&chunks, 3);
		let sizes: Vec<usize> = groups.iter().map(|group| group.len()).collect();
		assert_eq!(sizes, vec![4, 3, 3]);
		assert_eq!(span(groups[0]), (0, 40));
		assert_eq!(span(groups[1]), (40, 30));
		assert_eq!(span(groups[2]), (70, 30));
	}

	#[test]
	fn never_more_groups_than_chunks() {
		let chunks = plan(15, 10);
		assert_eq!(assign(&chunks, 8).len(), 2);
		assert!(assign(&[], 8).is_empty());
	}

	#[quickcheck]
	fn plan_covers_corpus_exactly(len: u16, chunk_size: u8) -> bool {
		let chunk_size = chunk_size as usize + 1;
		let chunks = plan(len as u64, chunk_size);
		let mut expected_offset = 0;
		for chunk in &chunks {
			if chunk.offset != expected_offset || chunk.len == 0 || chunk.len > chunk_size as u64 {
				return false;
			}
			expected_offset = chunk.end();
		}
		expected_offset == len as u64
	}

	#[quickcheck]
	fn assign_keeps_every_chunk_in_order(len: u16, chunk_size: u8, workers: u8) -> bool {
		let chunks = plan(len as u64, chunk_size as usize + 1);
		let workers = workers as usize + 1;
		let groups = assign(&chunks, workers);
		let flattened: Vec<Chunk> = groups.iter().flat_map(|group| group.iter().copied()).collect();
		groups.len() <= workers && groups.iter().all(|group| !group.is_empty()) && flattened == chunks
	}
}
