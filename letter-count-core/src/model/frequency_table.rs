use std::fmt;

use serde::{Deserialize, Serialize};

use super::alphabet::LETTER_COUNT;

/// Per-letter occurrence counts for a corpus (or a part of it).
///
/// Counting is case-insensitive: `a` and `A` both count as `A`.
/// Bytes that are not ASCII letters are tallied in `other` so that
/// every scanned byte is accounted for.
///
/// # Invariants
/// - `letters_total() + other() == ` number of bytes recorded
/// - Merging is a commutative, associative summation
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
	counts: [u64; LETTER_COUNT],
	other: u64,
}

impl FrequencyTable {
	/// Returns a table with every count at zero.
	pub fn new() -> Self {
		Self::default()
	}

	/// Counts all bytes of `bytes` into a fresh table.
	pub fn count_bytes(bytes: &[u8]) -> Self {
		let mut table = Self::new();
		table.record(bytes);
		table
	}

	/// Adds every byte of `bytes` to the table.
	pub fn record(&mut self, bytes: &[u8]) {
		for &byte in bytes {
			if byte.is_ascii_alphabetic() {
				self.counts[(byte.to_ascii_uppercase() - b'A') as usize] += 1;
			} else {
				self.other += 1;
			}
		}
	}

	/// Sums the counts of `other` into this table.
	pub fn merge(&mut self, other: &Self) {
		for (count, extra) in self.counts.iter_mut().zip(other.counts.iter()) {
			*count += extra;
		}
		self.other += other.other;
	}

	/// Returns the count for `letter` (case-insensitive), or zero for a
	/// symbol that is not an ASCII letter.
	pub fn get(&self, letter: char) -> u64 {
		if letter.is_ascii_alphabetic() {
			self.counts[(letter.to_ascii_uppercase() as u8 - b'A') as usize]
		} else {
			0
		}
	}

	/// Number of bytes that were not ASCII letters.
	pub fn other(&self) -> u64 {
		self.other
	}

	/// Sum of all letter counts.
	pub fn letters_total(&self) -> u64 {
		self.counts.iter().sum()
	}

	/// Number of bytes recorded, letters and others.
	pub fn total(&self) -> u64 {
		self.letters_total() + self.other
	}

	pub fn is_empty(&self) -> bool {
		self.total() == 0
	}

	/// Iterates over letters with a non-zero count, in alphabetical order.
	pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
		self.counts
			.iter()
			.enumerate()
			.filter(|(_, count)| **count > 0)
			.map(|(i, count)| ((b'A' + i as u8) as char, *count))
	}
}

impl fmt::Display for FrequencyTable {
	/// Renders as `{A: 3, B: 1}`, followed by `other: n` when non-letters were seen.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("{")?;
		let mut first = true;
		for (letter, count) in self.iter() {
			if !first {
				f.write_str(", ")?;
			}
			write!(f, "{letter}: {count}")?;
			first = false;
		}
		if self.other > 0 {
			if !first {
				f.write_str(", ")?;
			}
			write!(f, "other: {}", self.other)?;
		}
		f.write_str("}")
	}
}
