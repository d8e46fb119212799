use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Number of letters tracked by a frequency table (`A` to `Z`).
pub const LETTER_COUNT: usize = 26;

/// A non-empty set of uppercase ASCII letters used to generate a corpus.
///
/// # Invariants
/// - Contains at least one letter
/// - Every symbol is in `b'A'..=b'Z'`
/// - No duplicates; order of first appearance is preserved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
	letters: Vec<u8>,
}

impl Alphabet {
	/// Builds an alphabet from raw symbols.
	///
	/// Lowercase letters are upper-cased and duplicates are dropped.
	///
	/// # Errors
	/// Returns `InvalidAlphabet` if `symbols` is empty or contains a
	/// byte that is not an ASCII letter.
	pub fn new(symbols: &[u8]) -> Result<Self> {
		let mut letters = Vec::with_capacity(symbols.len());
		for &symbol in symbols {
			if !symbol.is_ascii_alphabetic() {
				return Err(Error::InvalidAlphabet(format!(
					"'{}' is not an ASCII letter",
					symbol.escape_ascii()
				)));
			}
			let letter = symbol.to_ascii_uppercase();
			if !letters.contains(&letter) {
				letters.push(letter);
			}
		}
		if letters.is_empty() {
			return Err(Error::InvalidAlphabet("alphabet must contain at least one letter".to_owned()));
		}
		Ok(Self { letters })
	}

	/// Returns the letters of the alphabet as uppercase ASCII bytes.
	pub fn letters(&self) -> &[u8] {
		&self.letters
	}

	pub fn len(&self) -> usize {
		self.letters.len()
	}

	/// Always false for a constructed alphabet.
	pub fn is_empty(&self) -> bool {
		self.letters.is_empty()
	}

	pub fn contains(&self, letter: u8) -> bool {
		self.letters.contains(&letter.to_ascii_uppercase())
	}
}

impl Default for Alphabet {
	/// The full uppercase alphabet `A` to `Z`.
	fn default() -> Self {
		Self { letters: (b'A'..=b'Z').collect() }
	}
}

/// Parses either a comma separated list (`"A,B,C,D"`) or a run of
/// letters (`"ABCD"`). Whitespace around items is ignored.
impl FromStr for Alphabet {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		if s.contains(',') {
			let mut symbols = Vec::new();
			for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
				let mut chars = item.chars();
				match (chars.next(), chars.next()) {
					(Some(c), None) if c.is_ascii() => symbols.push(c as u8),
					_ => {
						return Err(Error::InvalidAlphabet(format!(
							"'{item}' must be a single ASCII letter"
						)));
					}
				}
			}
			Self::new(&symbols)
		} else {
			let symbols: String = s.chars().filter(|c| !c.is_whitespace()).collect();
			if !symbols.is_ascii() {
				return Err(Error::InvalidAlphabet(format!("'{symbols}' contains non-ASCII symbols")));
			}
			Self::new(symbols.as_bytes())
		}
	}
}

impl fmt::Display for Alphabet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, letter) in self.letters.iter().enumerate() {
			if i > 0 {
				f.write_str(",")?;
			}
			write!(f, "{}", *letter as char)?;
		}
		Ok(())
	}
}
