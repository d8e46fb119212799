//! Data model of the letter counter.
//!
//! - Alphabets the corpus is drawn from (`Alphabet`)
//! - Random corpus generation (`Generator`)
//! - The loaded corpus itself (`Corpus`)
//! - Per-letter counts (`FrequencyTable`)
//! - Run configuration (`Settings`)

/// Validated set of uppercase letters.
pub mod alphabet;

/// The corpus file and its bytes, loaded once.
pub mod corpus;

/// Case-insensitive letter counts with a commutative merge.
pub mod frequency_table;

/// Uniform random letter generation, in memory or streamed to a file.
pub mod generator;

/// Corpus and strategy configuration with validated setters.
pub mod settings;
