//! Procedural name and alias generation library.
//!
//! This crate provides:
//! - Cyrillic to Latin transliteration of display names into stable aliases
//! - Probability-weighted sampling over ordered candidate pools
//! - Vowel-boundary syllable segmentation
//! - Synthesis of new names from syllable fragments
//! - A corpus boundary and a high-level generator tying the above together
//!
//! Everything except corpus loading is pure and holds no state between calls.

/// Alias derivation and enumerated attachment targets.
pub mod alias;

/// Sampling, syllables, synthesis and the generator.
pub mod model;

/// Crate-wide error type.
pub mod error;

/// Corpus file and path helpers.
///
/// Not exposed
pub(crate) mod io;

pub use error::{NameGenError, Result};
