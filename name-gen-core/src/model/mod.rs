//! Name generation engine.
//!
//! Leaf components are pure functions over their inputs:
//! - Weighted candidate pools and sampling (`sampler`)
//! - Vowel-boundary syllable segmentation (`syllable`)
//! - Fragment-based name synthesis (`synthesizer`)
//!
//! On top of them sit the corpus boundary (`provider`), an in-memory corpus
//! (`corpus`) and the high-level `Generator`.

/// Weighted pools and probability-weighted selection.
pub mod sampler;

/// Syllable splitting and fragment extraction.
pub mod syllable;

/// Assembly of new names from leading fragments and endings.
pub mod synthesizer;

/// Corpus provider trait and the nation/gender filter types.
pub mod provider;

/// In-memory corpus loaded from `.dat` files, with a compiled `.bin` cache.
pub mod corpus;

/// Generation settings handed to `Generator::generate`.
pub mod generation_input;

/// High-level interface producing full names from a corpus provider.
pub mod generator;
