//! Alias derivation for directory-style entities.
//!
//! - `transliterate` turns a Cyrillic display name into an ASCII alias
//! - `AttachmentTarget` is the closed set of tags that dispatch code matches on

/// Cyrillic to Latin transliteration table and function.
mod transliterator;

/// Enumerated attachment targets and their aliases.
mod target;

pub use target::AttachmentTarget;
pub use transliterator::{TRANSLITERATION_RULES, transliterate};
