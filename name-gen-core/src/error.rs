use std::path::PathBuf;

/// Errors raised by the name and alias generation engine.
///
/// The engine components themselves are total: empty corpora and missing
/// fragments degrade to empty values instead of failing. The variants below
/// cover caller contract violations and corpus loading.
#[derive(Debug, thiserror::Error)]
pub enum NameGenError {
	/// A candidate weight was negative, NaN or infinite.
	#[error("weight must be a finite, non-negative number, got {0}")]
	InvalidWeight(f64),

	/// The scaled sum of a pool's weights does not fit the sampling domain.
	#[error("total pool weight overflows the sampling domain")]
	WeightOverflow,

	/// An explicit name fragment was blank.
	#[error("{0} fragment cannot be empty")]
	EmptyFragment(&'static str),

	/// An explicit name fragment had surrounding whitespace, or did not
	/// start with a letter that has an uppercase form.
	#[error("{which} fragment '{fragment}' must be trimmed and start with a cased letter")]
	MalformedFragment { which: &'static str, fragment: String },

	#[error("corpus line {line}: {reason}")]
	CorpusParse { line: usize, reason: String },

	#[error("corpus worker stopped before reporting its chunk")]
	WorkerLost,

	#[error("expected a directory, got: {0}")]
	NotADirectory(PathBuf),

	#[error("corpus '{0}' already loaded")]
	DuplicateCorpus(String),

	#[error("invalid path: {0}")]
	InvalidPath(PathBuf),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("corpus cache: {0}")]
	Cache(#[from] postcard::Error),
}

pub type Result<T> = std::result::Result<T, NameGenError>;
