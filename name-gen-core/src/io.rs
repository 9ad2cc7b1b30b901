use std::env;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{NameGenError, Result};

/// Reads a corpus text file and returns its lines as a `Vec<String>`.
///
/// - Splits on `\n` / `\r\n`
/// - Keeps blank lines so that line numbers stay meaningful in errors
pub(crate) fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let contents = fs::read_to_string(filename)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Path of the compiled cache for a corpus file: same directory, same stem,
/// `extension` swapped in (`data/elves.dat` → `data/elves.bin`).
///
/// # Errors
/// `InvalidPath` when the path names no file, e.g. `".."` or `"/"`.
pub(crate) fn sibling_path<P: AsRef<Path>>(corpus_file: P, extension: &str) -> Result<PathBuf> {
	let corpus_file = corpus_file.as_ref();
	let stem = file_stem(corpus_file)?;
	Ok(corpus_file.with_file_name(stem).with_extension(extension))
}

/// Name a corpus is registered under once merged: its file stem.
/// `./data/elves.dat` and `elves.dat` both give `elves`.
pub(crate) fn corpus_name<P: AsRef<Path>>(corpus_file: P) -> Result<String> {
	Ok(file_stem(corpus_file.as_ref())?.to_string_lossy().into_owned())
}

fn file_stem(path: &Path) -> Result<&OsStr> {
	path.file_stem().ok_or_else(|| NameGenError::InvalidPath(path.to_path_buf()))
}

/// Directory a corpus folder argument points at.
///
/// A path made only of `.` components (`.`, `./`, `./.`) or an empty one
/// stands for the working directory and is resolved against it, so that
/// errors and logs show where the corpora were looked up. Anything else is
/// kept untouched.
pub(crate) fn corpus_dir(dir: &Path) -> PathBuf {
	if dir.components().all(|c| c == Component::CurDir) {
		env::current_dir().unwrap_or_else(|_| dir.to_path_buf())
	} else {
		dir.to_path_buf()
	}
}

/// Lists all files with a given extension in a directory, sorted by name.
///
/// Sorting keeps the merged corpus order stable between runs.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
			files.push(path);
		}
	}
	files.sort();

	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sibling_path_swaps_extension() {
		let path = sibling_path("data/elves.dat", "bin").unwrap();
		assert_eq!(path, PathBuf::from("data/elves.bin"));
	}

	#[test]
	fn corpus_name_strips_directory_and_extension() {
		assert_eq!(corpus_name("./data/elves.dat").unwrap(), "elves");
		assert_eq!(corpus_name("elves.dat").unwrap(), "elves");
	}

	#[test]
	fn paths_without_a_file_are_rejected() {
		assert!(matches!(sibling_path("..", "bin"), Err(NameGenError::InvalidPath(_))));
		assert!(matches!(corpus_name("/"), Err(NameGenError::InvalidPath(_))));
	}

	#[test]
	fn current_dir_spellings_resolve_to_working_directory() {
		let cwd = env::current_dir().unwrap();
		for spelling in ["", ".", "./", "./."] {
			assert_eq!(corpus_dir(Path::new(spelling)), cwd, "{spelling:?}");
		}
		assert_eq!(corpus_dir(Path::new("./data")), PathBuf::from("./data"));
	}

	#[test]
	fn list_files_filters_and_sorts() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("b.dat"), "").unwrap();
		fs::write(dir.path().join("a.dat"), "").unwrap();
		fs::write(dir.path().join("a.bin"), "").unwrap();

		let names: Vec<String> = list_files(dir.path(), "dat")
			.unwrap()
			.iter()
			.map(|p| corpus_name(p).unwrap())
			.collect();
		assert_eq!(names, vec!["a", "b"]);
	}
}
