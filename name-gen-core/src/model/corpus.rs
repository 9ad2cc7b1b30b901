use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{NameGenError, Result};
use crate::io::{corpus_dir, corpus_name, list_files, read_lines, sibling_path};
use super::provider::{CorpusProvider, Gender, NationId};
use super::sampler::WeightedPool;

/// Chunks created per CPU when parsing a corpus file.
const CHUNK_FACTOR: usize = 8;

/// Below this many lines per chunk, spreading the work is not worth a thread.
const MIN_CHUNK_LINES: usize = 256;

/// Category of a corpus entry.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
	Name,
	LastName,
	Prefix,
	Ending,
}

impl FromStr for EntryKind {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"name" => Ok(Self::Name),
			"lastname" => Ok(Self::LastName),
			"prefix" => Ok(Self::Prefix),
			"ending" => Ok(Self::Ending),
			other => Err(format!("unknown entry kind '{other}'")),
		}
	}
}

/// One candidate record of the corpus.
///
/// An entry without a nation belongs to no nation and only matches unfiltered
/// queries. An entry without a gender is neutral and matches any gender.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CorpusEntry {
	pub kind: EntryKind,
	pub nation: Option<NationId>,
	pub gender: Option<Gender>,
	pub value: String,
	pub probability: f64,
	pub deleted: bool,
}

impl CorpusEntry {
	/// Creates a live (not deleted) entry.
	///
	/// `None` for nation or gender leaves the entry unrestricted on that axis,
	/// see `matches`.
	pub fn new(kind: EntryKind, nation: Option<NationId>, gender: Option<Gender>, value: &str, probability: f64) -> Self {
		Self { kind, nation, gender, value: value.to_owned(), probability, deleted: false }
	}

	/// Whether this entry is visible to a query.
	fn matches(&self, kind: EntryKind, nation: Option<NationId>, gender: Option<Gender>) -> bool {
		if self.deleted || self.kind != kind {
			return false;
		}
		let nation_ok = nation.is_none_or(|nation| self.nation == Some(nation));
		let gender_ok = match (gender, self.gender) {
			(Some(wanted), Some(own)) => wanted == own,
			_ => true,
		};
		nation_ok && gender_ok
	}

	/// Parses one tab separated corpus line:
	/// `kind  nation  gender  value  probability  [deleted]`.
	///
	/// Returns `Ok(None)` for blank lines and `#` comments.
	pub fn parse(line: &str, line_number: usize) -> Result<Option<Self>> {
		let trimmed = line.trim();
		if trimmed.is_empty() || trimmed.starts_with('#') {
			return Ok(None);
		}

		let error = |reason: String| NameGenError::CorpusParse { line: line_number, reason };

		let fields: Vec<&str> = trimmed.split('\t').map(str::trim).collect();
		if fields.len() != 5 && fields.len() != 6 {
			return Err(error(format!("expected 5 or 6 fields, got {}", fields.len())));
		}

		let kind = fields[0].parse::<EntryKind>().map_err(error)?;
		let nation = match fields[1] {
			"-" => None,
			id => Some(id.parse::<NationId>().map_err(|e| error(format!("nation '{id}': {e}")))?),
		};
		let gender = match fields[2] {
			"-" => None,
			gender => Some(gender.parse::<Gender>().map_err(error)?),
		};
		let value = fields[3];
		if value.is_empty() {
			return Err(error("empty value".to_owned()));
		}
		let probability = fields[4]
			.parse::<f64>()
			.map_err(|e| error(format!("probability '{}': {e}", fields[4])))?;
		if !probability.is_finite() || probability < 0.0 {
			return Err(error(format!("probability must be finite and >= 0, got {probability}")));
		}
		let deleted = match fields.get(5) {
			None => false,
			Some(&"deleted") => true,
			Some(other) => return Err(error(format!("unexpected trailing field '{other}'"))),
		};

		Ok(Some(Self { kind, nation, gender, value: value.to_owned(), probability, deleted }))
	}
}

/// In-memory corpus of names, last names, prefixes and endings.
///
/// Entries keep the order in which they were loaded or pushed.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Corpus {
	entries: Vec<CorpusEntry>,
	corpus_names: Vec<String>,
}

impl Corpus {
	/// Builds an in-memory corpus, with no backing file and no name.
	///
	/// Entry order is kept and drives weighted draws.
	pub fn from_entries(entries: Vec<CorpusEntry>) -> Self {
		Self { entries, corpus_names: Vec::new() }
	}

	/// Loads a corpus from a `.dat` file.
	///
	/// - Uses the sibling `.bin` file when it is at least as recent as the text.
	/// - Otherwise parses the text file and writes the `.bin` for next time.
	/// - The corpus is named after the file stem.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let filepath = filepath.as_ref();
		let binary_data_path = sibling_path(filepath, "bin")?;

		let mut corpus: Corpus = if Self::is_cache_fresh(filepath, &binary_data_path) {
			debug!("loading corpus cache {}", binary_data_path.display());
			let bytes = fs::read(&binary_data_path)?;
			postcard::from_bytes(&bytes)?
		} else {
			Self::read_database_file(filepath, &binary_data_path)?
		};

		corpus.corpus_names = vec![corpus_name(filepath)?];
		debug!("corpus '{}' holds {} entries", corpus.corpus_names[0], corpus.entries.len());
		Ok(corpus)
	}

	/// Loads and merges every `.dat` corpus of a directory, in file name order.
	///
	/// # Errors
	/// - `NotADirectory` if the path is not a directory
	/// - Any error from loading a single corpus
	pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
		let folder = corpus_dir(dir.as_ref());

		if !folder.is_dir() {
			return Err(NameGenError::NotADirectory(folder));
		}

		let mut corpus = Corpus::default();
		for file in list_files(&folder, "dat")? {
			corpus.merge(&Corpus::new(&file)?)?;
		}
		Ok(corpus)
	}

	fn is_cache_fresh(source: &Path, cache: &Path) -> bool {
		let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();
		match (modified(source), modified(cache)) {
			(Some(source), Some(cache)) => cache >= source,
			(None, Some(_)) => true,
			_ => false,
		}
	}

	/// Parses a corpus text file and serializes the result next to it.
	fn read_database_file(filename: &Path, binary_data_path: &Path) -> Result<Corpus> {
		let lines = read_lines(filename)?;
		let corpus = Corpus::from_entries(Self::parse_lines(&lines)?);

		let bytes = postcard::to_stdvec(&corpus)?;
		fs::write(binary_data_path, bytes)?;
		info!("compiled {} ({} entries) into {}", filename.display(), corpus.entries.len(), binary_data_path.display());

		Ok(corpus)
	}

	/// Parses corpus lines, spreading large inputs over worker threads.
	///
	/// Chunks are reassembled in their original order, so the result matches
	/// a sequential parse. Line numbers in errors are 1-based.
	pub fn parse_lines(lines: &[String]) -> Result<Vec<CorpusEntry>> {
		if lines.is_empty() {
			return Ok(Vec::new());
		}

		let chunks = num_cpus::get() * CHUNK_FACTOR;
		let chunk_size = lines.len().div_ceil(chunks).max(MIN_CHUNK_LINES);

		let (tx, rx) = mpsc::channel();
		let mut spawned = 0;
		for (index, chunk) in lines.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();
			let first_line = index * chunk_size + 1;

			thread::spawn(move || {
				let parsed = chunk
					.iter()
					.enumerate()
					.filter_map(|(offset, line)| CorpusEntry::parse(line, first_line + offset).transpose())
					.collect::<Result<Vec<_>>>();
				// The receiver only goes away once every chunk is reported.
				let _ = tx.send((index, parsed));
			});
			spawned += 1;
		}
		drop(tx);

		let mut parts: Vec<(usize, Result<Vec<CorpusEntry>>)> = rx.iter().collect();
		if parts.len() != spawned {
			return Err(NameGenError::WorkerLost);
		}
		parts.sort_by_key(|(index, _)| *index);

		let mut entries = Vec::with_capacity(lines.len());
		for (_, part) in parts {
			entries.extend(part?);
		}
		debug!("parsed {} entries from {} lines in {} chunks", entries.len(), lines.len(), spawned);
		Ok(entries)
	}

	/// Appends an entry at the end of the corpus.
	pub fn push(&mut self, entry: CorpusEntry) {
		self.entries.push(entry);
	}

	/// Every entry in load order, soft-deleted ones included.
	pub fn entries(&self) -> &[CorpusEntry] {
		&self.entries
	}

	/// Names of the corpus files merged into this corpus.
	pub fn corpus_names(&self) -> &[String] {
		&self.corpus_names
	}

	/// Appends another corpus after this one.
	///
	/// # Errors
	/// Returns `DuplicateCorpus` if a corpus of the same name is already merged.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if let Some(name) = other.corpus_names.iter().find(|name| self.corpus_names.contains(name)) {
			return Err(NameGenError::DuplicateCorpus(name.clone()));
		}

		self.entries.extend(other.entries.iter().cloned());
		self.corpus_names.extend(other.corpus_names.iter().cloned());
		Ok(())
	}

	fn filtered(&self, kind: EntryKind, nation: Option<NationId>, gender: Option<Gender>) -> impl Iterator<Item = &CorpusEntry> {
		self.entries.iter().filter(move |entry| entry.matches(kind, nation, gender))
	}

	fn pool(&self, kind: EntryKind, nation: Option<NationId>, gender: Option<Gender>) -> Result<WeightedPool<String>> {
		WeightedPool::from_pairs(
			self.filtered(kind, nation, gender).map(|entry| (entry.value.clone(), entry.probability)),
		)
	}

	fn values(&self, kind: EntryKind, nation: Option<NationId>, gender: Option<Gender>) -> Vec<String> {
		self.filtered(kind, nation, gender).map(|entry| entry.value.clone()).collect()
	}
}

impl CorpusProvider for Corpus {
	fn fetch_name_candidates(&self, nation: Option<NationId>, gender: Option<Gender>) -> Result<WeightedPool<String>> {
		self.pool(EntryKind::Name, nation, gender)
	}

	fn fetch_lastname_candidates(&self, nation: Option<NationId>, gender: Option<Gender>) -> Result<WeightedPool<String>> {
		self.pool(EntryKind::LastName, nation, gender)
	}

	fn fetch_prefix_candidates(&self, nation: Option<NationId>, gender: Option<Gender>) -> Result<Vec<String>> {
		Ok(self.values(EntryKind::Prefix, nation, gender))
	}

	fn fetch_endings(&self, nation: Option<NationId>, gender: Option<Gender>) -> Result<Vec<String>> {
		Ok(self.values(EntryKind::Ending, nation, gender))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SAMPLE: &str = "\
# kind\tnation\tgender\tvalue\tprobability
name\t1\tmale\tАльтаир\t0.6
name\t1\tfemale\tВега\t0.4
name\t2\tmale\tОрион\t0.5
name\t1\t-\tСириус\t0.2
name\t1\tmale\tУдалён\t0.9\tdeleted

lastname\t1\t-\tЗвездный\t1.0
prefix\t1\tmale\tибн\t1.0
prefix\t1\tmale\tаль\t1.0
ending\t1\tmale\tгиль\t1.0
ending\t1\tfemale\tана\t1.0
";

	fn sample_lines() -> Vec<String> {
		SAMPLE.lines().map(str::to_owned).collect()
	}

	fn sample_corpus() -> Corpus {
		Corpus::from_entries(Corpus::parse_lines(&sample_lines()).unwrap())
	}

	#[test]
	fn parse_full_line() {
		let entry = CorpusEntry::parse("name\t3\tfemale\tВега\t0.25\tdeleted", 1).unwrap().unwrap();
		assert_eq!(entry.kind, EntryKind::Name);
		assert_eq!(entry.nation, Some(3));
		assert_eq!(entry.gender, Some(Gender::Female));
		assert_eq!(entry.value, "Вега");
		assert_eq!(entry.probability, 0.25);
		assert!(entry.deleted);
	}

	#[test]
	fn parse_skips_blank_and_comment_lines() {
		assert!(CorpusEntry::parse("", 1).unwrap().is_none());
		assert!(CorpusEntry::parse("   ", 1).unwrap().is_none());
		assert!(CorpusEntry::parse("# name\t1\t-\tx\t1", 1).unwrap().is_none());
	}

	#[test]
	fn parse_reports_bad_lines() {
		let cases = [
			"name\t1\t-\tВега",
			"title\t1\t-\tВега\t0.5",
			"name\tone\t-\tВега\t0.5",
			"name\t1\tother\tВега\t0.5",
			"name\t1\t-\t\t0.5",
			"name\t1\t-\tВега\tmuch",
			"name\t1\t-\tВега\t-0.5",
			"name\t1\t-\tВега\t0.5\tgone",
		];
		for case in cases {
			let err = CorpusEntry::parse(case, 7).unwrap_err();
			assert!(matches!(err, NameGenError::CorpusParse { line: 7, .. }), "case {case:?}");
		}
	}

	#[test]
	fn parse_lines_keeps_order() {
		let entries = Corpus::parse_lines(&sample_lines()).unwrap();
		let values: Vec<&str> = entries.iter().map(|e| e.value.as_str()).collect();
		assert_eq!(
			values,
			vec!["Альтаир", "Вега", "Орион", "Сириус", "Удалён", "Звездный", "ибн", "аль", "гиль", "ана"]
		);
	}

	#[test]
	fn parse_lines_keeps_order_across_chunks() {
		let lines: Vec<String> = (0..2000).map(|i| format!("name\t-\t-\tn{i}\t0.1")).collect();
		let entries = Corpus::parse_lines(&lines).unwrap();
		assert_eq!(entries.len(), 2000);
		assert!(entries.iter().enumerate().all(|(i, e)| e.value == format!("n{i}")));
	}

	#[test]
	fn parse_lines_reports_absolute_line_number() {
		let mut lines: Vec<String> = (0..1000).map(|i| format!("name\t-\t-\tn{i}\t0.1")).collect();
		lines[700] = "broken".to_owned();
		let err = Corpus::parse_lines(&lines).unwrap_err();
		assert!(matches!(err, NameGenError::CorpusParse { line: 701, .. }));
	}

	#[test]
	fn filters_by_nation_and_gender() {
		let corpus = sample_corpus();
		let names: Vec<String> = corpus
			.fetch_name_candidates(Some(1), Some(Gender::Male))
			.unwrap()
			.values()
			.cloned()
			.collect();
		assert_eq!(names, vec!["Альтаир", "Сириус"]);

		let all_male = corpus.fetch_name_candidates(None, Some(Gender::Male)).unwrap();
		assert_eq!(all_male.len(), 3);

		let everything = corpus.fetch_name_candidates(None, None).unwrap();
		assert_eq!(everything.len(), 4);
	}

	#[test]
	fn soft_deleted_entries_are_hidden() {
		let corpus = sample_corpus();
		let names = corpus.fetch_name_candidates(Some(1), None).unwrap();
		assert!(names.values().all(|name| name != "Удалён"));
	}

	#[test]
	fn prefixes_and_endings_keep_order() {
		let corpus = sample_corpus();
		assert_eq!(corpus.fetch_prefix_candidates(Some(1), Some(Gender::Male)).unwrap(), vec!["ибн", "аль"]);
		assert_eq!(corpus.fetch_endings(Some(1), Some(Gender::Female)).unwrap(), vec!["ана"]);
		assert!(corpus.fetch_endings(Some(2), None).unwrap().is_empty());
	}

	#[test]
	fn pool_rejects_invalid_pushed_entries() {
		let mut corpus = Corpus::default();
		corpus.push(CorpusEntry::new(EntryKind::Name, None, None, "Вега", -1.0));
		assert!(matches!(
			corpus.fetch_name_candidates(None, None),
			Err(NameGenError::InvalidWeight(_))
		));
	}

	#[test]
	fn load_writes_and_reuses_cache() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("stars.dat");
		fs::write(&path, SAMPLE).unwrap();

		let first = Corpus::new(&path).unwrap();
		assert!(dir.path().join("stars.bin").exists());
		assert_eq!(first.corpus_names(), ["stars".to_owned()]);

		let second = Corpus::new(&path).unwrap();
		assert_eq!(second.entries(), first.entries());
		assert_eq!(second.corpus_names(), first.corpus_names());
	}

	#[test]
	fn from_dir_merges_files_in_name_order() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("b.dat"), "name\t-\t-\tБета\t1\n").unwrap();
		fs::write(dir.path().join("a.dat"), "name\t-\t-\tАльфа\t1\n").unwrap();

		let corpus = Corpus::from_dir(dir.path()).unwrap();
		assert_eq!(corpus.corpus_names(), ["a".to_owned(), "b".to_owned()]);
		let values: Vec<&str> = corpus.entries().iter().map(|e| e.value.as_str()).collect();
		assert_eq!(values, vec!["Альфа", "Бета"]);
	}

	#[test]
	fn from_dir_rejects_files() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("a.dat");
		fs::write(&file, "").unwrap();
		assert!(matches!(Corpus::from_dir(&file), Err(NameGenError::NotADirectory(_))));
	}

	#[test]
	fn merge_rejects_duplicates() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("stars.dat");
		fs::write(&path, SAMPLE).unwrap();

		let mut corpus = Corpus::new(&path).unwrap();
		let again = Corpus::new(&path).unwrap();
		assert!(matches!(corpus.merge(&again), Err(NameGenError::DuplicateCorpus(name)) if name == "stars"));
	}
}
