use crate::error::{NameGenError, Result};
use super::provider::{Gender, NationId};

/// How the personal name is produced.
///
/// # Variants
/// - `Sampled`: draw an existing corpus name through the weighted sampler.
/// - `Synthesized`: build a new name from a leading fragment and an ending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NameMode {
	#[default]
	Sampled,
	Synthesized,
}

/// How a missing leading fragment is drawn in `NameMode::Synthesized`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LeadingWeighting {
	Uniform,
	#[default]
	Weighted,
}

/// Input parameters for generating a full name.
///
/// # Responsibilities
/// - Select the corpus slice (`nation`, `gender`)
/// - Choose how the personal name is built (`mode`, `leading`)
/// - Hold optional explicit fragments, validated on the way in
///
/// # Invariants
/// - Explicit fragments, when present, are never blank
#[derive(Clone, Debug)]
pub struct GenerationInput {
	/// Nation filter, `None` for any nation.
	pub nation: Option<NationId>,

	/// Gender filter, `None` for any gender.
	pub gender: Option<Gender>,

	pub mode: NameMode,

	pub leading: LeadingWeighting,

	/// Number of extra attempts when a synthesized name already exists in
	/// the corpus. Best effort: the last attempt is kept regardless.
	pub nb_try: usize,

	first_syllable: Option<String>,

	last_syllable: Option<String>,
}

impl GenerationInput {
	/// Creates an input with no filters, sampled mode and no retries.
	///
	/// # Visibility
	/// - `pub(crate)`: obtained through `Generator::make_generation_input`.
	pub(crate) fn new() -> Self {
		Self {
			nation: None,
			gender: None,
			mode: NameMode::default(),
			leading: LeadingWeighting::default(),
			nb_try: 0,
			first_syllable: None,
			last_syllable: None,
		}
	}

	/// Either fragment can open the synthesized name, so both must start
	/// with a letter that capitalizes.
	fn validate(fragment: &str, which: &'static str) -> Result<String> {
		if fragment.trim().is_empty() {
			return Err(NameGenError::EmptyFragment(which));
		}
		let cased_start = fragment
			.chars()
			.next()
			.is_some_and(|c| c.is_alphabetic() && c.to_uppercase().all(char::is_uppercase));
		if fragment.trim() != fragment || !cased_start {
			return Err(NameGenError::MalformedFragment { which, fragment: fragment.to_owned() });
		}
		Ok(fragment.to_owned())
	}

	pub fn first_syllable(&self) -> Option<&str> {
		self.first_syllable.as_deref()
	}

	pub fn last_syllable(&self) -> Option<&str> {
		self.last_syllable.as_deref()
	}

	/// Forces the leading fragment of synthesized names.
	///
	/// # Errors
	/// Returns `EmptyFragment` if `fragment` is blank, `MalformedFragment`
	/// if it is padded with whitespace or does not start with a cased letter.
	pub fn set_first_syllable(&mut self, fragment: &str) -> Result<()> {
		self.first_syllable = Some(Self::validate(fragment, "first")?);
		Ok(())
	}

	/// Forces the trailing fragment of synthesized names.
	///
	/// # Errors
	/// Same rules as `set_first_syllable`.
	pub fn set_last_syllable(&mut self, fragment: &str) -> Result<()> {
		self.last_syllable = Some(Self::validate(fragment, "last")?);
		Ok(())
	}

	pub fn clear_first_syllable(&mut self) {
		self.first_syllable = None;
	}

	pub fn clear_last_syllable(&mut self) {
		self.last_syllable = None;
	}

	/// Whether every fragment is explicit, leaving nothing to chance.
	pub(crate) fn is_fully_explicit(&self) -> bool {
		self.first_syllable.is_some() && self.last_syllable.is_some()
	}
}
