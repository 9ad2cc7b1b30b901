use std::fmt;
use std::path::Path;

use log::debug;
use rand::Rng;

use crate::error::Result;
use super::corpus::Corpus;
use super::generation_input::{GenerationInput, LeadingWeighting, NameMode};
use super::provider::CorpusProvider;
use super::sampler::WeightedPool;
use super::syllable::leading_fragment;
use super::synthesizer::{FragmentSource, synthesize_fragments};

/// A generated full name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullName {
	pub prefix: Option<String>,
	pub name: String,
	pub last_name: Option<String>,
}

impl fmt::Display for FullName {
	/// Joins the non-empty parts as `name prefix last_name`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let parts = [Some(self.name.as_str()), self.prefix.as_deref(), self.last_name.as_deref()];
		let mut first = true;
		for part in parts.into_iter().flatten().filter(|part| !part.is_empty()) {
			if !first {
				write!(f, " ")?;
			}
			write!(f, "{part}")?;
			first = false;
		}
		Ok(())
	}
}

/// High-level name generator on top of a corpus provider.
///
/// # Responsibilities
/// - Fetch candidate lists for the requested nation and gender
/// - Pick the prefix (first candidate) and the last name (weighted draw)
/// - Sample or synthesize the personal name
///
/// The provider is queried on every call; nothing is cached here.
#[derive(Debug)]
pub struct Generator<P: CorpusProvider> {
	provider: P,
}

impl Generator<Corpus> {
	/// Creates a generator over every `.dat` corpus in a directory.
	///
	/// # Errors
	/// See `Corpus::from_dir`.
	pub fn from_dir<D: AsRef<Path>>(dir: D) -> Result<Self> {
		Ok(Self::new(Corpus::from_dir(dir)?))
	}
}

impl<P: CorpusProvider> Generator<P> {
	/// Creates a generator that draws all its material from `provider`.
	pub fn new(provider: P) -> Self {
		Self { provider }
	}

	/// The underlying corpus provider.
	pub fn provider(&self) -> &P {
		&self.provider
	}

	/// Creates a `GenerationInput` with default settings.
	pub fn make_generation_input(&self) -> GenerationInput {
		GenerationInput::new()
	}

	/// Generates a full name.
	///
	/// # Behavior
	/// - Prefix: first prefix candidate, unweighted.
	/// - Last name: weighted draw, absent when there is no candidate.
	/// - Name: see `NameMode`. An empty corpus yields an empty name.
	///
	/// # Errors
	/// Only provider errors are propagated.
	pub fn generate<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<FullName> {
		let names = self.provider.fetch_name_candidates(input.nation, input.gender)?;

		let name = match input.mode {
			NameMode::Sampled => names.sample(rng).cloned().unwrap_or_default(),
			NameMode::Synthesized => self.synthesize_name(input, &names, rng)?,
		};

		let prefix = self
			.provider
			.fetch_prefix_candidates(input.nation, input.gender)?
			.into_iter()
			.next();

		let last_name = self
			.provider
			.fetch_lastname_candidates(input.nation, input.gender)?
			.sample(rng)
			.cloned();

		let full_name = FullName { prefix, name, last_name };
		debug!("generated '{}' for nation {:?}, gender {:?}", full_name, input.nation, input.gender);
		Ok(full_name)
	}

	/// Builds a name from fragments, retrying while it collides with an
	/// existing corpus name (up to `nb_try` extra attempts).
	fn synthesize_name<R: Rng + ?Sized>(
		&self,
		input: &GenerationInput,
		names: &WeightedPool<String>,
		rng: &mut R,
	) -> Result<String> {
		let endings = self.provider.fetch_endings(input.nation, input.gender)?;
		let stems = names.map(|name| leading_fragment(name));
		let uniform_stems: Vec<String>;
		let leading = match input.leading {
			LeadingWeighting::Weighted => FragmentSource::Weighted(&stems),
			LeadingWeighting::Uniform => {
				uniform_stems = stems.values().cloned().collect();
				FragmentSource::Uniform(&uniform_stems)
			}
		};

		let mut nb_try = input.nb_try;
		loop {
			let synthesis = synthesize_fragments(input.first_syllable(), input.last_syllable(), &leading, &endings, rng);
			debug!("synthesized '{}' from {:?} + {:?}", synthesis.name, synthesis.head, synthesis.tail);
			let name = synthesis.name;

			let exists = names.values().any(|known| known.to_lowercase() == name.to_lowercase());
			if !exists || nb_try == 0 || input.is_fully_explicit() {
				return Ok(name);
			}
			nb_try -= 1;
		}
	}
}
