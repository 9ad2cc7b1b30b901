use rand::Rng;
use rand::seq::IndexedRandom;

use super::sampler::WeightedPool;

/// Where a leading fragment is drawn from when the caller gives none.
#[derive(Clone, Copy, Debug)]
pub enum FragmentSource<'a> {
	/// Every fragment is equally likely.
	Uniform(&'a [String]),
	/// Fragments are drawn through the weighted sampler.
	Weighted(&'a WeightedPool<String>),
}

impl FragmentSource<'_> {
	/// Draws a fragment, `None` if the source is empty.
	pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		match self {
			Self::Uniform(fragments) => fragments.choose(rng).map(String::as_str),
			Self::Weighted(pool) => pool.sample(rng).map(String::as_str),
		}
	}
}

/// A piece of a synthesized name and where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameFragment {
	ExplicitFirst(String),
	SampledLeading(String),
	ExplicitLast(String),
	SampledEnding(String),
}

impl NameFragment {
	/// The fragment text, whatever its origin.
	pub fn text(&self) -> &str {
		match self {
			Self::ExplicitFirst(s) | Self::SampledLeading(s) | Self::ExplicitLast(s) | Self::SampledEnding(s) => s,
		}
	}
}

/// Picks the leading and trailing fragments of a name.
///
/// Explicit fragments are used verbatim. A missing leading fragment is drawn
/// from `leading`, a missing trailing one uniformly from `endings`. Empty
/// sources yield empty fragments.
pub fn pick_fragments<R: Rng + ?Sized>(
	first: Option<&str>,
	last: Option<&str>,
	leading: &FragmentSource,
	endings: &[String],
	rng: &mut R,
) -> (NameFragment, NameFragment) {
	let head = match first {
		Some(first) => NameFragment::ExplicitFirst(first.to_owned()),
		None => NameFragment::SampledLeading(leading.draw(rng).unwrap_or_default().to_owned()),
	};
	let tail = match last {
		Some(last) => NameFragment::ExplicitLast(last.to_owned()),
		None => NameFragment::SampledEnding(
			endings.choose(rng).map(String::as_str).unwrap_or_default().to_owned(),
		),
	};
	(head, tail)
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// A synthesized name together with the fragments it was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Synthesis {
	pub head: NameFragment,
	pub tail: NameFragment,
	pub name: String,
}

/// Same as `synthesize`, but keeps the picked fragments alongside the name.
pub fn synthesize_fragments<R: Rng + ?Sized>(
	first: Option<&str>,
	last: Option<&str>,
	leading: &FragmentSource,
	endings: &[String],
	rng: &mut R,
) -> Synthesis {
	let (head, tail) = pick_fragments(first, last, leading, endings, rng);
	let name = capitalize_first(&format!("{}{}", head.text(), tail.text()));
	Synthesis { head, tail, name }
}

/// Builds a new name from a leading and a trailing fragment.
///
/// Fragments are joined without a separator and the first letter of the
/// result is uppercased. Never fails: with nothing to draw from, the missing
/// parts are empty.
///
/// # Examples
/// ```
/// use name_gen_core::model::synthesizer::{FragmentSource, synthesize};
///
/// let mut rng = rand::rng();
/// let name = synthesize(Some("ама"), Some("гиль"), &FragmentSource::Uniform(&[]), &[], &mut rng);
/// assert_eq!(name, "Амагиль");
/// ```
pub fn synthesize<R: Rng + ?Sized>(
	first: Option<&str>,
	last: Option<&str>,
	leading: &FragmentSource,
	endings: &[String],
	rng: &mut R,
) -> String {
	synthesize_fragments(first, last, leading, endings, rng).name
}
