use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use super::sampler::WeightedPool;

/// Identifier of a nation in the surrounding system.
pub type NationId = u32;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
	Male,
	Female,
}

impl FromStr for Gender {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"male" => Ok(Self::Male),
			"female" => Ok(Self::Female),
			other => Err(format!("unknown gender '{other}'")),
		}
	}
}

impl fmt::Display for Gender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Male => write!(f, "male"),
			Self::Female => write!(f, "female"),
		}
	}
}

/// Source of candidate material, filtered by nation and gender.
///
/// A `None` filter means "any". Implementations never return soft-deleted
/// records and must keep a stable order, since weighted draws depend on it.
/// The engine asks again on every generation, caching is up to the provider.
pub trait CorpusProvider {
	/// Personal names with their selection probability.
	fn fetch_name_candidates(&self, nation: Option<NationId>, gender: Option<Gender>) -> Result<WeightedPool<String>>;

	/// Last names with their selection probability.
	fn fetch_lastname_candidates(&self, nation: Option<NationId>, gender: Option<Gender>) -> Result<WeightedPool<String>>;

	/// Name prefixes. Callers use the first one only.
	fn fetch_prefix_candidates(&self, nation: Option<NationId>, gender: Option<Gender>) -> Result<Vec<String>>;

	/// Syllable endings used to close synthesized names.
	fn fetch_endings(&self, nation: Option<NationId>, gender: Option<Gender>) -> Result<Vec<String>>;
}
