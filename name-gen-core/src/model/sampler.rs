use log::{trace, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{NameGenError, Result};

/// Factor applied to fractional weights before they enter the integer
/// sampling domain. Probabilities stored in `[0, 1]` become `[0, 100]`.
pub const WEIGHT_SCALE: f64 = 100.0;

/// A value together with its selection weight.
///
/// ## Invariants
/// - `weight` is finite and `>= 0`
/// - `scaled` is `weight * WEIGHT_SCALE`, truncated
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WeightedCandidate<T> {
	value: T,
	weight: f64,
	scaled: u64,
}

impl<T> WeightedCandidate<T> {
	/// The candidate value.
	pub fn value(&self) -> &T {
		&self.value
	}

	/// The weight as given, before scaling.
	pub fn weight(&self) -> f64 {
		self.weight
	}
}

/// Ordered collection of weighted candidates.
///
/// Candidates are kept in insertion order. Selection walks them in that
/// order, so two pools holding the same candidates in a different order can
/// resolve the same draw differently.
///
/// ## Invariants
/// - `total` is the exact sum of every candidate's scaled weight
/// - Invalid weights never enter the pool (rejected by `push`)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WeightedPool<T> {
	candidates: Vec<WeightedCandidate<T>>,
	total: u64,
}

impl<T> Default for WeightedPool<T> {
	fn default() -> Self {
		Self { candidates: Vec::new(), total: 0 }
	}
}

impl<T> WeightedPool<T> {
	/// Creates an empty pool.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a pool from `(value, weight)` pairs, keeping their order.
	///
	/// # Errors
	/// Fails on the first invalid weight, or if the total overflows.
	pub fn from_pairs<I>(pairs: I) -> Result<Self>
	where
		I: IntoIterator<Item = (T, f64)>,
	{
		let mut pool = Self::new();
		for (value, weight) in pairs {
			pool.push(value, weight)?;
		}
		Ok(pool)
	}

	/// Appends a candidate at the end of the pool.
	///
	/// # Errors
	/// - `InvalidWeight` if `weight` is negative, NaN or infinite
	/// - `WeightOverflow` if the scaled total can no longer be represented
	pub fn push(&mut self, value: T, weight: f64) -> Result<()> {
		let scaled = Self::scale(weight)?;
		self.total = self.total.checked_add(scaled).ok_or(NameGenError::WeightOverflow)?;
		self.candidates.push(WeightedCandidate { value, weight, scaled });
		Ok(())
	}

	fn scale(weight: f64) -> Result<u64> {
		if !weight.is_finite() || weight < 0.0 {
			return Err(NameGenError::InvalidWeight(weight));
		}
		let scaled = (weight * WEIGHT_SCALE).trunc();
		if scaled >= u64::MAX as f64 {
			return Err(NameGenError::WeightOverflow);
		}
		Ok(scaled as u64)
	}

	/// Number of candidates, zero-weight ones included.
	pub fn len(&self) -> usize {
		self.candidates.len()
	}

	/// `true` if `sample` would return `None`.
	pub fn is_empty(&self) -> bool {
		self.candidates.is_empty()
	}

	/// Sum of the scaled weights.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Iterates over the candidates in selection order.
	pub fn iter(&self) -> impl Iterator<Item = &WeightedCandidate<T>> {
		self.candidates.iter()
	}

	/// Iterates over the values only, in selection order.
	pub fn values(&self) -> impl Iterator<Item = &T> {
		self.candidates.iter().map(|candidate| &candidate.value)
	}

	/// Replaces every value while keeping weights and order.
	pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> WeightedPool<U> {
		WeightedPool {
			candidates: self
				.candidates
				.iter()
				.map(|c| WeightedCandidate { value: f(&c.value), weight: c.weight, scaled: c.scaled })
				.collect(),
			total: self.total,
		}
	}

	/// Draws one value with probability proportional to its weight.
	///
	/// A pick is drawn uniformly in `[0, total)` and candidates are walked in
	/// order: the first one with `pick <= weight` wins, otherwise its weight
	/// is subtracted and the walk continues.
	///
	/// - Returns `None` only if the pool is empty.
	/// - A pool whose weights all scale to zero always yields its first value.
	/// - If the walk ends without a match, the last candidate is returned.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
		let last = self.candidates.last()?;

		let mut pick = if self.total == 0 { 0 } else { rng.random_range(0..self.total) };
		trace!("sampling pick {} of {} over {} candidates", pick, self.total, self.candidates.len());

		for candidate in &self.candidates {
			if pick <= candidate.scaled {
				return Some(&candidate.value);
			}
			pick -= candidate.scaled;
		}

		warn!("weighted walk exhausted with {} left, falling back to last candidate", pick);
		Some(&last.value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn pool(pairs: &[(&'static str, f64)]) -> WeightedPool<&'static str> {
		WeightedPool::from_pairs(pairs.iter().copied()).unwrap()
	}

	#[test]
	fn empty_pool_yields_none() {
		let mut rng = StdRng::seed_from_u64(7);
		let empty: WeightedPool<String> = WeightedPool::new();
		assert!(empty.sample(&mut rng).is_none());
	}

	#[test]
	fn non_empty_pool_always_yields() {
		let pool = pool(&[("a", 0.3), ("b", 0.0), ("c", 0.005), ("d", 0.7)]);
		for seed in 0..500 {
			let mut rng = StdRng::seed_from_u64(seed);
			assert!(pool.sample(&mut rng).is_some());
		}
	}

	#[test]
	fn zero_total_picks_first_candidate() {
		let pool = pool(&[("first", 0.0), ("second", 0.004)]);
		assert_eq!(pool.total(), 0);
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(pool.sample(&mut rng), Some(&"first"));
	}

	#[test]
	fn single_candidate_is_always_chosen() {
		let pool = pool(&[("only", 0.42)]);
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..100 {
			assert_eq!(pool.sample(&mut rng), Some(&"only"));
		}
	}

	#[test]
	fn draws_follow_weights() {
		let pool = pool(&[("common", 0.9), ("rare", 0.1)]);
		let mut rng = StdRng::seed_from_u64(42);
		let draws = 10_000;
		let common = (0..draws).filter(|_| pool.sample(&mut rng) == Some(&"common")).count();
		let ratio = common as f64 / draws as f64;
		assert!((0.85..=0.95).contains(&ratio), "ratio was {ratio}");
	}

	#[test]
	fn weights_are_truncated_to_the_scaled_domain() {
		let pool = pool(&[("a", 0.129), ("b", 0.5)]);
		assert_eq!(pool.total(), 62);
	}

	#[test]
	fn invalid_weights_are_rejected() {
		let mut pool = WeightedPool::new();
		assert!(matches!(pool.push("neg", -0.1), Err(NameGenError::InvalidWeight(_))));
		assert!(matches!(pool.push("nan", f64::NAN), Err(NameGenError::InvalidWeight(_))));
		assert!(matches!(pool.push("inf", f64::INFINITY), Err(NameGenError::InvalidWeight(_))));
		assert!(pool.is_empty());
	}

	#[test]
	fn unrepresentable_totals_are_rejected() {
		let mut pool = WeightedPool::new();
		assert!(matches!(pool.push("huge", f64::MAX), Err(NameGenError::WeightOverflow)));
		pool.push("big", 1e17).unwrap();
		assert!(matches!(pool.push("big", 1e17), Err(NameGenError::WeightOverflow)));
		assert_eq!(pool.len(), 1);
	}

	#[test]
	fn map_keeps_weights_and_order() {
		let pool = pool(&[("ab", 0.2), ("cd", 0.8)]);
		let upper = pool.map(|v| v.to_uppercase());
		let pairs: Vec<(String, f64)> = upper.iter().map(|c| (c.value().clone(), c.weight())).collect();
		assert_eq!(pairs, vec![("AB".to_owned(), 0.2), ("CD".to_owned(), 0.8)]);
		assert_eq!(upper.total(), pool.total());
	}
}
