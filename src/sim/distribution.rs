//! Discrete probability distributions over outcomes.
//!
//! Outcomes are merged by equality as they are added, so two candidate
//! moves that collapse to the same successor end up as one outcome with
//! the summed probability. Per-actor distributions are tiny (a handful of
//! outcomes), so a linear scan beats hashing. Products of already merged
//! distributions are distinct and go through [`Distribution::from_distinct`].

use smallvec::SmallVec;

use super::error::TransitionError;
use crate::core::RaceRng;

/// Tolerance when checking that probabilities sum to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// A finite distribution over outcomes of type `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution<T> {
    outcomes: SmallVec<[(T, f64); 4]>,
}

impl<T> Default for Distribution<T> {
    fn default() -> Self {
        Self {
            outcomes: SmallVec::new(),
        }
    }
}

impl<T: PartialEq> Distribution<T> {
    /// Create an empty distribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// A distribution with a single outcome of probability 1.
    pub fn certain(outcome: T) -> Self {
        let mut dist = Self::new();
        dist.outcomes.push((outcome, 1.0));
        dist
    }

    /// Add probability mass to an outcome, merging with an equal outcome.
    pub fn add(&mut self, outcome: T, probability: f64) {
        match self.outcomes.iter_mut().find(|(o, _)| *o == outcome) {
            Some((_, p)) => *p += probability,
            None => self.outcomes.push((outcome, probability)),
        }
    }

    /// Probability assigned to `outcome` (zero if absent).
    #[must_use]
    pub fn probability(&self, outcome: &T) -> f64 {
        self.outcomes
            .iter()
            .find(|(o, _)| o == outcome)
            .map_or(0.0, |(_, p)| *p)
    }
}

impl<T> Distribution<T> {
    /// Build from outcomes the caller knows to be pairwise distinct.
    ///
    /// Skips the equality scan of [`Distribution::add`], so building is
    /// linear in the number of outcomes.
    pub fn from_distinct<I: IntoIterator<Item = (T, f64)>>(outcomes: I) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Iterate over `(outcome, probability)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.outcomes.iter().map(|(o, p)| (o, *p))
    }

    /// Total probability mass.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.outcomes.iter().map(|(_, p)| p).sum()
    }

    /// Check that the distribution is well formed.
    ///
    /// Every probability must be finite and non-negative and the total must
    /// be 1 within [`PROBABILITY_TOLERANCE`]. The distribution is never
    /// renormalized.
    pub fn validated(self, context: &'static str) -> Result<Self, TransitionError> {
        let total = self.total();
        let entries_ok = self.outcomes.iter().all(|(_, p)| p.is_finite() && *p >= 0.0);
        if !entries_ok || !total.is_finite() || (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(TransitionError::MalformedDistribution { context, total });
        }
        Ok(self)
    }

    /// Draw one outcome by inverse-CDF sampling.
    ///
    /// Rounding that leaves the draw above the cumulative total falls back
    /// to the last outcome. `None` only for an empty distribution.
    pub fn sample(&self, rng: &mut RaceRng) -> Option<&T> {
        let draw = rng.gen_f64();
        let mut cumulative = 0.0;
        for (outcome, p) in &self.outcomes {
            cumulative += p;
            if draw < cumulative {
                return Some(outcome);
            }
        }
        self.outcomes.last().map(|(o, _)| o)
    }

    /// Consume the distribution, yielding its outcomes.
    pub fn into_outcomes(self) -> impl Iterator<Item = (T, f64)> {
        self.outcomes.into_iter()
    }
}

impl<T: PartialEq> FromIterator<(T, f64)> for Distribution<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut dist = Self::new();
        for (outcome, p) in iter {
            dist.add(outcome, p);
        }
        dist
    }
}
