//! Top-event probability estimators over minimal cut sets.
//!
//! Cut sets are given as lists of local event indices into a probability
//! slice; basic events are independent.

use serde::{Deserialize, Serialize};

/// The three simultaneous estimates of a sequence probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triple<T> {
    /// Exact inclusion-exclusion; the primary estimate.
    pub min_max: T,
    /// Min-cut upper bound, `1 - Π(1 - P(cs))`.
    pub upper_bound: T,
    /// Rare-event approximation, `Σ P(cs)`.
    pub rare_event: T,
}

impl<T> Triple<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Triple<U> {
        Triple {
            min_max: f(self.min_max),
            upper_bound: f(self.upper_bound),
            rare_event: f(self.rare_event),
        }
    }
}

/// Estimator functions.
pub struct Estimators;

impl Estimators {
    /// Probability that every member of one cut set fails.
    pub fn cut_set_probability(cut_set: &[usize], probabilities: &[f64]) -> f64 {
        cut_set.iter().map(|e| probabilities[*e]).product()
    }

    /// Σ P(cs).
    pub fn rare_event<'a>(cut_sets: impl IntoIterator<Item = &'a Vec<usize>>, probabilities: &[f64]) -> f64 {
        cut_sets
            .into_iter()
            .map(|cs| Self::cut_set_probability(cs, probabilities))
            .sum()
    }

    /// `1 - Π(1 - P(cs))`, evaluated as `-expm1(Σ ln(1 - P(cs)))` so that
    /// small probabilities keep full precision.
    pub fn upper_bound<'a>(cut_sets: impl IntoIterator<Item = &'a Vec<usize>>, probabilities: &[f64]) -> f64 {
        let mut log_survival = 0.0;
        for cs in cut_sets {
            let p = Self::cut_set_probability(cs, probabilities);
            if p >= 1.0 {
                return 1.0;
            }
            log_survival += (-p).ln_1p();
        }
        -log_survival.exp_m1()
    }

    /// Exact probability of the union of the cut sets by inclusion-exclusion.
    ///
    /// Each subset of cut sets contributes the probability of the union of
    /// its members with sign `(-1)^(k+1)`. Subsets whose product is already
    /// zero are not extended, since every superset also contributes zero.
    /// Cost grows as `2^n` in the number of cut sets.
    pub fn min_max(cut_sets: &[Vec<usize>], probabilities: &[f64]) -> f64 {
        let mut multiplicity = vec![0u32; probabilities.len()];
        let mut total = 0.0;
        Self::inclusion_exclusion(cut_sets, probabilities, 0, 1.0, 1.0, &mut multiplicity, &mut total);
        total
    }

    fn inclusion_exclusion(
        cut_sets: &[Vec<usize>],
        probabilities: &[f64],
        start: usize,
        product: f64,
        sign: f64,
        multiplicity: &mut [u32],
        total: &mut f64,
    ) {
        for j in start..cut_sets.len() {
            let mut term = product;
            for &e in &cut_sets[j] {
                if multiplicity[e] == 0 {
                    term *= probabilities[e];
                }
                multiplicity[e] += 1;
            }
            *total += sign * term;
            if term != 0.0 {
                Self::inclusion_exclusion(cut_sets, probabilities, j + 1, term, -sign, multiplicity, total);
            }
            for &e in &cut_sets[j] {
                multiplicity[e] -= 1;
            }
        }
    }

    /// All three estimates.
    pub fn estimate(cut_sets: &[Vec<usize>], probabilities: &[f64]) -> Triple<f64> {
        Triple {
            min_max: Self::min_max(cut_sets, probabilities),
            upper_bound: Self::upper_bound(cut_sets, probabilities),
            rare_event: Self::rare_event(cut_sets, probabilities),
        }
    }
}
