//! Risk-importance measures of one basic event within a cut-set family.

use serde::{Deserialize, Serialize};

use super::Estimators;

/// Importance of a basic event for one probability realisation.
///
/// Ratios that cannot be computed are `NaN`; summaries turn them into the
/// sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImportanceMeasures {
    /// Fussell-Vesely fraction.
    pub fv: f64,
    /// Risk reduction ratio.
    pub rrr: f64,
    /// Risk increase ratio.
    pub rir: f64,
    /// Risk reduction interval.
    pub rri: f64,
    /// Risk increase interval.
    pub rii: f64,
    /// Birnbaum importance.
    pub bi: f64,
}

impl ImportanceMeasures {
    /// Measures of an event that no cut set contains.
    pub fn not_present() -> Self {
        Self {
            fv: 0.0,
            rrr: -1.0,
            rir: -1.0,
            rri: 0.0,
            rii: 0.0,
            bi: 0.0,
        }
    }
}

pub struct ImportanceAnalyzer;

impl ImportanceAnalyzer {
    /// Evaluates every measure for `event` by requantifying the min-cut
    /// upper bound with the event's probability forced to 0 and to 1.
    pub fn evaluate(cut_sets: &[Vec<usize>], probabilities: &[f64], event: usize) -> ImportanceMeasures {
        let containing: Vec<&Vec<usize>> = cut_sets.iter().filter(|cs| cs.contains(&event)).collect();
        if containing.is_empty() {
            return ImportanceMeasures::not_present();
        }

        let baseline = Estimators::upper_bound(cut_sets, probabilities);
        let mut forced = probabilities.to_vec();
        forced[event] = 0.0;
        let reduced = Estimators::upper_bound(cut_sets, &forced);
        forced[event] = 1.0;
        let increased = Estimators::upper_bound(cut_sets, &forced);
        let contribution = Estimators::upper_bound(containing, probabilities);

        ImportanceMeasures {
            fv: ratio(contribution, baseline),
            rrr: ratio(baseline, reduced),
            rir: ratio(increased, baseline),
            rri: baseline - reduced,
            rii: increased - baseline,
            bi: increased - reduced,
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        f64::NAN
    }
}
