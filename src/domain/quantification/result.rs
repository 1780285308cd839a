//! Per-sequence quantification records.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{QuantificationSettings, Summary, Triple};
use crate::domain::foundation::{ModelError, RunId, Timestamp};
use crate::domain::hazard::LognormalFit;

/// One minimal cut set of a sequence, evaluated at the point estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutSetRecord {
    pub events: Vec<String>,
    pub probability: f64,
    /// Share of the upper-bound frequency, in percent.
    pub importance_percent: f64,
}

/// Importance summaries of one basic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicEventImportance {
    /// Position in the sequence's name-sorted basic events.
    pub ordinal: usize,
    pub name: String,
    /// Number of cut sets containing the event.
    pub occurrences: usize,
    pub probability: Summary,
    pub fv: Summary,
    pub rrr: Summary,
    pub rir: Summary,
    pub rri: Summary,
    pub rii: Summary,
    pub bi: Summary,
}

/// One intensity-measure bin of a fragility run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardBin {
    pub im: f64,
    /// Annual exceedance frequency at the bin centre.
    pub exceedance: f64,
    /// Annual frequency of the IM falling in the bin.
    pub delta: f64,
    /// Sequence failure probability at the bin centre.
    pub sequence_fragility: f64,
    pub risk: f64,
}

/// Sequence-level hazard convolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardIntegration {
    pub bins: Vec<HazardBin>,
    pub annual_frequency: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragility_fit: Option<LognormalFit>,
}

/// Result tables exposed through [`SequenceResult::metric_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Fta,
    Fv,
    Rrr,
    Rir,
    Rri,
    Rii,
    Bi,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Fta,
        Metric::Fv,
        Metric::Rrr,
        Metric::Rir,
        Metric::Rri,
        Metric::Rii,
        Metric::Bi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Fta => "fta",
            Metric::Fv => "fv",
            Metric::Rrr => "rrr",
            Metric::Rir => "rir",
            Metric::Rri => "rri",
            Metric::Rii => "rii",
            Metric::Bi => "bi",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::InvalidSettings(format!("unknown result metric '{}'", s)))
    }
}

/// Everything computed for one sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceResult {
    pub sequence: String,
    pub settings: QuantificationSettings,
    /// Resolved logic as gate rows.
    pub logic: Vec<Vec<String>>,
    /// Probability rows of the sequence's basic events, in ordinal order.
    pub basic_events: Vec<Vec<String>>,
    pub cut_sets: Vec<CutSetRecord>,
    pub fta: Triple<Summary>,
    pub importance: Vec<BasicEventImportance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hazard: Option<HazardIntegration>,
}

impl SequenceResult {
    /// `[row][statistic]` table of one metric.
    ///
    /// `fta` has one row per estimator (min_max, upper bound, rare event);
    /// importance metrics have one row per basic-event ordinal. Columns
    /// follow [`Summary::COLUMNS`].
    pub fn metric_table(&self, metric: Metric) -> Vec<Vec<f64>> {
        let pick: fn(&BasicEventImportance) -> &Summary = match metric {
            Metric::Fta => {
                return [self.fta.min_max, self.fta.upper_bound, self.fta.rare_event]
                    .iter()
                    .map(|s| s.as_row().to_vec())
                    .collect();
            }
            Metric::Fv => |e| &e.fv,
            Metric::Rrr => |e| &e.rrr,
            Metric::Rir => |e| &e.rir,
            Metric::Rri => |e| &e.rri,
            Metric::Rii => |e| &e.rii,
            Metric::Bi => |e| &e.bi,
        };
        self.importance.iter().map(|e| pick(e).as_row().to_vec()).collect()
    }

    pub fn importance_for(&self, name: &str) -> Option<&BasicEventImportance> {
        self.importance.iter().find(|e| e.name == name)
    }
}

/// Results of one ETA run, keyed by sequence name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantificationResult {
    pub run_id: RunId,
    pub computed_at: Timestamp,
    pub sequences: BTreeMap<String, SequenceResult>,
}

impl QuantificationResult {
    pub fn new(sequences: BTreeMap<String, SequenceResult>) -> Self {
        Self {
            run_id: RunId::new(),
            computed_at: Timestamp::now(),
            sequences,
        }
    }

    pub fn sequence(&self, name: &str) -> Option<&SequenceResult> {
        self.sequences.get(name)
    }
}
