//! Sequence quantification.
//!
//! Turns a resolved cut-set family and the probability models of its basic
//! events into estimates, importance measures and hazard tables for every
//! sampled realisation.

use std::collections::HashMap;

use super::{
    BasicEventImportance, CutSetRecord, Estimators, HazardBin, HazardIntegration, ImportanceAnalyzer,
    ImportanceMeasures, QuantificationSettings, SequenceResult, Summary, Triple,
};
use crate::domain::fault_tree::{CutSetFamily, EventCatalog};
use crate::domain::foundation::{AnalysisMode, EventId, ModelError};
use crate::domain::hazard::{HazardCurve, HazardIntegrator, IntensityBins, LognormalFit};
use crate::domain::probability::{BasicEventModel, EventDraw, ParameterSampler};

/// Everything the quantifier needs to know about one sequence.
pub struct SequenceInput<'a> {
    pub name: &'a str,
    pub cut_sets: &'a CutSetFamily,
    /// The sequence's basic events with their models.
    pub events: Vec<(EventId, &'a BasicEventModel)>,
    pub catalog: &'a EventCatalog,
    /// Resolved logic rows echoed into the result.
    pub logic: Vec<Vec<String>>,
    /// Hazard curve of a fragility run; the default curve is used when absent.
    pub hazard: Option<&'a HazardCurve>,
}

/// Hazard inputs shared by every realisation of a fragility run.
struct HazardGrid {
    centers: Vec<f64>,
    exceedance: Vec<f64>,
    deltas: Vec<f64>,
}

impl HazardGrid {
    fn new(curve: &HazardCurve, bins: &IntensityBins) -> Self {
        let centers = bins.centers();
        Self {
            exceedance: centers.iter().map(|im| curve.exceedance(*im)).collect(),
            deltas: HazardIntegrator::deltas(curve, bins),
            centers,
        }
    }

    /// Per-bin failure probabilities of one draw.
    fn fragility(&self, draw: &EventDraw) -> Vec<f64> {
        self.centers.iter().map(|im| draw.probability_at(*im)).collect()
    }
}

/// Stateless sequence quantifier.
pub struct Quantifier;

impl Quantifier {
    /// Quantifies one sequence.
    ///
    /// Basic events are ordered by name; that order fixes both the result
    /// ordinals and the order in which random draws are taken. In a
    /// fragility run each event's fragility is convolved with the hazard
    /// into an annual frequency before cut sets are evaluated; the sequence
    /// fragility per bin is integrated separately into `hazard`.
    ///
    /// # Errors
    ///
    /// - `MissingProbability` when a cut-set event has no model
    /// - `InvalidSettings` when the fragility bins are invalid
    pub fn quantify(
        input: SequenceInput<'_>,
        settings: &QuantificationSettings,
    ) -> Result<SequenceResult, ModelError> {
        let mut events = input.events;
        events.sort_by(|a, b| a.1.name.cmp(&b.1.name));
        events.dedup_by_key(|(id, _)| *id);

        let ordinals: HashMap<EventId, usize> = events.iter().enumerate().map(|(i, (id, _))| (*id, i)).collect();
        let cut_sets = input
            .cut_sets
            .iter()
            .map(|cs| {
                cs.events()
                    .map(|id| {
                        ordinals.get(&id).copied().ok_or_else(|| ModelError::MissingProbability {
                            event: input.catalog.name(id).to_string(),
                        })
                    })
                    .collect::<Result<Vec<usize>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let samples = settings.sample_count();
        tracing::debug!(
            sequence = %input.name,
            cut_sets = cut_sets.len(),
            basic_events = events.len(),
            samples,
            "Quantifying sequence"
        );

        let models: Vec<&BasicEventModel> = events.iter().map(|(_, m)| *m).collect();
        let draws = ParameterSampler::new(settings.seed).draw_all(&models, samples);

        let (probabilities, hazard) = match settings.analysis {
            AnalysisMode::Risk => (Self::risk_probabilities(&draws, samples), None),
            AnalysisMode::Fragility => {
                let bins = settings.bins()?;
                let default_curve;
                let curve = match input.hazard {
                    Some(curve) => curve,
                    None => {
                        default_curve = HazardCurve::default_curve();
                        &default_curve
                    }
                };
                let grid = HazardGrid::new(curve, &bins);
                let (probabilities, integration) = Self::integrate_hazard(&grid, &cut_sets, &draws, samples);
                (probabilities, Some(integration))
            }
        };

        let estimates: Vec<Triple<f64>> = probabilities
            .iter()
            .map(|p| Estimators::estimate(&cut_sets, p))
            .collect();
        let fta = Triple {
            min_max: Summary::from_samples(&estimates.iter().map(|t| t.min_max).collect::<Vec<_>>()),
            upper_bound: Summary::from_samples(&estimates.iter().map(|t| t.upper_bound).collect::<Vec<_>>()),
            rare_event: Summary::from_samples(&estimates.iter().map(|t| t.rare_event).collect::<Vec<_>>()),
        };

        let importance = events
            .iter()
            .enumerate()
            .map(|(ordinal, (_, model))| Self::event_importance(ordinal, model, &cut_sets, &probabilities))
            .collect();

        let point = &probabilities[0];
        let baseline = estimates[0].upper_bound;
        let cut_set_records = input
            .cut_sets
            .iter()
            .zip(&cut_sets)
            .map(|(cs, local)| {
                let mut names: Vec<String> = cs.events().map(|id| input.catalog.name(id).to_string()).collect();
                names.sort();
                let probability = Estimators::cut_set_probability(local, point);
                CutSetRecord {
                    events: names,
                    probability,
                    importance_percent: if baseline > 0.0 { 100.0 * probability / baseline } else { 0.0 },
                }
            })
            .collect();

        Ok(SequenceResult {
            sequence: input.name.to_string(),
            settings: settings.clone(),
            logic: input.logic,
            basic_events: models.iter().map(|m| m.describe()).collect(),
            cut_sets: cut_set_records,
            fta,
            importance,
            hazard,
        })
    }

    /// `[sample][event]` probabilities of a risk run.
    fn risk_probabilities(draws: &[Vec<EventDraw>], samples: usize) -> Vec<Vec<f64>> {
        (0..=samples)
            .map(|s| draws.iter().map(|d| d[s].probability_at(0.0)).collect())
            .collect()
    }

    /// Convolves every draw with the hazard.
    ///
    /// Returns the `[sample][event]` annual frequencies of the basic events
    /// and the sequence-level integration over the min-max fragility.
    fn integrate_hazard(
        grid: &HazardGrid,
        cut_sets: &[Vec<usize>],
        draws: &[Vec<EventDraw>],
        samples: usize,
    ) -> (Vec<Vec<f64>>, HazardIntegration) {
        let mut probabilities = Vec::with_capacity(samples + 1);
        let mut frequencies = Vec::with_capacity(samples + 1);
        let mut point_fragility = Vec::new();

        for s in 0..=samples {
            let fragility: Vec<Vec<f64>> = draws.iter().map(|d| grid.fragility(&d[s])).collect();
            probabilities.push(
                fragility
                    .iter()
                    .map(|f| HazardIntegrator::convolve(f, &grid.deltas))
                    .collect::<Vec<f64>>(),
            );

            let sequence_fragility: Vec<f64> = (0..grid.centers.len())
                .map(|bin| {
                    let at_bin: Vec<f64> = fragility.iter().map(|f| f[bin]).collect();
                    Estimators::min_max(cut_sets, &at_bin)
                })
                .collect();
            frequencies.push(HazardIntegrator::convolve(&sequence_fragility, &grid.deltas));
            if s == 0 {
                point_fragility = sequence_fragility;
            }
        }

        let bins = grid
            .centers
            .iter()
            .zip(&grid.exceedance)
            .zip(&grid.deltas)
            .zip(&point_fragility)
            .map(|(((im, exceedance), delta), fragility)| HazardBin {
                im: *im,
                exceedance: *exceedance,
                delta: *delta,
                sequence_fragility: *fragility,
                risk: fragility * delta,
            })
            .collect();

        let integration = HazardIntegration {
            bins,
            annual_frequency: Summary::from_samples(&frequencies),
            fragility_fit: LognormalFit::fit(&grid.centers, &point_fragility),
        };
        (probabilities, integration)
    }

    fn event_importance(
        ordinal: usize,
        model: &BasicEventModel,
        cut_sets: &[Vec<usize>],
        probabilities: &[Vec<f64>],
    ) -> BasicEventImportance {
        let occurrences = cut_sets.iter().filter(|cs| cs.contains(&ordinal)).count();
        let probability = Summary::from_samples(&probabilities.iter().map(|p| p[ordinal]).collect::<Vec<_>>());

        if occurrences == 0 {
            let absent = ImportanceMeasures::not_present();
            return BasicEventImportance {
                ordinal,
                name: model.name.clone(),
                occurrences,
                probability,
                fv: Summary::constant(absent.fv),
                rrr: Summary::sentinel(),
                rir: Summary::sentinel(),
                rri: Summary::constant(absent.rri),
                rii: Summary::constant(absent.rii),
                bi: Summary::constant(absent.bi),
            };
        }

        let measures: Vec<ImportanceMeasures> = probabilities
            .iter()
            .map(|p| ImportanceAnalyzer::evaluate(cut_sets, p, ordinal))
            .collect();
        let summarize =
            |pick: fn(&ImportanceMeasures) -> f64| Summary::from_samples(&measures.iter().map(pick).collect::<Vec<_>>());

        BasicEventImportance {
            ordinal,
            name: model.name.clone(),
            occurrences,
            probability,
            fv: summarize(|m| m.fv),
            rrr: summarize(|m| m.rrr),
            rir: summarize(|m| m.rir),
            rri: summarize(|m| m.rri),
            rii: summarize(|m| m.rii),
            bi: summarize(|m| m.bi),
        }
    }
}
