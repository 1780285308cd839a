//! Basic-event probability models.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;

use super::normal::lognormal_cdf;
use crate::domain::foundation::{AnalysisMode, ModelError, Probability, Table, TableRow};

/// Parametric form of a basic event's failure probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "distribution", rename_all = "lowercase")]
pub enum Distribution {
    /// `PE,p` - fixed probability.
    Point { probability: Probability },
    /// `NORM,mean,sd` - normal, clipped to [0, 1].
    Normal { mean: f64, sd: f64 },
    /// `LNORM,median,beta[,beta_u]` - lognormal fragility in the intensity measure.
    ///
    /// `beta_u` is the epistemic log-std of the median, used only when sampling.
    Lognormal { median: f64, beta: f64, beta_u: f64 },
}

impl Distribution {
    /// Parses fields 1.. of a probability row.
    pub fn from_row(table: &Table, row: &TableRow) -> Result<Self, ModelError> {
        table.require_min_fields(row, 2)?;
        let event = row.key();
        let tag = row.fields[1].to_ascii_uppercase();

        match tag.as_str() {
            "PE" => {
                table.require_field_range(row, 3, 3)?;
                let p = table.number(row, 2)?;
                let probability = Probability::try_new(p)
                    .map_err(|e| ModelError::invalid_parameter(event, e.to_string()))?;
                Ok(Distribution::Point { probability })
            }
            "NORM" => {
                table.require_field_range(row, 4, 4)?;
                let mean = table.number(row, 2)?;
                let sd = table.number(row, 3)?;
                if !mean.is_finite() || !sd.is_finite() || sd < 0.0 {
                    return Err(ModelError::invalid_parameter(
                        event,
                        format!("normal needs a finite mean and sd >= 0, got ({}, {})", mean, sd),
                    ));
                }
                Ok(Distribution::Normal { mean, sd })
            }
            "LNORM" => {
                table.require_field_range(row, 4, 5)?;
                let median = table.number(row, 2)?;
                let beta = table.number(row, 3)?;
                let beta_u = if row.len() == 5 {
                    table.number(row, 4)?
                } else {
                    0.0
                };
                if !(median > 0.0 && median.is_finite()) || !(beta > 0.0 && beta.is_finite()) {
                    return Err(ModelError::invalid_parameter(
                        event,
                        format!("lognormal needs median > 0 and beta > 0, got ({}, {})", median, beta),
                    ));
                }
                if !(beta_u >= 0.0 && beta_u.is_finite()) {
                    return Err(ModelError::invalid_parameter(
                        event,
                        format!("lognormal epistemic beta must be >= 0, got {}", beta_u),
                    ));
                }
                Ok(Distribution::Lognormal {
                    median,
                    beta,
                    beta_u,
                })
            }
            _ => Err(ModelError::UnknownDistribution {
                table: table.name.clone(),
                line: row.line,
                event: event.to_string(),
                tag: row.fields[1].clone(),
            }),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Distribution::Point { .. } => "PE",
            Distribution::Normal { .. } => "NORM",
            Distribution::Lognormal { .. } => "LNORM",
        }
    }

    /// Whether this form can be quantified under `mode`.
    ///
    /// Point values are constant in the intensity measure, so they are valid
    /// in both modes.
    pub fn supports(&self, mode: AnalysisMode) -> bool {
        match self {
            Distribution::Point { .. } => true,
            Distribution::Normal { .. } => mode == AnalysisMode::Risk,
            Distribution::Lognormal { .. } => mode == AnalysisMode::Fragility,
        }
    }
}

/// One realisation of a basic event's parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventDraw {
    Probability(f64),
    Fragility { median: f64, beta: f64, scale: f64 },
}

impl EventDraw {
    /// Failure probability at intensity `im`; plain probabilities ignore `im`.
    pub fn probability_at(&self, im: f64) -> f64 {
        match *self {
            EventDraw::Probability(p) => p,
            EventDraw::Fragility {
                median,
                beta,
                scale,
            } => scale * lognormal_cdf(im, median, beta),
        }
    }
}

/// A basic event's probability model.
///
/// `scale` is 1 for ordinary events; common-cause combination events share
/// their group's distribution with an alpha-factor scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicEventModel {
    pub name: String,
    pub distribution: Distribution,
    pub scale: f64,
    pub ccf_group: Option<String>,
}

impl BasicEventModel {
    pub fn new(name: impl Into<String>, distribution: Distribution) -> Self {
        Self {
            name: name.into(),
            distribution,
            scale: 1.0,
            ccf_group: None,
        }
    }

    /// The nominal parameters.
    pub fn point_draw(&self) -> EventDraw {
        match self.distribution {
            Distribution::Point { probability } => EventDraw::Probability(self.scale * probability.value()),
            Distribution::Normal { mean, .. } => {
                EventDraw::Probability(self.scale * Probability::clamped(mean).value())
            }
            Distribution::Lognormal { median, beta, .. } => EventDraw::Fragility {
                median,
                beta,
                scale: self.scale,
            },
        }
    }

    /// Resamples the uncertain parameters. Point values draw nothing.
    pub fn sample_draw<R: Rng + ?Sized>(&self, rng: &mut R) -> EventDraw {
        match self.distribution {
            Distribution::Point { .. } => self.point_draw(),
            Distribution::Normal { mean, sd } => {
                let z: f64 = rng.sample(StandardNormal);
                EventDraw::Probability(self.scale * Probability::clamped(mean + sd * z).value())
            }
            Distribution::Lognormal {
                median,
                beta,
                beta_u,
            } => {
                let z: f64 = rng.sample(StandardNormal);
                EventDraw::Fragility {
                    median: median * (beta_u * z).exp(),
                    beta,
                    scale: self.scale,
                }
            }
        }
    }

    /// The model as a probability-file row, with scaled values for
    /// common-cause combination events.
    pub fn describe(&self) -> Vec<String> {
        let mut row = vec![self.name.clone(), self.distribution.tag().to_string()];
        match self.distribution {
            Distribution::Point { probability } => {
                row.push((self.scale * probability.value()).to_string());
            }
            Distribution::Normal { mean, sd } => {
                row.push((self.scale * mean).to_string());
                row.push((self.scale * sd).to_string());
            }
            Distribution::Lognormal {
                median,
                beta,
                beta_u,
            } => {
                row.push(median.to_string());
                row.push(beta.to_string());
                if beta_u > 0.0 {
                    row.push(beta_u.to_string());
                }
                if self.scale != 1.0 {
                    row.push(format!("x{}", self.scale));
                }
            }
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parse(line: &str) -> Result<Distribution, ModelError> {
        let table = Table::parse("prob.txt", line).unwrap();
        Distribution::from_row(&table, &table.rows[0])
    }

    #[test]
    fn parses_each_form() {
        assert_eq!(parse("A,PE,3.6E-8").unwrap().tag(), "PE");
        assert_eq!(
            parse("B,norm,0.01,0.002").unwrap(),
            Distribution::Normal { mean: 0.01, sd: 0.002 }
        );
        assert_eq!(
            parse("C1,LNORM,1.88,0.5").unwrap(),
            Distribution::Lognormal {
                median: 1.88,
                beta: 0.5,
                beta_u: 0.0
            }
        );
    }

    #[test]
    fn rejects_non_positive_lognormal_parameters() {
        assert_eq!(parse("C1,LNORM,0,0.5").unwrap_err().code(), ErrorCode::InvalidParameter);
        assert_eq!(parse("C1,LNORM,1.2,-0.1").unwrap_err().code(), ErrorCode::InvalidParameter);
    }

    #[test]
    fn rejects_out_of_range_point_values_and_bad_arity() {
        assert_eq!(parse("A,PE,1.5").unwrap_err().code(), ErrorCode::InvalidParameter);
        assert_eq!(parse("A,PE,0.1,0.2").unwrap_err().code(), ErrorCode::RowArity);
        assert_eq!(parse("A,WEIBULL,1,2").unwrap_err().code(), ErrorCode::UnknownDistribution);
    }

    #[test]
    fn mode_support() {
        let lnorm = parse("C1,LNORM,1.88,0.5").unwrap();
        assert!(lnorm.supports(AnalysisMode::Fragility));
        assert!(!lnorm.supports(AnalysisMode::Risk));
        assert!(parse("A,PE,0.1").unwrap().supports(AnalysisMode::Fragility));
    }

    #[test]
    fn point_draw_applies_scale() {
        let mut model = BasicEventModel::new("A_B_G", parse("G,PE,0.001").unwrap());
        model.scale = 0.05;
        assert_eq!(model.point_draw(), EventDraw::Probability(0.05 * 0.001));
    }

    #[test]
    fn normal_samples_stay_in_unit_interval() {
        let model = BasicEventModel::new("B", parse("B,NORM,0.5,3.0").unwrap());
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = model.sample_draw(&mut rng).probability_at(0.0);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn fragility_draw_evaluates_cdf() {
        let model = BasicEventModel::new("C1", parse("C1,LNORM,1.88,0.5").unwrap());
        let draw = model.point_draw();
        assert!((draw.probability_at(1.88) - 0.5).abs() < 1e-12);
    }
}
