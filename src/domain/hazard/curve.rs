//! Seismic hazard curves.

use serde::Serialize;

use crate::domain::foundation::{ModelError, Table};

/// Curve used when a fragility run names no hazard file.
pub const DEFAULT_HAZARD: [(f64, f64); 6] = [
    (0.0608, 1e-2),
    (0.2124, 1e-3),
    (0.4, 1e-4),
    (0.629, 1e-5),
    (0.9344, 1e-6),
    (1.3055, 1e-7),
];

/// Intensity measure against annual exceedance frequency.
///
/// IM strictly increases and frequency never increases along the curve.
/// Both are positive so the curve can be interpolated in log-log space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardCurve {
    points: Vec<(f64, f64)>,
}

impl HazardCurve {
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self, String> {
        if points.len() < 2 {
            return Err("a hazard curve needs at least two points".to_string());
        }
        for (im, freq) in &points {
            if !(*im > 0.0 && im.is_finite() && *freq > 0.0 && freq.is_finite()) {
                return Err(format!(
                    "hazard point ({}, {}) must have positive IM and frequency",
                    im, freq
                ));
            }
        }
        for pair in points.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err("hazard IM values must strictly increase".to_string());
            }
            if pair[1].1 > pair[0].1 {
                return Err("hazard frequencies must not increase with IM".to_string());
            }
        }
        Ok(Self { points })
    }

    /// Parses `IM,AnnualFrequency` rows.
    pub fn from_table(table: &Table) -> Result<Self, ModelError> {
        let mut points = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            table.require_field_range(row, 2, 2)?;
            points.push((table.number(row, 0)?, table.number(row, 1)?));
        }
        Self::new(points).map_err(|reason| ModelError::MalformedTable {
            table: table.name.clone(),
            reason,
        })
    }

    pub fn default_curve() -> Self {
        Self {
            points: DEFAULT_HAZARD.to_vec(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Annual frequency of exceeding `im`.
    ///
    /// Interpolates linearly in log10-log10 space and extrapolates the end
    /// segments beyond the tabulated range.
    pub fn exceedance(&self, im: f64) -> f64 {
        let last = self.points.len() - 1;
        let segment = self
            .points
            .windows(2)
            .position(|pair| im <= pair[1].0)
            .unwrap_or(last - 1);
        let (x0, y0) = self.points[segment];
        let (x1, y1) = self.points[segment + 1];

        let (lx0, lx1, ly0, ly1) = (x0.log10(), x1.log10(), y0.log10(), y1.log10());
        let slope = (ly1 - ly0) / (lx1 - lx0);
        10f64.powf(ly0 + (im.log10() - lx0) * slope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-9
    }

    #[test]
    fn interpolation_hits_tabulated_points() {
        let curve = HazardCurve::default_curve();
        for (im, freq) in DEFAULT_HAZARD {
            assert!(rel_close(curve.exceedance(im), freq));
        }
    }

    #[test]
    fn interpolation_is_log_log_linear() {
        let curve = HazardCurve::new(vec![(0.1, 1e-2), (1.0, 1e-4)]).unwrap();
        assert!(rel_close(curve.exceedance(10f64.powf(-0.5)), 1e-3));
    }

    #[test]
    fn extrapolates_beyond_both_ends() {
        let curve = HazardCurve::new(vec![(0.1, 1e-2), (1.0, 1e-4)]).unwrap();
        assert!(rel_close(curve.exceedance(10.0), 1e-6));
        assert!(rel_close(curve.exceedance(0.01), 1.0));
    }

    #[test]
    fn rejects_bad_curves() {
        assert!(HazardCurve::new(vec![(0.1, 1e-2)]).is_err());
        assert!(HazardCurve::new(vec![(0.1, 1e-2), (0.1, 1e-3)]).is_err());
        assert!(HazardCurve::new(vec![(0.1, 1e-3), (0.2, 1e-2)]).is_err());
        assert!(HazardCurve::new(vec![(0.0, 1e-2), (0.2, 1e-3)]).is_err());
    }

    #[test]
    fn from_table_checks_arity() {
        let table = Table::parse("hazard.txt", "0.1,1e-2,5\n1.0,1e-4\n").unwrap();
        assert!(HazardCurve::from_table(&table).is_err());
        let table = Table::parse("hazard.txt", "0.1,1e-2\n1.0,1e-4\n").unwrap();
        assert_eq!(HazardCurve::from_table(&table).unwrap().points().len(), 2);
    }
}
