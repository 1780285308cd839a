//! Probability value object (0-1 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A probability between 0 and 1 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    /// Impossible event.
    pub const ZERO: Self = Self(0.0);

    /// Certain event.
    pub const ONE: Self = Self(1.0);

    /// Creates a new Probability, clamping to the unit interval.
    ///
    /// NaN clamps to zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a Probability, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("probability", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Probability {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
