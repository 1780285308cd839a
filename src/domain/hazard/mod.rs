//! Hazard Module - Hazard curves, intensity bins and fragility convolution.

mod bins;
mod curve;
mod integrator;

pub use bins::IntensityBins;
pub use curve::{HazardCurve, DEFAULT_HAZARD};
pub use integrator::{HazardIntegrator, LognormalFit};
