//! Probability Module - Basic-event probability models and sampling.
//!
//! - `Distribution` - point value, clipped normal, or lognormal fragility
//! - `BasicEventTable` - models keyed by `EventId`
//! - `ParameterSampler` - seeded resampling for uncertainty runs

mod basic_events;
mod distribution;
mod normal;
mod sampling;

pub use basic_events::BasicEventTable;
pub use distribution::{BasicEventModel, Distribution, EventDraw};
pub use normal::{lognormal_cdf, standard_normal_cdf};
pub use sampling::ParameterSampler;
