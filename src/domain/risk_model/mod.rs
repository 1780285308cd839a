//! Risk Model - The loaded, validated model a run quantifies.

mod model;
mod tables;

pub use model::RiskModel;
pub use tables::{CcfTables, ModelTables};
