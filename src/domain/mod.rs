//! Domain layer containing the risk-model types and quantification logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, probabilities, tables, errors)
//! - `fault_tree` - Gate graphs, MOCUS reduction and event-tree sequences
//! - `ccf` - Common-cause failure groups and alpha-factor expansion
//! - `probability` - Basic-event distributions and seeded sampling
//! - `hazard` - Hazard curves, intensity bins and fragility convolution
//! - `quantification` - Estimators, importance measures and sequence results
//! - `risk_model` - The validated model assembled from input tables

pub mod ccf;
pub mod fault_tree;
pub mod foundation;
pub mod hazard;
pub mod probability;
pub mod quantification;
pub mod risk_model;
