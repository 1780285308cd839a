//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod event_tree;

pub use event_tree::{EtaCommand, EtaError, EventTreeAnalysisHandler, ModelLoader};
