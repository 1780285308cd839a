//! Fault Tree Module - Gate graphs, cut sets and event-tree sequences.
//!
//! # Components
//!
//! - `EventCatalog` - Name to dense `EventId` table, built once per model
//! - `FaultTree` - AND/OR gate graph with cycle detection at load
//! - `CutSetFamily` - Minimal cut-set collections with absorption
//! - `MocusReducer` - Top-down substitution to minimal cut sets
//! - `SequenceResolver` - Failure/success branch handling for sequences

mod catalog;
mod cut_set;
mod gate;
mod mocus;
mod sequence;
mod tree;

pub use catalog::EventCatalog;
pub use cut_set::{CutSet, CutSetFamily};
pub use gate::{Gate, GateKind};
pub use mocus::MocusReducer;
pub use sequence::{Branch, Sequence, SequenceResolver, SUCCESS_PREFIX};
pub use tree::{FaultTree, TreeInclude};
