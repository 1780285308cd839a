//! CCF Module - Common-cause failure groups and cut-set expansion.
//!
//! Groups are apportioned with the alpha-factor model: the combination
//! failing `k` of `m` members gets `alpha_k / C(m-1, k-1)` of the group's
//! total failure probability.

mod expander;
mod group;

pub use expander::CcfExpander;
pub use group::{CcfCombination, CcfGroup, CcfModel, CcfScope, MAX_GROUP_SIZE};
