//! MOCUS - top-down minimal cut-set reduction.

use super::{CutSet, CutSetFamily, FaultTree, GateKind};
use crate::domain::foundation::EventId;

/// Derives minimal cut sets by Boolean substitution of gates.
pub struct MocusReducer;

impl MocusReducer {
    /// Computes the minimal cut sets of a single gate or basic event.
    pub fn minimal_cut_sets(tree: &FaultTree, root: EventId) -> CutSetFamily {
        Self::reduce(tree, &[root], GateKind::And)
    }

    /// Computes the minimal cut sets of `roots` combined by `combine`.
    ///
    /// # Algorithm
    /// A worklist holds partial cut sets that may still contain gates. The
    /// first gate found in a partial set is substituted: an OR gate fans the
    /// set out into one copy per child, an AND gate adds all of its children
    /// to the same set. Sets with no gates left are complete. The complete
    /// sets are then reduced by absorption.
    ///
    /// # Edge Cases
    /// - No roots: AND gives the empty family (nothing fails)
    /// - A root that is a basic event yields the single cut set `{root}`
    pub fn reduce(tree: &FaultTree, roots: &[EventId], combine: GateKind) -> CutSetFamily {
        if roots.is_empty() {
            return CutSetFamily::empty();
        }

        let mut worklist: Vec<CutSet> = match combine {
            GateKind::And => vec![roots.iter().copied().collect()],
            GateKind::Or => roots.iter().map(|r| CutSet::single(*r)).collect(),
        };
        let mut complete = Vec::new();

        while let Some(mut partial) = worklist.pop() {
            let Some(gate_id) = partial.events().find(|id| tree.is_gate(*id)) else {
                complete.push(partial);
                continue;
            };
            let Some(gate) = tree.gate(gate_id) else {
                continue;
            };
            partial.remove(gate_id);
            match gate.kind {
                GateKind::And => {
                    for child in &gate.children {
                        partial.insert(*child);
                    }
                    worklist.push(partial);
                }
                GateKind::Or => {
                    for child in &gate.children {
                        let mut branch = partial.clone();
                        branch.insert(*child);
                        worklist.push(branch);
                    }
                }
            }
        }

        CutSetFamily::minimize(complete)
    }
}
