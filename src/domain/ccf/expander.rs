//! Rewrites cut sets over common-cause group members.

use std::collections::{BTreeSet, HashMap};

use super::CcfGroup;
use crate::domain::fault_tree::{CutSet, CutSetFamily};
use crate::domain::foundation::EventId;

/// Replaces group members by their independent and common-cause terms.
pub struct CcfExpander;

impl CcfExpander {
    /// Expands a minimal cut-set family over the given groups.
    ///
    /// Each member literal becomes the OR of every combination event that
    /// fails it. Re-minimising the result makes a cut set holding k members
    /// of one group collapse into one combination term per joint failure,
    /// rather than k independent literals.
    ///
    /// # Edge Cases
    /// - No groups: the family is returned unchanged
    /// - Cut sets without members pass through unchanged
    pub fn expand(family: &CutSetFamily, groups: &[&CcfGroup]) -> CutSetFamily {
        if groups.is_empty() {
            return family.clone();
        }

        let substitutes: HashMap<EventId, CutSetFamily> = groups
            .iter()
            .flat_map(|group| {
                group.members.iter().map(move |member| {
                    let terms = group.combinations_with(*member).map(|c| CutSet::single(c.event));
                    (*member, CutSetFamily::minimize(terms))
                })
            })
            .collect();

        let mut expanded = Vec::new();
        for cut_set in family {
            let mut product = CutSetFamily::unit();
            for event in cut_set.events() {
                product = match substitutes.get(&event) {
                    Some(terms) => product.and(terms),
                    None => product.and(&CutSetFamily::minimize([CutSet::single(event)])),
                };
            }
            expanded.extend(product.iter().cloned());
        }
        CutSetFamily::minimize(expanded)
    }

    /// Maps a set of basic events through the same substitution.
    pub fn substitute_events(events: &BTreeSet<EventId>, groups: &[&CcfGroup]) -> BTreeSet<EventId> {
        let mut substituted = BTreeSet::new();
        for event in events {
            match groups.iter().find(|g| g.contains(*event)) {
                Some(group) => substituted.extend(group.combinations_with(*event).map(|c| c.event)),
                None => {
                    substituted.insert(*event);
                }
            }
        }
        substituted
    }
}
