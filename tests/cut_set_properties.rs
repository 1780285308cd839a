//! Property tests for cut-set reduction, common-cause factors and the
//! top-event estimators.
//!
//! Random fault trees are small enough that every assignment of the basic
//! events can be enumerated, so MOCUS output is checked against the Boolean
//! function of the tree itself.

use proptest::prelude::*;
use std::collections::BTreeSet;

use pra_engine::domain::ccf::CcfModel;
use pra_engine::domain::fault_tree::{CutSet, CutSetFamily, EventCatalog, FaultTree, GateKind, MocusReducer};
use pra_engine::domain::foundation::{EventId, Table};
use pra_engine::domain::quantification::Estimators;

const BASIC_EVENTS: usize = 6;
const MAX_GATES: usize = 4;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// One generated gate: AND when the flag is set, plus raw child choices.
type GateSpec = (bool, Vec<usize>);

fn gate_specs() -> impl Strategy<Value = Vec<GateSpec>> {
    prop::collection::vec(
        (any::<bool>(), prop::collection::vec(0..BASIC_EVENTS + MAX_GATES, 2..=3)),
        1..=MAX_GATES,
    )
}

/// Renders gate specs as a fault-tree table. Child choices past the basic
/// events point at later gates only, keeping the graph acyclic.
fn tree_text(specs: &[GateSpec]) -> String {
    let mut text = String::new();
    for (i, (is_and, choices)) in specs.iter().enumerate() {
        let mut children: Vec<String> = Vec::new();
        for choice in choices {
            let child = match choice.checked_sub(BASIC_EVENTS) {
                Some(gate) if gate > i && gate < specs.len() => format!("G{}", gate),
                _ => format!("B{}", choice % BASIC_EVENTS),
            };
            if !children.contains(&child) {
                children.push(child);
            }
        }
        let kind = if *is_and { "AND" } else { "OR" };
        text.push_str(&format!("G{},{},{}\n", i, kind, children.join(",")));
    }
    text
}

fn build(specs: &[GateSpec]) -> (EventCatalog, FaultTree, EventId, Vec<EventId>) {
    let mut catalog = EventCatalog::new();
    let basics: Vec<EventId> = (0..BASIC_EVENTS).map(|i| catalog.intern(&format!("B{}", i))).collect();
    let table = Table::parse("tree", &tree_text(specs)).unwrap();
    let tree = FaultTree::from_tables(&mut catalog, &[table]).unwrap();
    let top = catalog.lookup("G0").unwrap();
    (catalog, tree, top, basics)
}

fn occurs(tree: &FaultTree, id: EventId, failed: &BTreeSet<EventId>) -> bool {
    match tree.gate(id) {
        None => failed.contains(&id),
        Some(gate) => match gate.kind {
            GateKind::And => gate.children.iter().all(|c| occurs(tree, *c, failed)),
            GateKind::Or => gate.children.iter().any(|c| occurs(tree, *c, failed)),
        },
    }
}

fn cut_set_strategy() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::btree_set(0..BASIC_EVENTS, 1..=3), 1..=6)
        .prop_map(|sets| sets.into_iter().map(|s| s.into_iter().collect()).collect())
}

/// Exact union probability by enumerating all event states.
fn brute_force(cut_sets: &[Vec<usize>], probabilities: &[f64]) -> f64 {
    let mut total = 0.0;
    for state in 0u32..(1 << probabilities.len()) {
        let failed = |e: usize| state & (1 << e) != 0;
        if cut_sets.iter().any(|cs| cs.iter().all(|e| failed(*e))) {
            total += probabilities
                .iter()
                .enumerate()
                .map(|(e, p)| if failed(e) { *p } else { 1.0 - p })
                .product::<f64>();
        }
    }
    total
}

// =============================================================================
// MOCUS
// =============================================================================

proptest! {
    #[test]
    fn mocus_cut_sets_are_minimal_implicants(specs in gate_specs()) {
        let (_, tree, top, _) = build(&specs);
        let family = MocusReducer::minimal_cut_sets(&tree, top);

        prop_assert!(family.is_minimal());
        for cut_set in family.iter() {
            let failed: BTreeSet<EventId> = cut_set.events().collect();
            prop_assert!(occurs(&tree, top, &failed));
            for dropped in cut_set.events() {
                let mut fewer = failed.clone();
                fewer.remove(&dropped);
                prop_assert!(!occurs(&tree, top, &fewer));
            }
        }
    }

    #[test]
    fn every_failing_state_contains_a_cut_set(specs in gate_specs()) {
        let (_, tree, top, basics) = build(&specs);
        let family = MocusReducer::minimal_cut_sets(&tree, top);

        for state in 0u32..(1 << BASIC_EVENTS) {
            let failed: BTreeSet<EventId> =
                basics.iter().enumerate().filter(|(i, _)| state & (1 << i) != 0).map(|(_, id)| *id).collect();
            let covered = family.iter().any(|cs| cs.events().all(|e| failed.contains(&e)));
            prop_assert_eq!(occurs(&tree, top, &failed), covered);
        }
    }

    #[test]
    fn and_gate_keeps_every_child(specs in gate_specs()) {
        let (_, tree, top, _) = build(&specs);
        let gate = tree.gate(top).unwrap();
        prop_assume!(gate.kind == GateKind::And);

        let family = MocusReducer::minimal_cut_sets(&tree, top);
        for child in &gate.children {
            let child_family = MocusReducer::minimal_cut_sets(&tree, *child);
            for cut_set in family.iter() {
                prop_assert!(child_family.iter().any(|c| c.is_subset_of(cut_set)));
            }
        }
    }

    #[test]
    fn minimize_is_idempotent(sets in cut_set_strategy()) {
        let mut catalog = EventCatalog::new();
        let ids: Vec<EventId> = (0..BASIC_EVENTS).map(|i| catalog.intern(&format!("B{}", i))).collect();
        let cut_sets: Vec<CutSet> = sets.iter().map(|s| s.iter().map(|e| ids[*e]).collect()).collect();

        let once = CutSetFamily::minimize(cut_sets);
        let twice = CutSetFamily::minimize(once.iter().cloned());
        prop_assert!(once.is_minimal());
        prop_assert_eq!(once, twice);
    }
}

// =============================================================================
// Common-cause factors
// =============================================================================

proptest! {
    #[test]
    fn member_factors_sum_to_alpha_total(
        weights in prop::collection::vec(0.01f64..1.0, 2..=4),
        scale in 0.5f64..=1.0,
    ) {
        let total: f64 = weights.iter().sum();
        let alphas: Vec<String> = weights.iter().map(|w| (w / total * scale).to_string()).collect();
        let members: Vec<String> = (0..weights.len()).map(|i| format!("M{}", i)).collect();

        let list = Table::parse("ccf", &format!("G,{}\n", members.join(","))).unwrap();
        let alpha_table = Table::parse("alphas", &format!("G,{}\n", alphas.join(","))).unwrap();
        let mut catalog = EventCatalog::new();
        let model = CcfModel::from_tables(&mut catalog, &list, &alpha_table, None).unwrap();
        let group = &model.groups()[0];

        prop_assert_eq!(group.combinations.len(), (1 << weights.len()) - 1);
        for member in &group.members {
            let sum: f64 = group.combinations_with(*member).map(|c| c.factor).sum();
            prop_assert!(sum <= 1.0 + 1e-9);
            prop_assert!((sum - scale).abs() < 1e-9);
        }
    }
}

// =============================================================================
// Estimators
// =============================================================================

proptest! {
    #[test]
    fn estimators_are_ordered(
        cut_sets in cut_set_strategy(),
        probabilities in prop::collection::vec(0.0f64..0.5, BASIC_EVENTS),
    ) {
        let triple = Estimators::estimate(&cut_sets, &probabilities);
        prop_assert!(triple.min_max <= triple.upper_bound + 1e-12);
        prop_assert!(triple.upper_bound <= triple.rare_event + 1e-12);
    }

    #[test]
    fn min_max_is_exact(
        cut_sets in cut_set_strategy(),
        probabilities in prop::collection::vec(0.0f64..1.0, BASIC_EVENTS),
    ) {
        let exact = brute_force(&cut_sets, &probabilities);
        prop_assert!((Estimators::min_max(&cut_sets, &probabilities) - exact).abs() < 1e-9);
    }
}
