//! Event-tree sequences and their resolution into cut sets.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{CutSet, CutSetFamily, EventCatalog, FaultTree, GateKind, MocusReducer};
use crate::domain::foundation::{EventId, ModelError, Table};

/// Marker prefix for a success branch in a sequence row.
pub const SUCCESS_PREFIX: char = '_';

/// Which side of an event-tree branch point a sequence takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Failure,
    Success,
}

/// A named event-tree path through top events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub name: String,
    pub failures: Vec<EventId>,
    pub successes: Vec<EventId>,
}

impl Sequence {
    /// Parses `SeqName,Event,_Event,...` rows.
    pub fn from_table(catalog: &mut EventCatalog, table: &Table) -> Result<Vec<Sequence>, ModelError> {
        let mut seen = HashSet::new();
        let mut sequences = Vec::with_capacity(table.rows.len());

        for row in &table.rows {
            table.require_min_fields(row, 2)?;
            let name = row.key().to_string();
            if !seen.insert(name.clone()) {
                return Err(ModelError::duplicate(name, &table.name));
            }

            let mut failures = Vec::new();
            let mut successes = Vec::new();
            for field in &row.fields[1..] {
                match field.strip_prefix(SUCCESS_PREFIX) {
                    Some(event) if !event.is_empty() => successes.push(catalog.intern(event)),
                    _ => failures.push(catalog.intern(field)),
                }
            }
            sequences.push(Sequence {
                name,
                failures,
                successes,
            });
        }
        Ok(sequences)
    }

    /// Top events on the given side of the sequence.
    pub fn branch(&self, branch: Branch) -> &[EventId] {
        match branch {
            Branch::Failure => &self.failures,
            Branch::Success => &self.successes,
        }
    }

    /// Every top event the sequence references.
    pub fn references(&self) -> impl Iterator<Item = EventId> + '_ {
        self.failures.iter().chain(self.successes.iter()).copied()
    }
}

/// Turns sequences into cut-set families and echoed logic rows.
pub struct SequenceResolver;

impl SequenceResolver {
    /// Cut sets relevant to one side of a sequence.
    ///
    /// Failed top events must all occur, so they are combined by AND.
    /// A success branch is lost if any of its top events occurs, so those
    /// are combined by OR.
    pub fn branch_cut_sets(tree: &FaultTree, sequence: &Sequence, branch: Branch) -> CutSetFamily {
        let combine = match branch {
            Branch::Failure => GateKind::And,
            Branch::Success => GateKind::Or,
        };
        MocusReducer::reduce(tree, sequence.branch(branch), combine)
    }

    /// Minimal cut sets of the sequence.
    ///
    /// Failure cut sets that contain a success-branch cut set describe
    /// scenarios where a success branch also failed; they are dropped.
    pub fn resolve(tree: &FaultTree, sequence: &Sequence) -> CutSetFamily {
        let failed = Self::branch_cut_sets(tree, sequence, Branch::Failure);
        if sequence.successes.is_empty() {
            return failed;
        }
        let success = Self::branch_cut_sets(tree, sequence, Branch::Success);
        failed.without_supersets_of(&success)
    }

    /// Writes a cut-set family back as gate rows rooted at `name`.
    ///
    /// A single cut set becomes one gate. Several become an OR whose inputs
    /// are the single-event cut sets themselves plus one `<name>_Gate<n>` AND
    /// gate per larger cut set. Cut sets are ordered by their sorted names.
    pub fn logic_rows(name: &str, family: &CutSetFamily, catalog: &EventCatalog) -> Vec<Vec<String>> {
        let mut sets: Vec<Vec<String>> = family
            .iter()
            .map(|cs: &CutSet| {
                let mut names: Vec<String> = cs.events().map(|id| catalog.name(id).to_string()).collect();
                names.sort();
                names
            })
            .collect();
        sets.sort();

        match sets.as_slice() {
            [] => Vec::new(),
            [only] => {
                let kind = if only.len() == 1 { GateKind::Or } else { GateKind::And };
                let mut row = vec![name.to_string(), kind.to_string()];
                row.extend(only.iter().cloned());
                vec![row]
            }
            many => {
                let mut top = vec![name.to_string(), GateKind::Or.to_string()];
                let mut rows = Vec::with_capacity(many.len() + 1);
                for events in many {
                    if let [single] = events.as_slice() {
                        top.push(single.clone());
                        continue;
                    }
                    let gate = format!("{}_Gate{}", name, rows.len() + 1);
                    top.push(gate.clone());
                    let mut row = vec![gate, GateKind::And.to_string()];
                    row.extend(events.iter().cloned());
                    rows.push(row);
                }
                rows.insert(0, top);
                rows
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Model {
        catalog: EventCatalog,
        tree: FaultTree,
        sequences: Vec<Sequence>,
    }

    fn model(tree: &str, sequences: &str) -> Model {
        let mut catalog = EventCatalog::new();
        let tree = FaultTree::from_tables(&mut catalog, &[Table::parse("tree.txt", tree).unwrap()]).unwrap();
        let sequences =
            Sequence::from_table(&mut catalog, &Table::parse("seq.txt", sequences).unwrap()).unwrap();
        Model {
            catalog,
            tree,
            sequences,
        }
    }

    #[test]
    fn parses_success_prefix() {
        let m = model("TE1,OR,A,B\nTE2,OR,C\n", "Seq1,TE1,_TE2\n");
        let seq = &m.sequences[0];
        assert_eq!(seq.failures, vec![m.catalog.lookup("TE1").unwrap()]);
        assert_eq!(seq.successes, vec![m.catalog.lookup("TE2").unwrap()]);
    }

    #[test]
    fn rejects_duplicate_sequences_and_empty_rows() {
        let mut catalog = EventCatalog::new();
        let dup = Table::parse("seq.txt", "Seq1,TE1\nSeq1,TE2\n").unwrap();
        assert!(Sequence::from_table(&mut catalog, &dup).is_err());
        let short = Table::parse("seq.txt", "Seq1\n").unwrap();
        assert!(Sequence::from_table(&mut catalog, &short).is_err());
    }

    #[test]
    fn failures_combine_by_and() {
        let m = model("TE1,OR,A,B\nTE2,OR,C\n", "Seq1,TE1,TE2\n");
        let family = SequenceResolver::branch_cut_sets(&m.tree, &m.sequences[0], Branch::Failure);
        assert_eq!(family.len(), 2);
        assert!(family.iter().all(|cs| cs.len() == 2));
    }

    #[test]
    fn success_branch_prunes_failure_cut_sets() {
        // Seq fails TE1 = A*B + C and succeeds TE2 = B
        let m = model("TE1,OR,G1,C\nG1,AND,A,B\nTE2,OR,B\n", "Seq1,TE1,_TE2\n");
        let family = SequenceResolver::resolve(&m.tree, &m.sequences[0]);
        assert_eq!(family.len(), 1);
        let only = family.iter().next().unwrap();
        assert!(only.contains(m.catalog.lookup("C").unwrap()));
    }

    #[test]
    fn logic_rows_follow_gate_layout() {
        let m = model("TOP,AND,D,G1\nG1,OR,E,F\n", "Seq1,TOP\n");
        let family = SequenceResolver::resolve(&m.tree, &m.sequences[0]);
        let rows = SequenceResolver::logic_rows("Seq1", &family, &m.catalog);
        assert_eq!(
            rows,
            vec![
                vec!["Seq1", "OR", "Seq1_Gate1", "Seq1_Gate2"],
                vec!["Seq1_Gate1", "AND", "D", "E"],
                vec!["Seq1_Gate2", "AND", "D", "F"],
            ]
        );
    }

    #[test]
    fn logic_rows_for_single_cut_set() {
        let m = model("TOP,OR,A\nTWO,AND,A,B\n", "S1,TOP\nS2,TWO\n");
        let one = SequenceResolver::resolve(&m.tree, &m.sequences[0]);
        assert_eq!(
            SequenceResolver::logic_rows("S1", &one, &m.catalog),
            vec![vec!["S1", "OR", "A"]]
        );
        let two = SequenceResolver::resolve(&m.tree, &m.sequences[1]);
        assert_eq!(
            SequenceResolver::logic_rows("S2", &two, &m.catalog),
            vec![vec!["S2", "AND", "A", "B"]]
        );
    }

    #[test]
    fn logic_rows_inline_single_event_cut_sets() {
        let m = model("TOP,OR,G1,A\nG1,AND,C,B\n", "S,TOP\n");
        let family = SequenceResolver::resolve(&m.tree, &m.sequences[0]);
        assert_eq!(
            SequenceResolver::logic_rows("S", &family, &m.catalog),
            vec![vec!["S", "OR", "A", "S_Gate1"], vec!["S_Gate1", "AND", "B", "C"]]
        );
    }

    #[test]
    fn logic_rows_order_cut_sets_by_name() {
        // Z is interned before A, B and C
        let m = model("TOP,OR,Z,G1,G2\nG1,AND,C,B\nG2,AND,A,C\n", "S,TOP\n");
        let family = SequenceResolver::resolve(&m.tree, &m.sequences[0]);
        assert_eq!(
            SequenceResolver::logic_rows("S", &family, &m.catalog),
            vec![
                vec!["S", "OR", "S_Gate1", "S_Gate2", "Z"],
                vec!["S_Gate1", "AND", "A", "C"],
                vec!["S_Gate2", "AND", "B", "C"],
            ]
        );
    }

    #[test]
    fn success_only_sequence_has_no_cut_sets() {
        let m = model("TE,OR,A,B\n", "S,_TE\n");
        let family = SequenceResolver::resolve(&m.tree, &m.sequences[0]);
        assert!(family.is_empty());
        assert!(SequenceResolver::logic_rows("S", &family, &m.catalog).is_empty());
    }
}
