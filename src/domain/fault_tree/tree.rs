//! Fault-tree graph loaded from gate tables.

use std::collections::{BTreeSet, HashMap};

use super::{EventCatalog, Gate, GateKind};
use crate::domain::foundation::{EventId, ModelError, Table};

/// A `TopEvent,path` row pulling another fault-tree file into the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeInclude {
    pub top_event: String,
    pub path: String,
}

impl TreeInclude {
    /// True when the path field has no extension or directory part, as in
    /// a gate row with a mistyped kind (`TOP,ADN`).
    pub fn may_be_gate_row(&self) -> bool {
        !self.path.contains(['.', '/', '\\'])
    }
}

/// Name-keyed AND/OR graph. Every name that is not a gate is a basic event.
#[derive(Debug, Clone, Default)]
pub struct FaultTree {
    gates: HashMap<EventId, Gate>,
}

impl FaultTree {
    /// Lists the include rows of a fault-tree table.
    pub fn includes(table: &Table) -> Vec<TreeInclude> {
        table
            .rows
            .iter()
            .filter(|row| is_include_row(&row.fields))
            .map(|row| TreeInclude {
                top_event: row.fields[0].clone(),
                path: row.fields[1].clone(),
            })
            .collect()
    }

    /// Builds the graph from gate tables, rejecting duplicates and cycles.
    ///
    /// Include rows are skipped here; the included tables must be passed in
    /// `tables` as well, and each included top event must be defined as a gate.
    pub fn from_tables(catalog: &mut EventCatalog, tables: &[Table]) -> Result<Self, ModelError> {
        let mut gates = HashMap::new();
        let mut include_tops = Vec::new();

        for table in tables {
            for row in &table.rows {
                if is_include_row(&row.fields) {
                    include_tops.push((row.fields[0].clone(), table.name.clone()));
                    continue;
                }
                table.require_min_fields(row, 3)?;
                let name = row.key();
                let kind =
                    GateKind::parse(&row.fields[1]).ok_or_else(|| ModelError::UnknownGateType {
                        table: table.name.clone(),
                        line: row.line,
                        gate: name.to_string(),
                        kind: row.fields[1].clone(),
                    })?;
                let id = catalog.intern(name);
                if gates.contains_key(&id) {
                    return Err(ModelError::duplicate(name, &table.name));
                }
                let children = row.fields[2..]
                    .iter()
                    .map(|child| catalog.intern(child))
                    .collect();
                gates.insert(id, Gate { kind, children });
            }
        }

        let tree = Self { gates };
        for (top, referenced_by) in include_tops {
            let defined = catalog.lookup(&top).is_some_and(|id| tree.is_gate(id));
            if !defined {
                return Err(ModelError::UnknownReference {
                    name: top,
                    referenced_by,
                });
            }
        }
        tree.check_acyclic(catalog)?;
        Ok(tree)
    }

    pub fn gate(&self, id: EventId) -> Option<&Gate> {
        self.gates.get(&id)
    }

    pub fn is_gate(&self, id: EventId) -> bool {
        self.gates.contains_key(&id)
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Collects every basic event reachable from `roots`.
    pub fn basic_events_under(&self, roots: &[EventId]) -> BTreeSet<EventId> {
        let mut found = BTreeSet::new();
        let mut seen = BTreeSet::new();
        let mut stack: Vec<EventId> = roots.to_vec();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            match self.gates.get(&id) {
                Some(gate) => stack.extend(gate.children.iter().copied()),
                None => {
                    found.insert(id);
                }
            }
        }
        found
    }

    fn check_acyclic(&self, catalog: &EventCatalog) -> Result<(), ModelError> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Active,
            Done,
        }

        let mut marks: HashMap<EventId, Mark> = HashMap::new();
        let mut roots: Vec<EventId> = self.gates.keys().copied().collect();
        roots.sort();

        for root in roots {
            if marks.contains_key(&root) {
                continue;
            }
            marks.insert(root, Mark::Active);
            let mut stack: Vec<(EventId, usize)> = vec![(root, 0)];

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                let children = self
                    .gates
                    .get(&node)
                    .map(|g| g.children.as_slice())
                    .unwrap_or(&[]);
                if next >= children.len() {
                    marks.insert(node, Mark::Done);
                    stack.pop();
                    continue;
                }
                frame.1 += 1;
                let child = children[next];
                if !self.gates.contains_key(&child) {
                    continue;
                }
                match marks.get(&child) {
                    Some(Mark::Done) => {}
                    Some(Mark::Active) => {
                        let start = stack.iter().position(|(id, _)| *id == child).unwrap_or(0);
                        let mut path: Vec<String> = stack[start..]
                            .iter()
                            .map(|(id, _)| catalog.name(*id).to_string())
                            .collect();
                        path.push(catalog.name(child).to_string());
                        return Err(ModelError::CyclicGate { path });
                    }
                    None => {
                        marks.insert(child, Mark::Active);
                        stack.push((child, 0));
                    }
                }
            }
        }
        Ok(())
    }
}

fn is_include_row(fields: &[String]) -> bool {
    fields.len() == 2 && GateKind::parse(&fields[1]).is_none()
}
