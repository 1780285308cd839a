//! Validated risk model.

use std::collections::BTreeSet;

use super::ModelTables;
use crate::domain::ccf::{CcfExpander, CcfGroup, CcfModel};
use crate::domain::fault_tree::{EventCatalog, FaultTree, Sequence, SequenceResolver};
use crate::domain::foundation::{AnalysisMode, ModelError};
use crate::domain::hazard::HazardCurve;
use crate::domain::probability::BasicEventTable;
use crate::domain::quantification::{QuantificationSettings, Quantifier, SequenceInput, SequenceResult};

/// Fault trees, sequences, probability models, common-cause groups and
/// hazard of one run, cross-checked against each other.
#[derive(Debug, Clone)]
pub struct RiskModel {
    catalog: EventCatalog,
    tree: FaultTree,
    sequences: Vec<Sequence>,
    basic_events: BasicEventTable,
    ccf: Option<CcfModel>,
    hazard: Option<HazardCurve>,
}

impl RiskModel {
    /// Builds the model from raw tables.
    ///
    /// # Errors
    ///
    /// Any malformed row, unknown gate type, cycle, duplicate name or
    /// unresolved reference between tables.
    pub fn from_tables(tables: &ModelTables, mode: AnalysisMode) -> Result<Self, ModelError> {
        let mut catalog = EventCatalog::new();
        let tree = FaultTree::from_tables(&mut catalog, &tables.fault_trees)?;
        let mut sequences = Sequence::from_table(&mut catalog, &tables.sequences)?;
        sequences.sort_by(|a, b| a.name.cmp(&b.name));
        let mut basic_events = BasicEventTable::from_table(&mut catalog, &tables.probabilities, mode)?;

        for sequence in &sequences {
            for reference in sequence.references() {
                if !tree.is_gate(reference) && !basic_events.contains(reference) {
                    return Err(ModelError::UnknownReference {
                        name: catalog.name(reference).to_string(),
                        referenced_by: sequence.name.clone(),
                    });
                }
            }
        }

        let ccf = match &tables.ccf {
            Some(ccf_tables) => {
                let model = CcfModel::from_tables(
                    &mut catalog,
                    &ccf_tables.list,
                    &ccf_tables.alphas,
                    ccf_tables.detail.as_ref(),
                )?;
                for group in model.groups() {
                    if let Some(gate) = group.members.iter().find(|m| tree.is_gate(**m)) {
                        return Err(ModelError::ccf(
                            &group.name,
                            format!("member '{}' is a gate, not a basic event", catalog.name(*gate)),
                        ));
                    }
                }
                for key in model.listed_sequences() {
                    let known = sequences.iter().any(|s| s.name == key)
                        || catalog.lookup(key).is_some_and(|id| tree.is_gate(id));
                    if !known {
                        let table = ccf_tables
                            .detail
                            .as_ref()
                            .map(|t| t.name.clone())
                            .unwrap_or_default();
                        return Err(ModelError::UnknownReference {
                            name: key.to_string(),
                            referenced_by: table,
                        });
                    }
                }
                model.attach_probabilities(&catalog, &mut basic_events)?;
                Some(model)
            }
            None => None,
        };

        let hazard = match &tables.hazard {
            Some(table) if mode == AnalysisMode::Fragility => Some(HazardCurve::from_table(table)?),
            Some(table) => {
                tracing::warn!(table = %table.name, "Hazard curve ignored outside FRAGILITY analysis");
                None
            }
            None => None,
        };

        tracing::debug!(
            gates = tree.gate_count(),
            sequences = sequences.len(),
            basic_events = basic_events.len(),
            ccf_groups = ccf.as_ref().map_or(0, |m| m.groups().len()),
            "Risk model loaded"
        );

        Ok(Self {
            catalog,
            tree,
            sequences,
            basic_events,
            ccf,
            hazard,
        })
    }

    /// Sequences in name order.
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn hazard(&self) -> Option<&HazardCurve> {
        self.hazard.as_ref()
    }

    /// Common-cause groups applied to a sequence: those listed for the
    /// sequence itself and for any top event it references.
    pub fn ccf_groups_for(&self, sequence: &Sequence) -> Vec<&CcfGroup> {
        let Some(model) = &self.ccf else {
            return Vec::new();
        };
        let mut groups: Vec<&CcfGroup> = model.groups_for(&sequence.name);
        for top in sequence.references() {
            for group in model.groups_for(self.catalog.name(top)) {
                if !groups.iter().any(|g| g.name == group.name) {
                    groups.push(group);
                }
            }
        }
        groups
    }

    /// Resolves, expands and quantifies one sequence.
    pub fn quantify(
        &self,
        sequence: &Sequence,
        settings: &QuantificationSettings,
    ) -> Result<SequenceResult, ModelError> {
        let groups = self.ccf_groups_for(sequence);
        let resolved = SequenceResolver::resolve(&self.tree, sequence);
        let cut_sets = CcfExpander::expand(&resolved, &groups);

        let roots: Vec<_> = sequence.references().collect();
        let reachable: BTreeSet<_> = self.tree.basic_events_under(&roots);
        let events = CcfExpander::substitute_events(&reachable, &groups)
            .into_iter()
            .map(|id| self.basic_events.require(id, &self.catalog).map(|model| (id, model)))
            .collect::<Result<Vec<_>, ModelError>>()?;

        let input = SequenceInput {
            name: &sequence.name,
            cut_sets: &cut_sets,
            events,
            catalog: &self.catalog,
            logic: SequenceResolver::logic_rows(&sequence.name, &cut_sets, &self.catalog),
            hazard: self.hazard.as_ref(),
        };
        Quantifier::quantify(input, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Table;
    use crate::domain::risk_model::CcfTables;

    fn table(name: &str, text: &str) -> Table {
        Table::parse(name, text).unwrap()
    }

    fn e1_tables() -> ModelTables {
        ModelTables {
            fault_trees: vec![table("tree", "TOP,AND,D,G1\nG1,OR,E,F\n")],
            sequences: table("seq", "Seq1,TOP\n"),
            probabilities: table("prob", "D,PE,3.6e-8\nE,PE,7.5e-5\nF,PE,5.4e-4\n"),
            ccf: None,
            hazard: None,
        }
    }

    #[test]
    fn quantifies_e1_sequence() {
        let model = RiskModel::from_tables(&e1_tables(), AnalysisMode::Risk).unwrap();
        let seq = &model.sequences()[0];
        let result = model.quantify(seq, &QuantificationSettings::default()).unwrap();
        assert_eq!(result.cut_sets.len(), 2);
        assert_eq!(result.logic[0], ["Seq1", "OR", "Seq1_Gate1", "Seq1_Gate2"]);
        assert!((result.fta.rare_event.point - 2.214e-11).abs() < 1e-20);
    }

    #[test]
    fn unknown_sequence_reference_is_rejected() {
        let mut tables = e1_tables();
        tables.sequences = table("seq", "Seq1,TOP,_NOPE\n");
        let err = RiskModel::from_tables(&tables, AnalysisMode::Risk).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownReference {
                name: "NOPE".to_string(),
                referenced_by: "Seq1".to_string()
            }
        );
    }

    #[test]
    fn missing_probability_surfaces_at_quantification() {
        let mut tables = e1_tables();
        tables.probabilities = table("prob", "D,PE,3.6e-8\nE,PE,7.5e-5\n");
        let model = RiskModel::from_tables(&tables, AnalysisMode::Risk).unwrap();
        let err = model
            .quantify(&model.sequences()[0], &QuantificationSettings::default())
            .unwrap_err();
        assert_eq!(err, ModelError::MissingProbability { event: "F".to_string() });
    }

    #[test]
    fn ccf_member_must_not_be_a_gate() {
        let mut tables = e1_tables();
        tables.ccf = Some(CcfTables {
            list: table("ccf", "G,D,G1\n"),
            alphas: table("alpha", "G,0.9,0.1\n"),
            detail: None,
        });
        let err = RiskModel::from_tables(&tables, AnalysisMode::Risk).unwrap_err();
        assert!(matches!(err, ModelError::UnresolvedCcfReference { .. }));
    }

    #[test]
    fn detail_table_scopes_groups() {
        let mut tables = ModelTables {
            fault_trees: vec![table("tree", "TOP,AND,A,B\n")],
            sequences: table("seq", "S1,TOP\nS2,TOP\n"),
            probabilities: table("prob", "A,PE,1e-3\nB,PE,1e-3\n"),
            ccf: Some(CcfTables {
                list: table("ccf", "G,A,B\n"),
                alphas: table("alpha", "G,0.95,0.05\n"),
                detail: Some(table("detail", "S1,G\n")),
            }),
            hazard: None,
        };
        let model = RiskModel::from_tables(&tables, AnalysisMode::Risk).unwrap();
        assert_eq!(model.ccf_groups_for(&model.sequences()[0]).len(), 1);
        assert!(model.ccf_groups_for(&model.sequences()[1]).is_empty());

        let expanded = model
            .quantify(&model.sequences()[0], &QuantificationSettings::default())
            .unwrap();
        assert_eq!(expanded.cut_sets.len(), 2);
        assert!((expanded.fta.rare_event.point - 5.09025e-5).abs() < 1e-15);

        if let Some(ccf) = tables.ccf.as_mut() {
            ccf.detail = Some(table("detail", "S9,G\n"));
        }
        assert!(matches!(
            RiskModel::from_tables(&tables, AnalysisMode::Risk),
            Err(ModelError::UnknownReference { .. })
        ));
    }

    #[test]
    fn lognormal_rejected_in_risk_mode() {
        let mut tables = e1_tables();
        tables.probabilities = table("prob", "D,LNORM,0.5,0.4\nE,PE,7.5e-5\nF,PE,5.4e-4\n");
        assert!(matches!(
            RiskModel::from_tables(&tables, AnalysisMode::Risk),
            Err(ModelError::InvalidParameter { .. })
        ));
        assert!(RiskModel::from_tables(&tables, AnalysisMode::Fragility).is_ok());
    }

    #[test]
    fn success_only_sequence_quantifies_to_zero() {
        let mut tables = e1_tables();
        tables.sequences = table("seq", "Seq1,_TOP\n");
        let model = RiskModel::from_tables(&tables, AnalysisMode::Risk).unwrap();
        let result = model
            .quantify(&model.sequences()[0], &QuantificationSettings::default())
            .unwrap();

        assert!(result.cut_sets.is_empty());
        assert!(result.logic.is_empty());
        assert_eq!(result.fta.min_max.point, 0.0);
        assert_eq!(result.fta.upper_bound.point, 0.0);
        assert_eq!(result.fta.rare_event.point, 0.0);
        assert!(result.importance.iter().all(|e| e.occurrences == 0 && e.bi.point == 0.0));
    }

    #[test]
    fn detail_row_for_top_event_scopes_groups() {
        let tables = ModelTables {
            fault_trees: vec![table("tree", "PUMPS,AND,A,B\nVALVES,OR,C,D\n")],
            sequences: table("seq", "S1,PUMPS\nS2,VALVES\n"),
            probabilities: table("prob", "A,PE,1e-3\nB,PE,1e-3\nC,PE,1e-2\nD,PE,1e-2\n"),
            ccf: Some(CcfTables {
                list: table("ccf", "G,A,B\n"),
                alphas: table("alpha", "G,0.95,0.05\n"),
                detail: Some(table("detail", "PUMPS,G\n")),
            }),
            hazard: None,
        };
        let model = RiskModel::from_tables(&tables, AnalysisMode::Risk).unwrap();
        let (s1, s2) = (&model.sequences()[0], &model.sequences()[1]);

        let groups: Vec<&str> = model.ccf_groups_for(s1).iter().map(|g| g.name.as_str()).collect();
        assert_eq!(groups, ["G"]);
        assert!(model.ccf_groups_for(s2).is_empty());

        let expanded = model.quantify(s1, &QuantificationSettings::default()).unwrap();
        let names: Vec<&str> = expanded.importance.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A_B_G", "A_G", "B_G"]);
        assert!((expanded.fta.rare_event.point - 5.09025e-5).abs() < 1e-15);
    }
}
