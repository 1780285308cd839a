//! Common-cause groups and alpha-factor apportionment.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::domain::fault_tree::EventCatalog;
use crate::domain::foundation::{EventId, ModelError, Table};
use crate::domain::probability::{BasicEventModel, BasicEventTable};

/// Largest group whose combinations are enumerated.
pub const MAX_GROUP_SIZE: usize = 16;

/// Alpha factors may exceed 1 in total by at most this much.
const ALPHA_SUM_TOLERANCE: f64 = 1e-9;

/// A synthetic event standing for the joint failure of some group members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CcfCombination {
    #[serde(skip)]
    pub event: EventId,
    pub name: String,
    #[serde(skip)]
    pub members: Vec<EventId>,
    /// Fraction of the group's total failure probability, `alpha_k / C(m-1, k-1)`.
    pub factor: f64,
}

impl CcfCombination {
    pub fn involves(&self, member: EventId) -> bool {
        self.members.contains(&member)
    }
}

/// Basic events that share a common cause.
#[derive(Debug, Clone, PartialEq)]
pub struct CcfGroup {
    pub name: String,
    pub members: Vec<EventId>,
    pub alphas: Vec<f64>,
    pub combinations: Vec<CcfCombination>,
}

impl CcfGroup {
    /// Combinations that fail `member`, independent term first.
    pub fn combinations_with(&self, member: EventId) -> impl Iterator<Item = &CcfCombination> + '_ {
        self.combinations.iter().filter(move |c| c.involves(member))
    }

    pub fn contains(&self, event: EventId) -> bool {
        self.members.contains(&event)
    }
}

/// Which sequences common-cause expansion applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum CcfScope {
    AllSequences,
    Listed(HashMap<String, Vec<usize>>),
}

/// All common-cause groups of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct CcfModel {
    groups: Vec<CcfGroup>,
    scope: CcfScope,
}

impl CcfModel {
    /// Builds groups from the list (`GROUP,member,...`), alpha
    /// (`GROUP,a1,...,am`) and optional detail (`Sequence,GROUP,...`) tables.
    ///
    /// Every combination event is registered in `catalog`.
    pub fn from_tables(
        catalog: &mut EventCatalog,
        list: &Table,
        alphas: &Table,
        detail: Option<&Table>,
    ) -> Result<Self, ModelError> {
        let mut memberships: HashSet<String> = HashSet::new();
        let mut declared: Vec<(String, Vec<String>)> = Vec::new();
        for row in &list.rows {
            list.require_min_fields(row, 3)?;
            let group = row.key().to_string();
            if declared.iter().any(|(name, _)| *name == group) {
                return Err(ModelError::duplicate(group, &list.name));
            }
            let members: Vec<String> = row.fields[1..].to_vec();
            if members.len() > MAX_GROUP_SIZE {
                return Err(ModelError::ccf(
                    group,
                    format!("{} members exceed the limit of {}", members.len(), MAX_GROUP_SIZE),
                ));
            }
            for member in &members {
                if !memberships.insert(member.clone()) {
                    return Err(ModelError::ccf(
                        group,
                        format!("member '{}' already belongs to another group", member),
                    ));
                }
            }
            declared.push((group, members));
        }

        let mut alpha_rows: HashMap<String, Vec<f64>> = HashMap::new();
        for row in &alphas.rows {
            alphas.require_min_fields(row, 2)?;
            let group = row.key();
            let Some((_, members)) = declared.iter().find(|(name, _)| name == group) else {
                return Err(ModelError::ccf(group, "alpha factors given for an undeclared group"));
            };
            if row.len() - 1 != members.len() {
                return Err(ModelError::ccf(
                    group,
                    format!("expected {} alpha factors, found {}", members.len(), row.len() - 1),
                ));
            }
            let values = (1..row.len())
                .map(|i| alphas.number(row, i))
                .collect::<Result<Vec<f64>, ModelError>>()?;
            if values.iter().any(|a| !(*a >= 0.0 && a.is_finite())) {
                return Err(ModelError::ccf(group, "alpha factors must be non-negative"));
            }
            if values.iter().sum::<f64>() > 1.0 + ALPHA_SUM_TOLERANCE {
                return Err(ModelError::ccf(group, "alpha factors sum above 1"));
            }
            if alpha_rows.insert(group.to_string(), values).is_some() {
                return Err(ModelError::duplicate(group, &alphas.name));
            }
        }

        let mut groups = Vec::with_capacity(declared.len());
        for (name, members) in declared {
            let alphas = alpha_rows
                .remove(&name)
                .ok_or_else(|| ModelError::ccf(&name, "no alpha factors given"))?;
            groups.push(build_group(catalog, name, &members, alphas));
        }

        let scope = match detail {
            None => CcfScope::AllSequences,
            Some(table) => {
                let mut listed = HashMap::new();
                for row in &table.rows {
                    table.require_min_fields(row, 2)?;
                    let indices = row.fields[1..]
                        .iter()
                        .map(|g| {
                            groups.iter().position(|group| group.name == *g).ok_or_else(|| {
                                ModelError::ccf(g, format!("unknown group for sequence '{}'", row.key()))
                            })
                        })
                        .collect::<Result<Vec<usize>, ModelError>>()?;
                    if listed.insert(row.key().to_string(), indices).is_some() {
                        return Err(ModelError::duplicate(row.key(), &table.name));
                    }
                }
                CcfScope::Listed(listed)
            }
        };

        Ok(Self { groups, scope })
    }

    /// Groups applied to the named sequence.
    pub fn groups_for(&self, sequence: &str) -> Vec<&CcfGroup> {
        match &self.scope {
            CcfScope::AllSequences => self.groups.iter().collect(),
            CcfScope::Listed(listed) => listed
                .get(sequence)
                .map(|indices| indices.iter().filter_map(|i| self.groups.get(*i)).collect())
                .unwrap_or_default(),
        }
    }

    /// Sequence names the detail table mentions.
    pub fn listed_sequences(&self) -> Vec<&str> {
        match &self.scope {
            CcfScope::AllSequences => Vec::new(),
            CcfScope::Listed(listed) => listed.keys().map(String::as_str).collect(),
        }
    }

    pub fn groups(&self) -> &[CcfGroup] {
        &self.groups
    }

    /// Adds a probability model for every combination event.
    ///
    /// A group's total failure probability comes from a probability row
    /// named after the group, or else from its first member's row.
    pub fn attach_probabilities(
        &self,
        catalog: &EventCatalog,
        events: &mut BasicEventTable,
    ) -> Result<(), ModelError> {
        for group in &self.groups {
            let total = catalog
                .lookup(&group.name)
                .and_then(|id| events.get(id))
                .or_else(|| group.members.first().and_then(|m| events.get(*m)))
                .map(|model| model.distribution.clone())
                .ok_or_else(|| {
                    ModelError::ccf(&group.name, "no probability for the group or its first member")
                })?;

            for combination in &group.combinations {
                let mut model = BasicEventModel::new(&combination.name, total.clone());
                model.scale = combination.factor;
                model.ccf_group = Some(group.name.clone());
                events.insert(combination.event, model);
            }
        }
        Ok(())
    }
}

fn build_group(catalog: &mut EventCatalog, name: String, members: &[String], alphas: Vec<f64>) -> CcfGroup {
    let m = members.len();
    let member_ids: Vec<EventId> = members.iter().map(|n| catalog.intern(n)).collect();

    let mut masks: Vec<u32> = (1..(1u32 << m)).collect();
    masks.sort_by_key(|mask| (mask.count_ones(), *mask));

    let combinations = masks
        .into_iter()
        .map(|mask| {
            let chosen: Vec<usize> = (0..m).filter(|i| mask & (1 << i) != 0).collect();
            let k = chosen.len();
            let mut label: Vec<&str> = chosen.iter().map(|i| members[*i].as_str()).collect();
            label.push(&name);
            let combo_name = label.join("_");
            CcfCombination {
                event: catalog.intern(&combo_name),
                name: combo_name,
                members: chosen.iter().map(|i| member_ids[*i]).collect(),
                factor: alphas[k - 1] / binomial(m - 1, k - 1),
            }
        })
        .collect();

    CcfGroup {
        name,
        members: member_ids,
        alphas,
        combinations,
    }
}

fn binomial(n: usize, k: usize) -> f64 {
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AnalysisMode, ErrorCode};

    fn build(list: &str, alphas: &str, detail: Option<&str>) -> Result<(EventCatalog, CcfModel), ModelError> {
        let mut catalog = EventCatalog::new();
        let list = Table::parse("ccf_list.txt", list)?;
        let alphas = Table::parse("ccf_alpha.txt", alphas)?;
        let detail = detail.map(|d| Table::parse("ccf_detail.txt", d)).transpose()?;
        let model = CcfModel::from_tables(&mut catalog, &list, &alphas, detail.as_ref())?;
        Ok((catalog, model))
    }

    #[test]
    fn binomial_coefficients() {
        assert_eq!(binomial(2, 1), 2.0);
        assert_eq!(binomial(3, 0), 1.0);
        assert_eq!(binomial(4, 2), 6.0);
        assert_eq!(binomial(0, 0), 1.0);
    }

    #[test]
    fn names_combinations_by_members_and_group() {
        let (_, model) = build("PUMPS,A,B,C\n", "PUMPS,0.9,0.07,0.03\n", None).unwrap();
        let names: Vec<&str> = model.groups()[0]
            .combinations
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "A_PUMPS", "B_PUMPS", "C_PUMPS", "A_B_PUMPS", "A_C_PUMPS", "B_C_PUMPS",
                "A_B_C_PUMPS"
            ]
        );
    }

    #[test]
    fn factors_follow_staggered_alpha_model() {
        let (_, model) = build("G,A,B,C\n", "G,0.9,0.06,0.04\n", None).unwrap();
        let group = &model.groups()[0];
        let factor = |name: &str| group.combinations.iter().find(|c| c.name == name).unwrap().factor;
        assert!((factor("A_G") - 0.9).abs() < 1e-15);
        assert!((factor("A_B_G") - 0.03).abs() < 1e-15);
        assert!((factor("A_B_C_G") - 0.04).abs() < 1e-15);

        for member in &group.members {
            let total: f64 = group.combinations_with(*member).map(|c| c.factor).sum();
            assert!(total <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn rejects_malformed_groups() {
        let dup = build("G,A,B\nG,C,D\n", "G,0.9,0.1\n", None).unwrap_err();
        assert_eq!(dup.code(), ErrorCode::DuplicateDefinition);

        let arity = build("G,A,B\n", "G,0.9,0.05,0.05\n", None).unwrap_err();
        assert_eq!(arity.code(), ErrorCode::UnresolvedCcfReference);

        let missing = build("G,A,B\n", "", None).unwrap_err();
        assert_eq!(missing.code(), ErrorCode::UnresolvedCcfReference);

        let unknown = build("G,A,B\n", "H,0.9,0.1\n", None).unwrap_err();
        assert_eq!(unknown.code(), ErrorCode::UnresolvedCcfReference);

        let shared = build("G,A,B\nH,B,C\n", "G,0.9,0.1\nH,0.9,0.1\n", None).unwrap_err();
        assert_eq!(shared.code(), ErrorCode::UnresolvedCcfReference);

        let excess = build("G,A,B\n", "G,0.9,0.2\n", None).unwrap_err();
        assert_eq!(excess.code(), ErrorCode::UnresolvedCcfReference);

        let detail = build("G,A,B\n", "G,0.9,0.1\n", Some("Seq1,H\n")).unwrap_err();
        assert_eq!(detail.code(), ErrorCode::UnresolvedCcfReference);
    }

    #[test]
    fn detail_table_limits_scope() {
        let (_, model) = build("G,A,B\n", "G,0.9,0.1\n", Some("Seq1,G\n")).unwrap();
        assert_eq!(model.groups_for("Seq1").len(), 1);
        assert!(model.groups_for("Seq2").is_empty());

        let (_, everywhere) = build("G,A,B\n", "G,0.9,0.1\n", None).unwrap();
        assert_eq!(everywhere.groups_for("Seq2").len(), 1);
    }

    #[test]
    fn attaches_scaled_group_probability() {
        let (mut catalog, model) = build("G,A,B\n", "G,0.95,0.05\n", None).unwrap();
        let probs = Table::parse("be.txt", "G,PE,1e-3\nA,PE,2e-3\nB,PE,2e-3\n").unwrap();
        let mut events = BasicEventTable::from_table(&mut catalog, &probs, AnalysisMode::Risk).unwrap();
        model.attach_probabilities(&catalog, &mut events).unwrap();

        let ab = events.get(catalog.lookup("A_B_G").unwrap()).unwrap();
        assert_eq!(ab.point_draw().probability_at(0.0), 0.05 * 1e-3);
        let a = events.get(catalog.lookup("A_G").unwrap()).unwrap();
        assert!((a.point_draw().probability_at(0.0) - 0.95e-3).abs() < 1e-18);
        assert_eq!(a.ccf_group.as_deref(), Some("G"));
    }
}
