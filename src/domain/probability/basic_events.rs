//! Probability table keyed by basic event.

use std::collections::HashMap;

use super::{BasicEventModel, Distribution};
use crate::domain::fault_tree::EventCatalog;
use crate::domain::foundation::{AnalysisMode, EventId, ModelError, Table};

/// Every probability model of a run, including common-cause combination events.
#[derive(Debug, Clone, Default)]
pub struct BasicEventTable {
    models: HashMap<EventId, BasicEventModel>,
}

impl BasicEventTable {
    /// Parses `Name,DIST,p1[,p2[,p3]]` rows.
    ///
    /// Distributions that cannot be quantified under `mode` are rejected.
    pub fn from_table(
        catalog: &mut EventCatalog,
        table: &Table,
        mode: AnalysisMode,
    ) -> Result<Self, ModelError> {
        let mut models = HashMap::with_capacity(table.rows.len());
        for row in &table.rows {
            let distribution = Distribution::from_row(table, row)?;
            if !distribution.supports(mode) {
                return Err(ModelError::invalid_parameter(
                    row.key(),
                    format!(
                        "distribution {} cannot be used in {} analysis",
                        distribution.tag(),
                        mode
                    ),
                ));
            }
            let id = catalog.intern(row.key());
            if models.contains_key(&id) {
                return Err(ModelError::duplicate(row.key(), &table.name));
            }
            models.insert(id, BasicEventModel::new(row.key(), distribution));
        }
        Ok(Self { models })
    }

    pub fn get(&self, id: EventId) -> Option<&BasicEventModel> {
        self.models.get(&id)
    }

    /// Like `get`, failing with `MissingProbability` for unknown events.
    pub fn require(&self, id: EventId, catalog: &EventCatalog) -> Result<&BasicEventModel, ModelError> {
        self.models.get(&id).ok_or_else(|| ModelError::MissingProbability {
            event: catalog.name(id).to_string(),
        })
    }

    pub fn insert(&mut self, id: EventId, model: BasicEventModel) {
        self.models.insert(id, model);
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.models.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
