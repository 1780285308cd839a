//! Raw input tables of one run.

use crate::domain::foundation::Table;

/// Common-cause input tables.
#[derive(Debug, Clone, PartialEq)]
pub struct CcfTables {
    pub list: Table,
    pub alphas: Table,
    pub detail: Option<Table>,
}

/// Every table a model is built from, as read from disk.
///
/// `fault_trees` holds the main fault-tree table followed by every table
/// reached through include rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTables {
    pub fault_trees: Vec<Table>,
    pub sequences: Table,
    pub probabilities: Table,
    pub ccf: Option<CcfTables>,
    pub hazard: Option<Table>,
}
