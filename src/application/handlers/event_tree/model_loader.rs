//! ModelLoader - Reads every input table of a run through the TableReader port.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use super::{EtaCommand, EtaError};
use crate::domain::fault_tree::FaultTree;
use crate::domain::foundation::{ModelError, Table};
use crate::domain::risk_model::{CcfTables, ModelTables};
use crate::ports::{TableReadError, TableReader};

/// Loads the raw tables named by an [`EtaCommand`].
pub struct ModelLoader {
    reader: Arc<dyn TableReader>,
}

impl ModelLoader {
    pub fn new(reader: Arc<dyn TableReader>) -> Self {
        Self { reader }
    }

    /// Reads all tables and follows fault-tree include rows.
    ///
    /// Included files are read before any error is reported, and unreadable
    /// files are reported before malformed ones, so a run with a missing
    /// file fails with a file error whatever else is wrong. Includes of a
    /// tree file that cannot be read or parsed are not followed.
    /// Include paths are relative to the including file.
    pub async fn load(&self, cmd: &EtaCommand) -> Result<ModelTables, EtaError> {
        let required = [
            ("fault tree", &cmd.fault_tree_path),
            ("sequence", &cmd.sequence_path),
            ("probability", &cmd.probability_path),
        ];
        for (label, path) in required {
            if path.as_os_str().is_empty() {
                return Err(EtaError::file(path, format!("no {} file given", label)));
            }
        }

        let ccf_paths = match (&cmd.ccf_list_path, &cmd.ccf_alpha_path) {
            (Some(list), Some(alphas)) => Some((list, alphas)),
            (Some(_), None) => return Err(EtaError::file("", "CCF list given without alpha factors")),
            (None, Some(_)) => return Err(EtaError::file("", "CCF alpha factors given without a list")),
            (None, None) => {
                if cmd.ccf_detail_path.is_some() {
                    return Err(ModelError::InvalidSettings(
                        "CCF detail file given without list and alpha files".to_string(),
                    )
                    .into());
                }
                None
            }
        };

        let mut paths: Vec<&Path> = vec![&cmd.fault_tree_path, &cmd.sequence_path, &cmd.probability_path];
        if let Some((list, alphas)) = ccf_paths {
            paths.push(list);
            paths.push(alphas);
            if let Some(detail) = &cmd.ccf_detail_path {
                paths.push(detail);
            }
        }
        if let Some(hazard) = &cmd.hazard_path {
            paths.push(hazard);
        }

        let mut results = join_all(paths.iter().map(|path| self.reader.read_table(path))).await;
        let included = match results.first() {
            Some(Ok(main)) => self.follow_includes(&cmd.fault_tree_path, main).await,
            _ => Vec::new(),
        };
        let include_count = included.len();
        results.extend(included);

        let mut tables = settle(results)?;
        let included_trees = tables.split_off(tables.len().saturating_sub(include_count));
        let mut tables = tables.into_iter();
        let mut next = || {
            tables
                .next()
                .ok_or_else(|| EtaError::from(ModelError::InvalidSettings("missing input table".to_string())))
        };

        let main_tree = next()?;
        let sequences = next()?;
        let probabilities = next()?;
        let ccf = match ccf_paths {
            Some(_) => Some(CcfTables {
                list: next()?,
                alphas: next()?,
                detail: match cmd.ccf_detail_path {
                    Some(_) => Some(next()?),
                    None => None,
                },
            }),
            None => None,
        };
        let hazard = match cmd.hazard_path {
            Some(_) => Some(next()?),
            None => None,
        };

        let mut fault_trees = vec![main_tree];
        fault_trees.extend(included_trees);
        debug!(
            fault_tree_files = fault_trees.len(),
            ccf = ccf.is_some(),
            hazard = hazard.is_some(),
            "Model tables loaded"
        );

        Ok(ModelTables {
            fault_trees,
            sequences,
            probabilities,
            ccf,
            hazard,
        })
    }

    /// Reads every file reachable through include rows, breadth first.
    async fn follow_includes(&self, root: &Path, main: &Table) -> Vec<Result<Table, TableReadError>> {
        let mut visited: HashSet<PathBuf> = HashSet::from([root.to_path_buf()]);
        let mut pending = VecDeque::from([(root.to_path_buf(), FaultTree::includes(main))]);
        let mut loaded = Vec::new();

        while let Some((from, includes)) = pending.pop_front() {
            let base = from.parent().map(Path::to_path_buf).unwrap_or_default();
            for include in includes {
                let path = base.join(&include.path);
                if !visited.insert(path.clone()) {
                    continue;
                }
                debug!(top_event = %include.top_event, path = %path.display(), "Following include");
                let result = self.reader.read_table(&path).await.map_err(|err| match err {
                    TableReadError::Unreadable { path, reason } if include.may_be_gate_row() => {
                        warn!(
                            top_event = %include.top_event,
                            kind = %include.path,
                            "Include target looks like a gate type; only AND and OR are supported"
                        );
                        TableReadError::Unreadable {
                            path,
                            reason: format!(
                                "{}; '{}' is neither a file nor a gate type (AND, OR)",
                                reason, include.path
                            ),
                        }
                    }
                    other => other,
                });
                if let Ok(table) = &result {
                    pending.push_back((path, FaultTree::includes(table)));
                }
                loaded.push(result);
            }
        }
        loaded
    }
}

/// File errors first, then content errors, then the tables in order.
fn settle(results: Vec<Result<Table, TableReadError>>) -> Result<Vec<Table>, EtaError> {
    if let Some(Err(err)) = results
        .iter()
        .find(|r| matches!(r, Err(TableReadError::Unreadable { .. })))
    {
        return Err(err.clone().into());
    }
    results
        .into_iter()
        .map(|r| r.map_err(EtaError::from))
        .collect()
}
