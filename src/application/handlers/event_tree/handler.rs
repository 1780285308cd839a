//! EventTreeAnalysisHandler - Command handler for quantifying an event tree.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use super::{EtaCommand, EtaError, ModelLoader};
use crate::domain::foundation::AnalysisMode;
use crate::domain::quantification::QuantificationResult;
use crate::domain::risk_model::RiskModel;
use crate::ports::TableReader;

/// Handler for event-tree analysis runs.
///
/// Loads every input once, builds the risk model, then quantifies each
/// sequence in name order.
pub struct EventTreeAnalysisHandler {
    loader: ModelLoader,
}

impl EventTreeAnalysisHandler {
    pub fn new(reader: Arc<dyn TableReader>) -> Self {
        Self {
            loader: ModelLoader::new(reader),
        }
    }

    pub async fn handle(&self, cmd: EtaCommand) -> Result<QuantificationResult, EtaError> {
        // 1. Read inputs; file errors surface here
        let tables = self.loader.load(&cmd).await?;

        // 2. Settings and model validation
        let settings = cmd.settings()?;
        let model = RiskModel::from_tables(&tables, settings.analysis)?;
        if settings.analysis == AnalysisMode::Fragility && model.hazard().is_none() {
            info!("No hazard file given; using the default hazard curve");
        }

        // 3. Quantify each sequence
        let mut sequences = BTreeMap::new();
        for sequence in model.sequences() {
            let result = model.quantify(sequence, &settings)?;
            debug!(
                sequence = %sequence.name,
                cut_sets = result.cut_sets.len(),
                min_max = result.fta.min_max.point,
                "Sequence quantified"
            );
            sequences.insert(sequence.name.clone(), result);
        }

        let result = QuantificationResult::new(sequences);
        info!(
            run_id = %result.run_id,
            analysis = %settings.analysis,
            sequences = result.sequences.len(),
            "Event tree analysis complete"
        );
        Ok(result)
    }
}
