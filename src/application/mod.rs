//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

use std::sync::Arc;

use crate::adapters::FlatFileTableReader;
use crate::domain::quantification::QuantificationResult;

pub use handlers::{EtaCommand, EtaError, EventTreeAnalysisHandler, ModelLoader};

/// Runs an event-tree analysis over files on the local filesystem.
pub async fn eta(command: EtaCommand) -> Result<QuantificationResult, EtaError> {
    EventTreeAnalysisHandler::new(Arc::new(FlatFileTableReader::new()))
        .handle(command)
        .await
}
