//! CSV Report Writer Adapter
//!
//! Writes one directory per sequence:
//!
//! ```text
//! <base>/summary.yaml
//! <base>/<sequence>/cut_sets.csv
//! <base>/<sequence>/top_event.csv
//! <base>/<sequence>/importance_measures.csv
//! <base>/<sequence>/hazard_bins.csv      (fragility runs only)
//! ```

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::{RunId, Timestamp};
use crate::domain::quantification::{Metric, QuantificationResult, SequenceResult, Summary, Triple};
use crate::ports::{ReportWriteError, ReportWriter};

/// Writes quantification results as CSV tables
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    base_path: PathBuf,
}

/// Top-level run summary written next to the per-sequence tables.
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    run_id: RunId,
    computed_at: Timestamp,
    sequences: BTreeMap<&'a str, Triple<Summary>>,
}

impl CsvReportWriter {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn sequence_dir(&self, sequence: &str) -> PathBuf {
        self.base_path.join(sequence)
    }

    async fn ensure_dir(path: &Path) -> Result<(), ReportWriteError> {
        fs::create_dir_all(path).await.map_err(|e| ReportWriteError::IoError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    async fn write_file(path: PathBuf, bytes: Vec<u8>) -> Result<PathBuf, ReportWriteError> {
        fs::write(&path, bytes).await.map_err(|e| ReportWriteError::IoError {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(path)
    }

    async fn write_sequence(&self, result: &SequenceResult) -> Result<Vec<PathBuf>, ReportWriteError> {
        let dir = self.sequence_dir(&result.sequence);
        Self::ensure_dir(&dir).await?;

        let mut written = vec![
            Self::write_file(dir.join("cut_sets.csv"), cut_sets_csv(result)?).await?,
            Self::write_file(dir.join("top_event.csv"), top_event_csv(result)?).await?,
            Self::write_file(dir.join("importance_measures.csv"), importance_csv(result)?).await?,
        ];
        if result.hazard.is_some() {
            written.push(Self::write_file(dir.join("hazard_bins.csv"), hazard_csv(result)?).await?);
        }
        Ok(written)
    }
}

#[async_trait]
impl ReportWriter for CsvReportWriter {
    async fn write_report(&self, result: &QuantificationResult) -> Result<Vec<PathBuf>, ReportWriteError> {
        Self::ensure_dir(&self.base_path).await?;

        let mut written = Vec::new();
        for sequence in result.sequences.values() {
            written.extend(self.write_sequence(sequence).await?);
        }

        let summary = RunSummary {
            run_id: result.run_id,
            computed_at: result.computed_at,
            sequences: result
                .sequences
                .iter()
                .map(|(name, seq)| (name.as_str(), seq.fta))
                .collect(),
        };
        let yaml =
            serde_yaml::to_string(&summary).map_err(|e| ReportWriteError::SerializationFailed(e.to_string()))?;
        written.push(Self::write_file(self.base_path.join("summary.yaml"), yaml.into_bytes()).await?);

        tracing::info!(
            path = %self.base_path.display(),
            files = written.len(),
            "Report written"
        );
        Ok(written)
    }
}

fn csv_error(e: impl std::fmt::Display) -> ReportWriteError {
    ReportWriteError::SerializationFailed(e.to_string())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, ReportWriteError> {
    writer.into_inner().map_err(csv_error)
}

fn summary_header<'a>(leading: &[&'a str]) -> Vec<&'a str> {
    leading.iter().copied().chain(Summary::COLUMNS).collect()
}

fn summary_fields(summary: &Summary) -> impl Iterator<Item = String> {
    summary.as_row().into_iter().map(|v| v.to_string())
}

fn cut_sets_csv(result: &SequenceResult) -> Result<Vec<u8>, ReportWriteError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["events", "probability", "importance_percent"])
        .map_err(csv_error)?;
    for record in &result.cut_sets {
        writer
            .write_record([
                record.events.join(" "),
                record.probability.to_string(),
                record.importance_percent.to_string(),
            ])
            .map_err(csv_error)?;
    }
    finish(writer)
}

fn top_event_csv(result: &SequenceResult) -> Result<Vec<u8>, ReportWriteError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(summary_header(&["estimator"])).map_err(csv_error)?;
    let rows = [
        ("min_max", &result.fta.min_max),
        ("upper_bound", &result.fta.upper_bound),
        ("rare_event", &result.fta.rare_event),
    ];
    for (label, summary) in rows {
        let record: Vec<String> = std::iter::once(label.to_string()).chain(summary_fields(summary)).collect();
        writer.write_record(&record).map_err(csv_error)?;
    }
    finish(writer)
}

fn importance_csv(result: &SequenceResult) -> Result<Vec<u8>, ReportWriteError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(summary_header(&["ordinal", "event", "occurrences", "measure"]))
        .map_err(csv_error)?;
    for metric in Metric::ALL.into_iter().filter(|m| *m != Metric::Fta) {
        let table = result.metric_table(metric);
        for (event, row) in result.importance.iter().zip(table) {
            let record: Vec<String> = [
                event.ordinal.to_string(),
                event.name.clone(),
                event.occurrences.to_string(),
                metric.to_string(),
            ]
            .into_iter()
            .chain(row.into_iter().map(|v| v.to_string()))
            .collect();
            writer.write_record(&record).map_err(csv_error)?;
        }
    }
    finish(writer)
}

fn hazard_csv(result: &SequenceResult) -> Result<Vec<u8>, ReportWriteError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["im", "exceedance", "delta", "sequence_fragility", "risk"])
        .map_err(csv_error)?;
    for bin in result.hazard.iter().flat_map(|h| &h.bins) {
        writer
            .write_record([bin.im, bin.exceedance, bin.delta, bin.sequence_fragility, bin.risk].map(|v| v.to_string()))
            .map_err(csv_error)?;
    }
    finish(writer)
}
