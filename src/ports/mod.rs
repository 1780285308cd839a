//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TableReader` - Loads flat input tables (fault trees, sequences, probabilities)
//! - `ReportWriter` - Persists quantification results

mod report_writer;
mod table_reader;

pub use report_writer::{ReportWriteError, ReportWriter};
pub use table_reader::{TableReadError, TableReader};
