//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `tables` - Input table readers (flat files, in-memory)
//! - `reports` - Result writers (CSV)

pub mod reports;
pub mod tables;

pub use reports::CsvReportWriter;
pub use tables::{FlatFileTableReader, InMemoryTableReader};
