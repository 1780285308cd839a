//! Report Adapters
//!
//! Implementations of the ReportWriter port.
//!
//! - **CsvReportWriter** - Per-sequence CSV tables plus a YAML run summary

mod csv_report_writer;

pub use csv_report_writer::CsvReportWriter;
