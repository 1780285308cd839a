//! PRA Engine command-line runner.
//!
//! Reads its configuration from `PRA_ENGINE__*` environment variables (or a
//! `.env` file), runs one event-tree analysis and prints the result as JSON or YAML.

use std::process::ExitCode;
use std::sync::Arc;

use pra_engine::adapters::{CsvReportWriter, FlatFileTableReader};
use pra_engine::application::EventTreeAnalysisHandler;
use pra_engine::config::{AppConfig, LoggingConfig};
use pra_engine::ports::ReportWriter;

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.logging);

    let command = match config.validate().and_then(|_| config.to_command()) {
        Ok(command) => command,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::from(2);
        }
    };

    let handler = EventTreeAnalysisHandler::new(Arc::new(FlatFileTableReader::new()));
    let result = match handler.handle(command).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, detail = ?e, code = ?e.code(), "Event tree analysis failed");
            return ExitCode::FAILURE;
        }
    };

    if let Some(dir) = &config.output.report_dir {
        if let Err(e) = CsvReportWriter::new(dir).write_report(&result).await {
            tracing::error!(error = %e, "Failed to write report");
            return ExitCode::FAILURE;
        }
    }

    if config.output.print {
        match config.output.render(&result) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize result");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
