//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PRA_ENGINE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use pra_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Quantifying {}", config.inputs.sequences);
//! ```

mod analysis;
mod error;
mod inputs;
mod logging;
mod output;

pub use analysis::AnalysisConfig;
pub use error::{ConfigError, ValidationError};
pub use inputs::InputsConfig;
pub use logging::LoggingConfig;
pub use output::{OutputConfig, OutputFormat};

use serde::Deserialize;

use crate::application::EtaCommand;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Model input files
    #[serde(default)]
    pub inputs: InputsConfig,

    /// Quantification controls
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Result destinations
    #[serde(default)]
    pub output: OutputConfig,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PRA_ENGINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PRA_ENGINE__INPUTS__FAULT_TREE=model/ft.txt` -> `inputs.fault_tree`
    /// - `PRA_ENGINE__ANALYSIS__MODE=FRAGILITY` -> `analysis.mode`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PRA_ENGINE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.inputs.validate()?;
        self.analysis.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Builds the run command described by this configuration
    pub fn to_command(&self) -> Result<EtaCommand, ValidationError> {
        let inputs = &self.inputs;
        let analysis = &self.analysis;
        let mut cmd = EtaCommand::new(&inputs.fault_tree, &inputs.sequences, &inputs.probabilities)
            .with_analysis(&analysis.mode)
            .with_bins(analysis.im_lower, analysis.im_upper, analysis.nbins);
        cmd.im_edges = analysis.edges()?;
        if let (Some(list), Some(alphas)) = (&inputs.ccf_list, &inputs.ccf_alphas) {
            cmd = cmd.with_ccf(list, alphas, inputs.ccf_detail.as_ref().map(Into::into));
        }
        if let Some(hazard) = &inputs.hazard {
            cmd = cmd.with_hazard(hazard);
        }
        if analysis.uncertainty {
            cmd = cmd.with_uncertainty(analysis.nsamp, analysis.seed);
        } else {
            cmd.seed = analysis.seed;
        }
        Ok(cmd)
    }
}
