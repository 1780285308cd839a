//! Output configuration

use serde::{Deserialize, Serialize};

use crate::ports::ReportWriteError;

/// Encoding of the result printed on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Where results go
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory for CSV reports; none when unset
    pub report_dir: Option<String>,

    /// Print the full result on stdout
    #[serde(default = "default_print")]
    pub print: bool,

    /// Encoding of the printed result
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl OutputConfig {
    /// Renders a result in the configured format.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String, ReportWriteError> {
        let rendered = match self.format {
            OutputFormat::Json if self.pretty => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
            OutputFormat::Json => serde_json::to_string(value).map_err(|e| e.to_string()),
            OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        };
        rendered.map_err(ReportWriteError::SerializationFailed)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: None,
            print: default_print(),
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

fn default_print() -> bool {
    true
}

fn default_pretty() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn value() -> BTreeMap<&'static str, f64> {
        BTreeMap::from([("min_max", 0.5)])
    }

    #[test]
    fn defaults_to_pretty_json() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.render(&value()).unwrap(), "{\n  \"min_max\": 0.5\n}");
    }

    #[test]
    fn compact_json() {
        let config = OutputConfig {
            pretty: false,
            ..OutputConfig::default()
        };
        assert_eq!(config.render(&value()).unwrap(), "{\"min_max\":0.5}");
    }

    #[test]
    fn yaml_format() {
        let config = OutputConfig {
            format: OutputFormat::Yaml,
            ..OutputConfig::default()
        };
        assert_eq!(config.render(&value()).unwrap(), "min_max: 0.5\n");
    }
}
