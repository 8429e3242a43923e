use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregation::DEFAULT_REPORT_PATH;
use crate::error::{FlowLogError, Result};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub flow_log: PathBuf,
    pub lookup_table: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub report: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `None` sends log lines to stderr. Omitting the key keeps the default file.
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            flow_log: PathBuf::from("./flowlog.txt"),
            lookup_table: PathBuf::from("./lookup_table.csv"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: Some(PathBuf::from("process_flowlog.log")),
            level: "debug".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FlowLogError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            FlowLogError::Config(format!("Invalid config {}: {}", path.display(), e))
        })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| FlowLogError::Config(format!("Cannot serialize config: {}", e)))?;
        fs::write(path, content).map_err(|e| {
            FlowLogError::Config(format!("Cannot write {}: {}", path.display(), e))
        })
    }
}
