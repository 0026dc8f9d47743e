use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    /// Directory holding the database and, by default, the log file.
    pub data_dir: Option<String>,
    /// Override for the database path. May reference `{{data_dir}}`.
    pub database: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Config file that was read, or would have been read.
    pub config_path: PathBuf,
    /// False when no config file existed at the default location.
    pub from_file: bool,
    pub data_dir: PathBuf,
    pub database: PathBuf,
    pub logging: LoggingConfig,
}
