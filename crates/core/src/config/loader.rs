use crate::config::types::{ConfigFile, LoggingConfig, ResolvedConfig};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the config at `config_path`, or at [`default_config_path`].
    ///
    /// An explicitly given path must exist. When the default file is absent
    /// the built-in defaults are used instead.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            if config_path.is_some() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            return Self::resolve(path, false, None, None, &LoggingConfig::default());
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        Self::resolve(
            path,
            true,
            cf.data_dir.as_deref(),
            cf.database.as_deref(),
            &cf.logging,
        )
    }

    fn resolve(
        config_path: PathBuf,
        from_file: bool,
        data_dir: Option<&str>,
        database: Option<&str>,
        log_cfg: &LoggingConfig,
    ) -> Result<ResolvedConfig, ConfigError> {
        let data_dir = match data_dir {
            Some(dir) => expand_path(dir)?,
            None => default_data_dir(),
        };
        let sub = |s: &str| s.replace("{{data_dir}}", &data_dir.to_string_lossy());

        let database = match database {
            Some(db) => expand_path(&sub(db))?,
            None => data_dir.join("npbc.db"),
        };

        // Resolve log file path if present
        let logging = if let Some(ref file) = log_cfg.file {
            let expanded_file = expand_path(&sub(&file.to_string_lossy()))?;
            LoggingConfig {
                level: log_cfg.level.clone(),
                file_level: log_cfg.file_level.clone(),
                file: Some(expanded_file),
            }
        } else {
            log_cfg.clone()
        };

        Ok(ResolvedConfig { config_path, from_file, data_dir, database, logging })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("npbc").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("npbc").join("config.toml")
}

/// Default directory for the database: `$XDG_DATA_HOME/npbc`, else `~/.npbc`.
pub fn default_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        return Path::new(&xdg).join("npbc");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".npbc")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
