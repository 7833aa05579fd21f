//! Runtime configuration.
//!
//! There is no config file. Defaults are overridden from the environment
//! once at startup, then validated.

use std::path::PathBuf;

use crate::constants::{
    DEFAULT_LOG_LEVEL, DEFAULT_UPLOAD_DIR, ENV_LOG_FILE, ENV_LOG_LEVEL, ENV_UPLOAD_DIR,
};
use crate::error::ConfigError;
use crate::log_io::LogLevel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub upload_dir: PathBuf,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Session log destination. `None` disables the log file.
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Defaults with process environment overrides applied and validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides taken from `lookup`. Blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        if let Some(dir) = get(ENV_UPLOAD_DIR) {
            cfg.upload_dir = PathBuf::from(dir);
        }
        if let Some(file) = get(ENV_LOG_FILE) {
            cfg.logging.file = Some(PathBuf::from(file));
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            cfg.logging.level = level;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upload_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("upload_dir is required".into()));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        LogLevel::parse(&self.logging.level).ok_or_else(|| {
            ConfigError::Invalid("logging.level must be one of debug, info, warn, error".into())
        })
    }
}
