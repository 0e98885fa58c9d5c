//! Configuration management for riskledger.

use crate::scoring::ScoringPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub scoring: ScoringConfig,
    pub audit: AuditSettings,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("riskledger")
            .join("config.toml")
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Storage location configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory for record collections. Platform data dir when unset.
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the data directory: explicit setting, else platform default.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("riskledger")
        })
    }
}

/// Scoring policy configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Formula that stamps persisted analysis scores: "matrix" or "product".
    #[serde(with = "scoring_policy_serde")]
    pub policy: ScoringPolicy,
}

/// Audit log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSettings {
    pub enabled: bool,
    /// Maximum size of the audit file in bytes before rotation.
    pub max_file_bytes: u64,
    /// Rotated files to keep.
    pub max_rotated_files: u32,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_file_bytes: 10 * 1024 * 1024,
            max_rotated_files: 5,
        }
    }
}

/// Serde helper keeping the on-disk policy names stable.
mod scoring_policy_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(policy: &ScoringPolicy, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(policy.as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ScoringPolicy, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ScoringPolicy::from_str_opt(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid scoring policy: {}", s)))
    }
}
