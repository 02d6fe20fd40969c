//! Configuration handling
//!
//! Configuration is read from the first of: the `--config` path,
//! `./athkar.toml`, the global config directory (`~/.config/athkar/config.toml`
//! on Linux). Missing files fall back to defaults; every section and field is
//! optional.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DedupePolicy, MatchConfig};

pub const LOCAL_CONFIG_FILE: &str = "athkar.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Corpus file locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Daily athkar corpus (`{ "athkar": [...] }`)
    pub daily: PathBuf,

    /// Library corpus (`{ "categories": [...], "duas": [...] }`)
    pub library: PathBuf,

    /// Raw dataset consumed by `convert`
    pub dataset: PathBuf,

    /// Comparison report
    pub compare_report: PathBuf,

    /// Revision listing
    pub revision_report: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            daily: PathBuf::from("daily_athkar.json"),
            library: PathBuf::from("hisn.json"),
            dataset: PathBuf::from("adhkar.json"),
            compare_report: PathBuf::from("api_comparison_report.html"),
            revision_report: PathBuf::from("athkar_revision.html"),
        }
    }
}

/// Reference service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL; category documents live at `{base_url}/{id}.json`
    pub base_url: String,

    /// Name of the index document under `base_url`
    pub index: String,

    /// Pause between category fetches
    pub delay_ms: u64,

    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.hisnmuslim.com/api/ar".to_string(),
            index: "husn_ar.json".to_string(),
            delay_ms: 500,
            timeout_secs: 30,
        }
    }
}

impl RemoteConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// A reference category checked by `compare`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareTarget {
    pub id: u32,
    pub name: String,
}

impl CompareTarget {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompareConfig {
    pub categories: Vec<CompareTarget>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                CompareTarget::new(27, "أذكار الصباح والمساء"),
                CompareTarget::new(28, "أذكار النوم"),
                CompareTarget::new(1, "أذكار الاستيقاظ من النوم"),
                CompareTarget::new(25, "الأذكار بعد السلام من الصلاة"),
            ],
        }
    }
}

/// Complete tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub remote: RemoteConfig,
    pub matching: MatchConfig,
    pub dedupe: DedupePolicy,
    pub compare: CompareConfig,

    /// File the configuration was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from an explicit path or the default locations
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_file(&local);
        }

        match Self::global_config_dir().map(|dir| dir.join("config.toml")) {
            Some(path) if path.exists() => Self::load_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("app", "athkari", "athkar").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads and validates a configuration file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses and validates TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.matching;
        let in_range = |v: f64| (0.0..=1.0).contains(&v);

        if !in_range(m.match_threshold) || !in_range(m.review_threshold) {
            return Err(ConfigError::Invalid(
                "matching thresholds must be between 0 and 1".to_string(),
            ));
        }
        if m.review_threshold > m.match_threshold {
            return Err(ConfigError::Invalid(format!(
                "review_threshold ({}) is above match_threshold ({})",
                m.review_threshold, m.match_threshold
            )));
        }
        if self.dedupe.key_chars == 0 {
            return Err(ConfigError::Invalid("dedupe.key_chars must be positive".to_string()));
        }
        if self.remote.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("remote.base_url is empty".to_string()));
        }

        Ok(())
    }
}
