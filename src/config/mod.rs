use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::spell_check::classifier::{DEFAULT_API_ENDPOINT, DEFAULT_TIMEOUT};
use crate::spell_check::CorrectionMap;

pub const API_KEY_ENV: &str = "ML4K_API_KEY";

/// Positive, finite seconds that fit in a `Duration`.
pub fn timeout_from_secs(secs: f64) -> std::result::Result<Duration, String> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be a positive number of seconds, got {}", secs));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("timeout {} is out of range: {}", secs, e))
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub api_endpoint: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    /// Replaces the built-in dictionary when set
    pub dictionary_path: Option<PathBuf>,
    /// Service failures are appended here with a timestamp
    pub log_file: Option<PathBuf>,
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            api_key: None,
            request_timeout: DEFAULT_TIMEOUT,
            dictionary_path: None,
            log_file: None,
            config_path: Self::default_path(),
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config/hangul-spellcheck/config.toml")
    }

    /// Load from the default location, writing a default file on first run.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if !path.exists() {
            let config = Config::default();
            config.save()?;
            info!("Created default config at {}", path.display());
            return Ok(config.with_env());
        }
        Ok(Self::load_from(&path)?.with_env())
    }

    /// Read a config file; keys that are absent keep their defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let doc = contents
            .parse::<toml_edit::DocumentMut>()
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        let mut config = Config {
            config_path: path.to_path_buf(),
            ..Config::default()
        };

        if let Some(endpoint) = doc.get("api_endpoint").and_then(|v| v.as_str()) {
            config.api_endpoint = endpoint.to_string();
        }
        if let Some(key) = doc.get("api_key").and_then(|v| v.as_str()) {
            if !key.trim().is_empty() {
                config.api_key = Some(key.to_string());
            }
        }
        if let Some(item) = doc.get("request_timeout_secs") {
            let secs = item
                .as_float()
                .or_else(|| item.as_integer().map(|i| i as f64))
                .ok_or_else(|| {
                    AppError::Config("request_timeout_secs must be a number".to_string())
                })?;
            config.request_timeout = timeout_from_secs(secs)
                .map_err(|e| AppError::Config(format!("request_timeout_secs: {}", e)))?;
        }
        if let Some(dictionary) = doc.get("dictionary_path").and_then(|v| v.as_str()) {
            config.dictionary_path = Some(PathBuf::from(dictionary));
        }
        if let Some(log_file) = doc.get("log_file").and_then(|v| v.as_str()) {
            config.log_file = Some(PathBuf::from(log_file));
        }

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The environment key wins over the file.
    pub fn with_env(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = Some(key);
            }
        }
        self
    }

    pub fn save(&self) -> Result<()> {
        let mut doc = toml_edit::DocumentMut::new();
        doc["api_endpoint"] = toml_edit::value(self.api_endpoint.as_str());
        if let Some(key) = &self.api_key {
            doc["api_key"] = toml_edit::value(key.as_str());
        }
        doc["request_timeout_secs"] = toml_edit::value(self.request_timeout.as_secs_f64());
        if let Some(path) = &self.dictionary_path {
            doc["dictionary_path"] = toml_edit::value(path.to_string_lossy().to_string());
        }
        if let Some(path) = &self.log_file {
            doc["log_file"] = toml_edit::value(path.to_string_lossy().to_string());
        }

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = format!("# hangul-spellcheck configuration file.\n{}", doc);
        fs::write(&self.config_path, contents)?;
        Ok(())
    }

    /// The configured dictionary file, or the built-in table.
    pub fn load_corrections(&self) -> Result<CorrectionMap> {
        let map = match &self.dictionary_path {
            Some(path) => CorrectionMap::load(path)?,
            None => CorrectionMap::builtin().clone(),
        };
        if map.is_empty() {
            warn!("Correction dictionary is empty; every sentence will be reported as correct");
        }
        Ok(map)
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::Config(format!(
                "no API key configured; set api_key in {} or {}",
                self.config_path.display(),
                API_KEY_ENV
            ))
        })
    }
}
