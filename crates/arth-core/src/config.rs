//! Provider configuration
//!
//! Config is loaded with three layers, later layers winning:
//! 1. Embedded defaults (compiled into binary)
//! 2. Override file in data dir (~/.local/share/arth/config/provider.toml)
//! 3. Environment (`GEMINI_HOST`, `GEMINI_MODEL`)
//!
//! The API key is never part of this config. It lives only in the
//! `GEMINI_API_KEY` environment variable and is read at dispatch time.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/provider.toml");

/// Environment variable holding the provider API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the provider base URL
pub const HOST_ENV: &str = "GEMINI_HOST";

/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "GEMINI_MODEL";

/// Environment variable selecting the provider client (gemini, mock)
pub const PROVIDER_ENV: &str = "ARTH_PROVIDER";

/// Resolved provider settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL of the generative-text API
    pub host: String,
    /// Model used for advisory prompts
    pub model: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    provider: ProviderSection,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderSection {
    host: Option<String>,
    model: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            host: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
        }
    }
}

impl ProviderConfig {
    /// Load defaults, the data-dir override, then environment overrides
    pub fn load() -> Result<Self> {
        let path = default_config_path();
        Ok(Self::load_from(path.as_deref())?.with_env_overrides())
    }

    /// Load defaults plus an optional override file (no environment)
    pub fn load_from(override_path: Option<&Path>) -> Result<Self> {
        let config = Self::default().merge(parse_config(DEFAULT_CONFIG)?);

        match override_path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(path)
                    .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
                tracing::debug!(path = %path.display(), "Loaded provider config override");
                Ok(config.merge(parse_config(&content)?))
            }
            _ => Ok(config),
        }
    }

    /// Apply `GEMINI_HOST` / `GEMINI_MODEL` when set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(host) = non_empty_env(HOST_ENV) {
            self.host = host;
        }
        if let Some(model) = non_empty_env(MODEL_ENV) {
            self.model = model;
        }
        self
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(host) = file.provider.host.filter(|h| !h.trim().is_empty()) {
            self.host = host;
        }
        if let Some(model) = file.provider.model.filter(|m| !m.trim().is_empty()) {
            self.model = model;
        }
        self
    }
}

/// Default override location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("arth").join("config").join("provider.toml"))
}

/// Default directory for JSON ledger files
pub fn default_ledger_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("arth").join("ledgers"))
}

fn parse_config(content: &str) -> Result<ConfigFile> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Invalid provider config: {}", e)))
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_defaults_parse() {
        let config = ProviderConfig::load_from(None).unwrap();
        assert_eq!(config.host, "https://generativelanguage.googleapis.com");
        assert_eq!(config.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_override_file_is_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[provider]\nmodel = \"gemini-1.5-pro\"").unwrap();

        let config = ProviderConfig::load_from(Some(file.path())).unwrap();

        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.host, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn test_missing_override_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProviderConfig::load_from(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, ProviderConfig::load_from(None).unwrap());
    }

    #[test]
    fn test_invalid_override_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[provider\nmodel = ").unwrap();

        let result = ProviderConfig::load_from(Some(file.path()));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
