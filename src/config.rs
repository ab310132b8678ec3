//! Configuration management and validation.
//!
//! Provides configuration structures for import heuristics and backend
//! submission, loaded in layers: built-in defaults, an optional TOML file,
//! environment variables, then command-line overrides.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_API_TOKEN, ENV_API_URL,
};
use crate::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// When row 0 counts as a header row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderPolicy {
    /// A surname or given-name column was found (student manager behavior)
    #[default]
    NameColumns,
    /// Any of surname, given-name or class columns was found (class manager behavior)
    AnyColumn,
}

/// Column order assumed for headerless rows with two or more cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PositionalOrder {
    /// Cell 0 is the given name, cell 1 the surname
    #[default]
    GivenSurname,
    /// Cell 0 is the surname, cell 1 the given name
    SurnameGiven,
}

/// Import heuristics configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// When row 0 counts as a header row
    pub header_policy: HeaderPolicy,

    /// Column order for headerless rows
    pub positional_order: PositionalOrder,
}

impl ImportConfig {
    /// Treat row 0 as a header when any known column is found
    pub fn with_header_policy(mut self, policy: HeaderPolicy) -> Self {
        self.header_policy = policy;
        self
    }

    /// Override the positional column order
    pub fn with_positional_order(mut self, order: PositionalOrder) -> Self {
        self.positional_order = order;
        self
    }
}

/// Backend submission configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the REST backend (e.g. `https://ccf.example.org`)
    pub api_url: Option<String>,

    /// Bearer token sent with every request
    pub api_token: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Ask the backend to create classes from imported class labels afterwards
    pub sync_classes: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            sync_classes: false,
        }
    }
}

impl BackendConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL without a trailing slash, if configured
    pub fn base_url(&self) -> Option<&str> {
        self.api_url.as_deref().map(|url| url.trim_end_matches('/'))
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub import: ImportConfig,
    pub backend: BackendConfig,
}

impl Config {
    /// Default configuration file location (`<config_dir>/roster-import/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine configuration directory"))
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Configuration { message } => {
                Error::configuration(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration: {}", e)))
    }

    /// Load defaults, then the config file (if any), then environment variables
    ///
    /// An explicitly given file must exist; the default location is optional.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        debug!("Layered configuration: {:?}", config);
        Ok(config)
    }

    /// Apply environment overrides through a lookup function
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.backend.api_url = Some(url.trim().to_string());
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.backend.api_token = Some(token.trim().to_string());
        }
    }

    /// Set the backend base URL
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.backend.api_url = Some(url.into());
        self
    }

    /// Set the backend bearer token
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.backend.api_token = Some(token.into());
        self
    }

    /// Enable class synchronization after submission
    pub fn with_class_sync(mut self) -> Self {
        self.backend.sync_classes = true;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.backend.api_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::configuration(format!(
                    "API URL must start with http:// or https://, got '{}'",
                    url
                )));
            }
        }

        if self.backend.timeout_secs == 0 {
            return Err(Error::configuration(
                "Request timeout must be greater than zero seconds",
            ));
        }

        Ok(())
    }
}
