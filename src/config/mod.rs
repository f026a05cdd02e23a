//! Configuration management for `board_export`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. Environment variables (`BOARD_EXPORT_*`)
//! 2. Project config (`./board-export.yaml`, or the file passed via `--config`)
//! 3. User config (`~/.config/board-export/config.yaml`)
//!
//! Keys are flattened (`trello.api-key`) and normalized to lowercase with
//! `-` separators, so `api_key` and `api-key` are the same key.

use crate::client::DEFAULT_BASE_URL;
use crate::error::{ExportError, Result};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Project config filename looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "board-export.yaml";
/// Prefix for environment overrides.
const ENV_PREFIX: &str = "BOARD_EXPORT_";
/// Section holding the Trello credentials.
const TRELLO_SECTION: &str = "trello";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A flat key/value configuration layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: HashMap<String, String>,
}

impl ConfigLayer {
    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let layer = Self::from_yaml_str(&contents)?;
        debug!(path = %path.display(), keys = layer.values.len(), "Loaded config file");
        Ok(layer)
    }

    /// Build a layer from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
        Ok(layer_from_yaml_value(&value))
    }

    /// Build a layer from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(env::vars())
    }

    /// Build a layer from `BOARD_EXPORT_*` variables.
    ///
    /// The first `_` after the prefix separates the section from the key:
    /// `BOARD_EXPORT_TRELLO_API_KEY` becomes `trello.api-key`.
    #[must_use]
    pub fn from_env_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                layer.insert(&env_key(stripped), value);
            }
        }
        layer
    }

    /// Insert a value under its normalized key.
    pub fn insert(&mut self, key: &str, value: String) {
        self.values.insert(normalize_key(key), value);
    }

    /// Look up a non-empty value by any of its aliases.
    #[must_use]
    pub fn get(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.values.get(&normalize_key(key)))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
    }

    /// Whether any key lives under `section`.
    #[must_use]
    pub fn has_section(&self, section: &str) -> bool {
        let prefix = format!("{}.", normalize_key(section));
        self.values.keys().any(|key| key.starts_with(&prefix))
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Explicit config file; replaces the project config lookup.
    pub config_path: Option<PathBuf>,
}

/// Resolved Trello connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct TrelloConfig {
    pub api_key: String,
    pub token: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl TrelloConfig {
    /// Extract the Trello settings from a merged layer.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsMissing` if the `trello` section, the API key or
    /// the token is absent, and `Config` for malformed optional settings.
    pub fn from_layer(layer: &ConfigLayer) -> Result<Self> {
        if !layer.has_section(TRELLO_SECTION) {
            return Err(ExportError::credentials_missing(format!(
                "no '{TRELLO_SECTION}' section in {PROJECT_CONFIG_FILE}, the user config, \
                 or {ENV_PREFIX}TRELLO_* variables"
            )));
        }

        let api_key = layer
            .get(&["trello.api-key", "trello.key"])
            .ok_or_else(|| ExportError::credentials_missing("trello.api-key is not set"))?
            .to_string();
        let token = layer
            .get(&["trello.token"])
            .ok_or_else(|| ExportError::credentials_missing("trello.token is not set"))?
            .to_string();

        let base_url = layer
            .get(&["trello.base-url"])
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ExportError::Config(format!(
                "trello.base-url must be an http(s) URL, got '{base_url}'"
            )));
        }

        let timeout_secs = match layer.get(&["trello.timeout-secs"]) {
            Some(value) => value.parse::<u64>().map_err(|_| {
                ExportError::Config(format!(
                    "trello.timeout-secs must be a whole number of seconds, got '{value}'"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            token,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl fmt::Debug for TrelloConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrelloConfig")
            .field("api_key", &"<redacted>")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Load user config (~/.config/board-export/config.yaml).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ConfigLayer> {
    let Ok(home) = env::var("HOME") else {
        return Ok(ConfigLayer::default());
    };
    ConfigLayer::from_yaml(&user_config_path(Path::new(&home)))
}

fn user_config_path(home: &Path) -> PathBuf {
    home.join(".config").join("board-export").join("config.yaml")
}

/// Load the project config, or the explicit `--config` file.
///
/// # Errors
///
/// Returns an error if an explicit file is missing, or if a file exists but
/// cannot be read or parsed.
pub fn load_project_config(cli: &CliOverrides) -> Result<ConfigLayer> {
    match &cli.config_path {
        Some(path) => {
            if !path.is_file() {
                return Err(ExportError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            ConfigLayer::from_yaml(path)
        }
        None => ConfigLayer::from_yaml(Path::new(PROJECT_CONFIG_FILE)),
    }
}

/// Load configuration with precedence order.
///
/// # Errors
///
/// Returns an error if any config file cannot be read or parsed.
pub fn load_config(cli: &CliOverrides) -> Result<ConfigLayer> {
    let user = load_user_config()?;
    let project = load_project_config(cli)?;
    let env_layer = ConfigLayer::from_env();

    Ok(ConfigLayer::merge_layers(&[user, project, env_layer]))
}

/// Load and validate the Trello credentials.
///
/// # Errors
///
/// Returns `CredentialsMissing` when no usable credentials are configured.
pub fn load_credentials(cli: &CliOverrides) -> Result<TrelloConfig> {
    TrelloConfig::from_layer(&load_config(cli)?)
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn env_key(raw: &str) -> String {
    let lower = raw.to_lowercase();
    match lower.split_once('_') {
        Some((section, rest)) => format!("{section}.{}", rest.replace('_', "-")),
        None => lower,
    }
}

fn layer_from_yaml_value(value: &serde_yaml::Value) -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    let mut flat = HashMap::new();
    flatten_yaml(value, "", &mut flat);

    for (key, value) in flat {
        layer.insert(&key, value);
    }

    layer
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        serde_yaml::Value::Sequence(values) => {
            let joined = values
                .iter()
                .filter_map(yaml_scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.insert(prefix.to_string(), joined);
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}
