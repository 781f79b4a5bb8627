//! Configuration loading.
//!
//! Configuration is a small TOML file. Its location is resolved in order
//! from an explicit path, the `ECOTRACE_CONFIG` environment variable, and
//! `<config dir>/ecotrace/config.toml`. A missing default file means
//! defaults; a missing explicit file is an error.
//!
//! ```toml
//! data_dir = "/var/lib/ecotrace"
//! storage_key = "ecoTraceUser"
//! log_filter = "warn,ecotrace=info"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::SESSION_KEY;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ECOTRACE_CONFIG";

/// Environment variable overriding `data_dir`.
pub const DATA_DIR_ENV: &str = "ECOTRACE_DATA_DIR";

const PROJECT_NAME: &str = "ecotrace";

/// EcoTrace settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcoTraceConfig {
    /// Where the session snapshot is kept; platform data dir when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Storage key of the session snapshot
    pub storage_key: String,

    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EcoTraceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: SESSION_KEY.to_string(),
            log_filter: "warn,ecotrace=info".to_string(),
        }
    }
}

impl EcoTraceConfig {
    /// Name used for config and data directories.
    pub fn project_name() -> &'static str {
        PROJECT_NAME
    }

    /// `<config dir>/ecotrace/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolves which config file to use.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        Self::locate(explicit, std::env::var(CONFIG_ENV).ok()).0
    }

    /// Loads configuration from the resolved path and applies
    /// `ECOTRACE_DATA_DIR`.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let (path, required) = Self::locate(explicit, std::env::var(CONFIG_ENV).ok());
        let data_dir_override = std::env::var(DATA_DIR_ENV).ok();
        Self::load_from(path.as_deref(), required, data_dir_override)
    }

    /// Config path for an explicit path and `ECOTRACE_CONFIG` value, and
    /// whether that file must exist. A blank variable counts as unset.
    fn locate(explicit: Option<&str>, env: Option<String>) -> (Option<PathBuf>, bool) {
        if let Some(path) = explicit {
            return (Some(PathBuf::from(path)), true);
        }
        match env.filter(|path| !path.trim().is_empty()) {
            Some(path) => (Some(PathBuf::from(path)), true),
            None => (Self::default_config_path(), false),
        }
    }

    /// Loads configuration from `path`.
    ///
    /// When `required` is false a missing file yields defaults.
    pub fn load_from(
        path: Option<&Path>,
        required: bool,
        data_dir_override: Option<String>,
    ) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::config(format!("Failed to read {}: {e}", path.display()))
                })?;
                let config = Self::from_toml_str(&content).map_err(|e| {
                    Error::config(format!("Failed to parse {}: {e}", path.display()))
                })?;
                tracing::debug!(path = %path.display(), "Loaded configuration");
                config
            }
            Some(path) if required => {
                return Err(Error::config(format!(
                    "Config file does not exist at {}",
                    path.display()
                )));
            }
            _ => Self::default(),
        };

        if let Some(dir) = data_dir_override.filter(|d| !d.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serializes configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Checks values that would only fail later, at first use.
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(Error::config("storage_key must not be empty"));
        }
        Ok(())
    }

    /// Directory holding the session snapshot.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .map(|dir| dir.join(PROJECT_NAME))
            .unwrap_or_else(|| PathBuf::from(format!(".{PROJECT_NAME}")))
    }

    /// Writes default configuration to `path`.
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn write_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(Error::config(format!(
                "Config file already exists at {}. Use --force to overwrite.",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default().to_toml_string()?)?;
        tracing::info!(path = %path.display(), "Wrote default configuration");
        Ok(())
    }
}
