//! Configuration and default paths
//!
//! Optional per-project overrides come from an `edurisk.toml` in the
//! working directory; everything else defaults to the per-user data
//! directory. CLI flags win over config, config wins over defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

/// Project config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "edurisk.toml";

/// Per-project overrides.
///
/// ```toml
/// # edurisk.toml
/// model_path = "artifacts/dropout_model.json"
/// store_path = "data/students.redb"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

/// Load `edurisk.toml` from `dir`, falling back to defaults when the
/// file is absent or unparseable. A broken config file warns rather
/// than aborting; explicit flags still work.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return ProjectConfig::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<ProjectConfig>(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded project config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring invalid config file");
                ProjectConfig::default()
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read config file");
            ProjectConfig::default()
        }
    }
}

/// Per-user data directory for artifacts and the local store.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("edurisk")
}

pub fn default_model_path() -> PathBuf {
    data_dir().join("dropout_model.json")
}

pub fn default_store_path() -> PathBuf {
    data_dir().join("students.redb")
}

/// Flag > config > default.
pub fn resolve_model_path(flag: Option<PathBuf>, config: &ProjectConfig) -> PathBuf {
    flag.or_else(|| config.model_path.clone())
        .unwrap_or_else(default_model_path)
}

/// Flag > config > default.
pub fn resolve_store_path(flag: Option<PathBuf>, config: &ProjectConfig) -> PathBuf {
    flag.or_else(|| config.store_path.clone())
        .unwrap_or_else(default_store_path)
}
