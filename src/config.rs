use crate::normalization::DegeneratePolicy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Locations of the external resources and display options.
///
/// Every field is optional in the JSON file; missing ones take the defaults
/// below. Relative paths are resolved against the config file's directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    #[schemars(
        with = "String",
        title = "Reference Dataset",
        description = "CSV with a diagnosis column and the 30 feature columns"
    )]
    pub dataset_path: PathBuf,

    #[schemars(
        with = "String",
        title = "Classifier Artifact",
        description = "Fitted classifier (.json or .pkl)"
    )]
    pub model_path: PathBuf,

    #[schemars(
        with = "String",
        title = "Standardizer Artifact",
        description = "Fitted standard scaler (.json or .pkl)"
    )]
    pub scaler_path: PathBuf,

    #[schemars(
        title = "Degenerate Features",
        description = "Handling of zero-range features during display normalization"
    )]
    pub degenerate_policy: DegeneratePolicy,

    #[schemars(
        title = "Clamp Chart",
        description = "Bound radar chart values to [0, 1]"
    )]
    pub clamp_chart: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/data.csv"),
            model_path: PathBuf::from("model/model.json"),
            scaler_path: PathBuf::from("model/scaler.json"),
            degenerate_policy: DegeneratePolicy::default(),
            clamp_chart: true,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        info!(path = %path.display(), "configuration loaded");
        Ok(config.relative_to(base))
    }

    /// Loads `path` when given, otherwise the defaults relative to the working directory.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn relative_to(mut self, base: &Path) -> Self {
        for p in [
            &mut self.dataset_path,
            &mut self.model_path,
            &mut self.scaler_path,
        ] {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
        self
    }
}
