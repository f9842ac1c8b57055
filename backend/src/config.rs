//! Configuration file support.
//!
//! Settings are read from a TOML file. Every field has a default, so an
//! empty file (or no file at all) reproduces the built-in behavior.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::ZoomThresholds;
use crate::error::{ReliefError, ReliefResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "RELIEF_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliefConfig {
    pub clustering: ClusteringSettings,
    pub directory: DirectorySettings,
    pub logging: LoggingSettings,
}

/// Zoom tiers plus the marker rendering cut-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringSettings {
    #[serde(flatten)]
    pub thresholds: ZoomThresholds,
    /// Below this zoom even single-member clusters draw as count bubbles.
    pub aggregate_marker_zoom_below: i32,
}

impl Default for ClusteringSettings {
    fn default() -> Self {
        Self {
            thresholds: ZoomThresholds::default(),
            aggregate_marker_zoom_below: default_aggregate_marker_zoom_below(),
        }
    }
}

fn default_aggregate_marker_zoom_below() -> i32 {
    10
}

/// Search and popup limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorySettings {
    pub suggestion_limit: usize,
    pub popup_preview_limit: usize,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            suggestion_limit: 5,
            popup_preview_limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ReliefConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ReliefResult<Self> {
        let config: ReliefConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ReliefConfig)` if successful
    /// * `Err(ReliefError)` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> ReliefResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ReliefError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the first `relief.toml` found in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> ReliefResult<Self> {
        let search_paths = [
            PathBuf::from("relief.toml"),
            PathBuf::from("backend/relief.toml"),
            PathBuf::from("../relief.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ReliefError::Configuration(
            "No relief.toml found in standard locations".to_string(),
        ))
    }

    /// `RELIEF_CONFIG` if set, else the default location, else defaults.
    ///
    /// A file that exists but is invalid is an error; a missing file is not.
    pub fn load() -> ReliefResult<Self> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            debug!(path = %path, "loading config from {}", CONFIG_ENV_VAR);
            return Self::from_file(path);
        }
        match Self::from_default_location() {
            Ok(config) => Ok(config),
            Err(ReliefError::Configuration(msg)) => {
                debug!("{}; using built-in defaults", msg);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Reject thresholds and tiers that cannot cluster sensibly.
    pub fn validate(&self) -> ReliefResult<()> {
        let t = &self.clustering.thresholds;
        for (name, value) in [
            ("mid_threshold_deg", t.mid_threshold_deg),
            ("fine_threshold_deg", t.fine_threshold_deg),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ReliefError::Configuration(format!(
                    "clustering.{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }
        if t.fine_zoom_from < t.coarse_zoom_below {
            return Err(ReliefError::Configuration(format!(
                "clustering.fine_zoom_from ({}) must be >= clustering.coarse_zoom_below ({})",
                t.fine_zoom_from, t.coarse_zoom_below
            )));
        }
        Ok(())
    }
}
