//! Top-level Accord configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, MatchingConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Host overrides (applied via `apply_overrides`)
/// 2. Environment variables (`ACCORD_*`)
/// 3. Project config (`accord.toml` in project root)
/// 4. User config (`~/.accord/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AccordConfig {
    pub matching: MatchingConfig,
    pub analysis: AnalysisConfig,
}

/// Override values a host application can force on top of every file layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub min_confidence: Option<f64>,
    pub root_marker: Option<String>,
    pub ignore_endpoints: Vec<String>,
}

impl AccordConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::Parse { .. }) => return Err(err),
                    Err(err) => {
                        tracing::warn!(error = %err, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &AccordConfig) -> Result<(), ConfigError> {
        if let Some(min) = config.matching.min_confidence {
            if !(0.0..=1.0).contains(&min) {
                return Err(ConfigError::OutOfRange {
                    field: "matching.min_confidence",
                    value: min,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        if let Some(ref marker) = config.analysis.root_marker {
            if marker.trim().is_empty() {
                return Err(ConfigError::Blank {
                    field: "analysis.root_marker",
                });
            }
        }
        for pattern in &config.analysis.ignore_endpoints {
            if let Err(e) = glob::Pattern::new(pattern) {
                return Err(ConfigError::InvalidGlob {
                    field: "analysis.ignore_endpoints",
                    pattern: pattern.clone(),
                    message: e.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.accord/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".accord").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut AccordConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

        let file_config: AccordConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut AccordConfig, other: &AccordConfig) {
        if other.matching.min_confidence.is_some() {
            base.matching.min_confidence = other.matching.min_confidence;
        }

        if other.analysis.root_marker.is_some() {
            base.analysis.root_marker = other.analysis.root_marker.clone();
        }
        if !other.analysis.ignore_endpoints.is_empty() {
            base.analysis.ignore_endpoints = other.analysis.ignore_endpoints.clone();
        }
        if other.analysis.report_unmatched_backend.is_some() {
            base.analysis.report_unmatched_backend = other.analysis.report_unmatched_backend;
        }
        if other.analysis.report_unmatched_frontend.is_some() {
            base.analysis.report_unmatched_frontend = other.analysis.report_unmatched_frontend;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `ACCORD_MATCHING_MIN_CONFIDENCE`, `ACCORD_ANALYSIS_ROOT_MARKER`, etc.
    fn apply_env_overrides(config: &mut AccordConfig) {
        if let Ok(val) = std::env::var("ACCORD_MATCHING_MIN_CONFIDENCE") {
            if let Ok(v) = val.parse::<f64>() {
                config.matching.min_confidence = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ACCORD_ANALYSIS_ROOT_MARKER") {
            config.analysis.root_marker = Some(val);
        }
        if let Ok(val) = std::env::var("ACCORD_ANALYSIS_IGNORE_ENDPOINTS") {
            config.analysis.ignore_endpoints = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Ok(val) = std::env::var("ACCORD_ANALYSIS_REPORT_UNMATCHED_BACKEND") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.report_unmatched_backend = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ACCORD_ANALYSIS_REPORT_UNMATCHED_FRONTEND") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.report_unmatched_frontend = Some(v);
            }
        }
    }

    /// Apply host overrides (highest priority).
    pub fn apply_overrides(config: &mut AccordConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.min_confidence {
            config.matching.min_confidence = Some(v);
        }
        if let Some(ref v) = overrides.root_marker {
            config.analysis.root_marker = Some(v.clone());
        }
        if !overrides.ignore_endpoints.is_empty() {
            config.analysis.ignore_endpoints = overrides.ignore_endpoints.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
