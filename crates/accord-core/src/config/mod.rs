//! Configuration system for Accord.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod accord_config;
pub mod analysis_config;
pub mod matching_config;

pub use accord_config::{AccordConfig, ConfigOverrides};
pub use analysis_config::AnalysisConfig;
pub use matching_config::MatchingConfig;
