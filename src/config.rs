use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::MAX_COMPARE_ITEMS;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub comparison: ComparisonSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonSettings {
    /// Minimum match score shown in the ranked list (0 shows everything)
    #[serde(default)]
    pub min_score: u8,
    #[serde(default = "default_max_compare_items")]
    pub max_compare_items: usize,
    pub limit: Option<usize>,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            min_score: 0,
            max_compare_items: default_max_compare_items(),
            limit: None,
        }
    }
}

fn default_max_compare_items() -> usize { MAX_COMPARE_ITEMS }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HOUSE_MATCH)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOUSE_MATCH__COMPARISON__MIN_SCORE -> comparison.min_score
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("HOUSE_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_comparison() {
        let comparison = ComparisonSettings::default();
        assert_eq!(comparison.min_score, 0);
        assert_eq!(comparison.max_compare_items, 3);
        assert!(comparison.limit.is_none());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str("[comparison]\nmin_score = 70\n", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.comparison.min_score, 70);
        assert_eq!(settings.comparison.max_compare_items, 3);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_load_from_custom_path() {
        let path = std::env::temp_dir().join(format!("house-match-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[comparison]\nmax_compare_items = 2\nlimit = 10\n\n[logging]\nformat = \"pretty\"\n").unwrap();

        let settings = Settings::load_from(&path);
        std::fs::remove_file(&path).unwrap();

        let settings = settings.unwrap();
        assert_eq!(settings.comparison.max_compare_items, 2);
        assert_eq!(settings.comparison.limit, Some(10));
        assert_eq!(settings.comparison.min_score, 0);
        assert_eq!(settings.logging.format, "pretty");
    }
}
