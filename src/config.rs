//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then command-line flags. The first three layers are
//! applied by [`Config::load`]; the CLI applies its flags through the
//! builder-style `with_*` methods before calling [`Config::validate`].

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use crate::app::services::aggregator::{BucketMetric, TimelineRequest};
use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BUCKET_SIZE_YEARS, DEFAULT_DATA_SOURCE,
    DEFAULT_DELIMITER, DEFAULT_RECENT_REPORTS, DEFAULT_TREND_PERIOD_YEARS, ENV_DATA_SOURCE,
    ENV_LOG_LEVEL,
};
use crate::{Error, Result};

/// Where the records come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// URL or path of the CSV file
    pub source: String,

    /// Field delimiter; must be a single ASCII character
    pub delimiter: char,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_DATA_SOURCE.to_string(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub bucket_size_years: NonZeroU32,
    pub metric: BucketMetric,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            bucket_size_years: NonZeroU32::new(DEFAULT_BUCKET_SIZE_YEARS)
                .unwrap_or(NonZeroU32::MIN),
            metric: BucketMetric::default(),
        }
    }
}

impl TimelineConfig {
    pub fn request(&self) -> TimelineRequest {
        TimelineRequest::new(self.bucket_size_years).with_metric(self.metric)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Length of each comparison period in years
    pub period_years: u32,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            period_years: DEFAULT_TREND_PERIOD_YEARS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Number of entries in the recent reports list
    pub recent_reports: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            recent_reports: DEFAULT_RECENT_REPORTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for the crate's own logs when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Global configuration for the surveillance dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub timeline: TimelineConfig,
    pub trends: TrendConfig,
    pub summary: SummaryConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load defaults, the TOML file and the environment
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// read when present and silently skipped otherwise.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let config = match Self::resolve_path(explicit_path)? {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// The config file [`Config::load`] reads, if any
    pub fn resolve_path(explicit_path: Option<&Path>) -> Result<Option<PathBuf>> {
        match explicit_path {
            Some(path) if !path.exists() => Err(Error::configuration(format!(
                "Config file not found: {}",
                path.display()
            ))),
            Some(path) => Ok(Some(path.to_path_buf())),
            None => Ok(default_config_path().filter(|p| p.exists())),
        }
    }

    /// Parse a TOML config file; missing sections and keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `AVIAN_DATA_SOURCE` and `AVIAN_LOG_LEVEL` through a variable lookup
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup(ENV_DATA_SOURCE).filter(|s| !s.trim().is_empty()) {
            self.data.source = source;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|s| !s.trim().is_empty()) {
            self.logging.level = level;
        }
        self
    }

    /// Set the data source URL or path
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.data.source = source.into();
        self
    }

    /// Set the CSV delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.data.delimiter = delimiter;
        self
    }

    /// Set the timeline bucket width
    pub fn with_bucket_size(mut self, years: NonZeroU32) -> Self {
        self.timeline.bucket_size_years = years;
        self
    }

    /// Set what each record contributes to a timeline bucket
    pub fn with_metric(mut self, metric: BucketMetric) -> Self {
        self.timeline.metric = metric;
        self
    }

    /// Set the trend comparison period
    pub fn with_trend_period(mut self, years: u32) -> Self {
        self.trends.period_years = years;
        self
    }

    /// Set the recent reports list length
    pub fn with_recent_reports(mut self, limit: usize) -> Self {
        self.summary.recent_reports = limit;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.data.source.trim().is_empty() {
            return Err(Error::configuration("Data source cannot be empty"));
        }

        if !self.data.delimiter.is_ascii() {
            return Err(Error::configuration(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.data.delimiter
            )));
        }

        if self.trends.period_years == 0 {
            return Err(Error::configuration("Trend period must be at least one year"));
        }

        if self.summary.recent_reports == 0 {
            return Err(Error::configuration(
                "Recent reports limit must be greater than 0",
            ));
        }

        Ok(())
    }
}

/// `<config dir>/avian-surveillance/config.toml` on this platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data.source, "fake_bird_data_switzerland_v2.csv");
        assert_eq!(config.data.delimiter, ',');
        assert_eq!(config.timeline.bucket_size_years.get(), 10);
        assert_eq!(config.timeline.metric, BucketMetric::StrainsDetected);
        assert_eq!(config.trends.period_years, 50);
        assert_eq!(config.summary.recent_reports, 10);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [data]
            source = "https://example.org/birds.csv"

            [timeline]
            metric = "case-total"
            "#,
        )
        .unwrap();

        assert_eq!(config.data.source, "https://example.org/birds.csv");
        assert_eq!(config.data.delimiter, ',');
        assert_eq!(config.timeline.metric, BucketMetric::CaseTotal);
        assert_eq!(config.timeline.bucket_size_years.get(), 10);
        assert_eq!(config.trends.period_years, 50);
    }

    #[test]
    fn test_zero_bucket_size_rejected_by_toml() {
        let result = Config::from_toml_str("[timeline]\nbucket_size_years = 0\n");
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[trends]\nperiod_years = 100\n[summary]\nrecent_reports = 3").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.trends.period_years, 100);
        assert_eq!(config.summary.recent_reports, 3);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_resolve_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        assert_eq!(Config::resolve_path(Some(&path)).unwrap(), Some(path.clone()));
        assert!(Config::resolve_path(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("AVIAN_DATA_SOURCE", "/data/birds.csv"),
            ("AVIAN_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let config =
            Config::default().with_env_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.data.source, "/data/birds.csv");
        assert_eq!(config.logging.level, "debug");

        // Blank values are ignored
        let config = Config::default().with_env_overrides(|_| Some("  ".to_string()));
        assert_eq!(config.data.source, DEFAULT_DATA_SOURCE);
    }

    #[test]
    fn test_builder_pattern() {
        let config = Config::default()
            .with_source("birds.csv")
            .with_delimiter(';')
            .with_bucket_size(NonZeroU32::new(50).unwrap())
            .with_metric(BucketMetric::CaseTotal)
            .with_trend_period(10)
            .with_recent_reports(5)
            .with_log_level("info");

        assert_eq!(config.data.delimiter, ';');
        assert_eq!(config.timeline.request().bucket_size_years.get(), 50);
        assert_eq!(config.timeline.request().metric, BucketMetric::CaseTotal);
        assert_eq!(config.trends.period_years, 10);
        assert_eq!(config.summary.recent_reports, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(Config::default().with_source("  ").validate().is_err());
        assert!(Config::default().with_trend_period(0).validate().is_err());
        assert!(Config::default().with_recent_reports(0).validate().is_err());
        assert!(Config::default().with_delimiter('§').validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default().with_trend_period(500);
        let text = toml::to_string(&config).unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }
}
