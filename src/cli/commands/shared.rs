//! Shared utilities for command implementations
//!
//! Logging setup, layered configuration loading, the one-off session load with
//! its spinner, and small output helpers used by every command.

use crate::app::services::csv_ingest::DataSource;
use crate::app::session::DashboardSession;
use crate::cli::args::CommonArgs;
use crate::constants::ENV_DATA_SOURCE;
use crate::{Config, Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What a command did, for the caller's exit handling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandStats {
    /// Records loaded from the source
    pub records_loaded: usize,
    /// Items printed by the command
    pub items_shown: usize,
}

/// Set up structured logging
///
/// `RUST_LOG` wins; otherwise the verbosity flags, then the configured level.
pub fn setup_logging(args: &CommonArgs, config: &Config) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args
        .get_log_level()
        .unwrap_or(config.logging.level.as_str())
        .to_string();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("avian_surveillance={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    for line in describe_configuration(args, config, |key| std::env::var(key).ok()) {
        debug!("{}", line);
    }
    Ok(())
}

/// Where the loaded settings came from, reported once logging is installed
pub fn describe_configuration<F>(args: &CommonArgs, config: &Config, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut lines = Vec::new();

    match Config::resolve_path(args.config_file.as_deref()) {
        Ok(Some(path)) => lines.push(format!("Loaded configuration from {}", path.display())),
        Ok(None) => lines.push("No config file found, using defaults".to_string()),
        Err(e) => lines.push(e.to_string()),
    }

    let env_source = lookup(ENV_DATA_SOURCE).filter(|s| !s.trim().is_empty());
    if args.source.is_none() && env_source.is_some() {
        lines.push(format!("{} overrides data source", ENV_DATA_SOURCE));
    }

    lines.push(format!(
        "Data source: {} (delimiter {:?})",
        config.data.source, config.data.delimiter
    ));
    lines
}

/// Load configuration using layered approach (file -> env -> args)
///
/// `overrides` applies command-specific flags before the final validation.
pub fn load_configuration<F>(args: &CommonArgs, overrides: F) -> Result<Config>
where
    F: FnOnce(Config) -> Config,
{
    args.validate()?;

    let config = Config::load(args.config_file.as_deref())?;
    let config = overrides(apply_cli_overrides(config, args));

    config.validate()?;
    Ok(config)
}

/// Apply the shared CLI flags to configuration
pub fn apply_cli_overrides(mut config: Config, args: &CommonArgs) -> Config {
    if let Some(source) = &args.source {
        config = config.with_source(source.clone());
    }
    if let Some(delimiter) = args.delimiter {
        config = config.with_delimiter(delimiter);
    }
    if let Some(level) = args.get_log_level() {
        config = config.with_log_level(level);
    }
    config
}

/// Ingest the configured source and apply the filter flags
pub async fn load_session(args: &CommonArgs, config: &Config) -> Result<DashboardSession> {
    let source = DataSource::parse(&config.data.source);
    info!("Loading surveillance records from {}", source);

    let spinner = args
        .show_progress()
        .then(|| create_spinner(&format!("Loading {}", source)));

    let loaded = DashboardSession::load(&source, config).await;

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let mut session = loaded?;

    let stats = session.stats();
    if stats.total_rows > 0 && !stats.is_successful() {
        warn!(
            "Only {:.1}% of rows became records ({} skipped)",
            stats.success_rate(),
            stats.rows_skipped
        );
    }

    let filter = args.apply_filters(session.filter().clone())?;
    session.set_filter(filter);

    Ok(session)
}

/// Serialize a report as pretty JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Escape CSV field values
pub fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Format an optional percentage for display
pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.1}%", v))
}

/// Create a spinner for the loading state
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::aggregator::BucketMetric;

    #[test]
    fn test_command_stats_default() {
        let stats = CommandStats::default();
        assert_eq!(stats.records_loaded, 0);
        assert_eq!(stats.items_shown, 0);
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("Mallard"), "Mallard");
        assert_eq!(csv_escape("Swan, Mute"), "\"Swan, Mute\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(12.345)), "12.3%");
        assert_eq!(format_percent(None), "n/a");
    }

    #[test]
    fn test_apply_cli_overrides() {
        let args = CommonArgs {
            source: Some("https://example.org/birds.csv".to_string()),
            delimiter: Some(';'),
            verbose: 2,
            ..CommonArgs::default()
        };

        let config = apply_cli_overrides(Config::default(), &args);

        assert_eq!(config.data.source, "https://example.org/birds.csv");
        assert_eq!(config.data.delimiter, ';');
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_configuration_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timeline]\nmetric = \"case-total\"\n").unwrap();

        let args = CommonArgs {
            config_file: Some(path),
            source: Some("birds.csv".to_string()),
            ..CommonArgs::default()
        };

        let config = load_configuration(&args, |c| c.with_trend_period(10)).unwrap();
        assert_eq!(config.timeline.metric, BucketMetric::CaseTotal);
        assert_eq!(config.data.source, "birds.csv");
        assert_eq!(config.trends.period_years, 10);

        let invalid = load_configuration(&args, |c| c.with_trend_period(0));
        assert!(matches!(invalid, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_describe_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        let args = CommonArgs {
            config_file: Some(path.clone()),
            ..CommonArgs::default()
        };
        let config = Config::default().with_source("/data/birds.csv");
        let env = |key: &str| (key == "AVIAN_DATA_SOURCE").then(|| "/data/birds.csv".to_string());

        let lines = describe_configuration(&args, &config, env);
        assert_eq!(
            lines,
            vec![
                format!("Loaded configuration from {}", path.display()),
                "AVIAN_DATA_SOURCE overrides data source".to_string(),
                "Data source: /data/birds.csv (delimiter ',')".to_string(),
            ]
        );

        // A --source flag wins over the environment
        let flagged = CommonArgs {
            source: Some("other.csv".to_string()),
            ..args
        };
        let lines = describe_configuration(&flagged, &config, env);
        assert_eq!(lines.len(), 2);
    }
}
