//! Settings shared by both front ends.
//!
//! Layers, lowest to highest: built-in defaults, the optional TOML file,
//! `TALLY_*` environment variables, command line flags.

use std::path::PathBuf;

use clap::Args;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tally.toml";
const ENV_PREFIX: &str = "TALLY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON snapshot holding every transaction.
    pub data_file: PathBuf,
    pub log_level: String,
    /// When set, logs are appended here instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("transactions.json"),
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

/// Command line flags every binary flattens into its own parser.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override the snapshot file (default: transactions.json).
    #[arg(long)]
    pub data_file: Option<PathBuf>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
    /// Write logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub fn load(args: ConfigArgs) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_file) = args.data_file {
        settings.data_file = data_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_then_flag_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(
            &path,
            "data_file = \"ledger/money.json\"\nlog_level = \"debug\"\n",
        )
        .unwrap();

        let args = ConfigArgs {
            config: Some(path.display().to_string()),
            ..ConfigArgs::default()
        };
        let settings = load(args.clone()).unwrap();
        assert_eq!(settings.data_file, PathBuf::from("ledger/money.json"));
        assert_eq!(settings.log_level, "debug");
        assert!(settings.log_file.is_none());

        let settings = load(ConfigArgs {
            data_file: Some(PathBuf::from("other.json")),
            log_file: Some(PathBuf::from("tally.log")),
            ..args
        })
        .unwrap();
        assert_eq!(settings.data_file, PathBuf::from("other.json"));
        assert_eq!(settings.log_file, Some(PathBuf::from("tally.log")));
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let args = ConfigArgs {
            config: Some(dir.path().join("absent.toml").display().to_string()),
            ..ConfigArgs::default()
        };
        let settings = load(args).unwrap();
        assert_eq!(settings.log_level, AppConfig::default().log_level);
    }
}
