use std::{fs::OpenOptions, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

const CRATES: [&str; 3] = ["engine", "tally", "tally_tui"];

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when present; otherwise the configured level applies to
/// this workspace's crates only.
pub fn init(config: &AppConfig) -> Result<()> {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(default_directives(&config.log_level)),
    };

    let writer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.log_file.is_none())
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}

fn default_directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_workspace_crates() {
        assert_eq!(
            default_directives("info"),
            "engine=info,tally=info,tally_tui=info"
        );
    }
}
