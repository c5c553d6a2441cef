//! Table view of the tally finance tracker.
//!
//! A full-screen, read-only table of every transaction with column sorting
//! and search. It loads the snapshot on its own, so it can run as its own
//! binary or be opened from the text menu.

pub mod config;
pub mod error;
pub mod logging;

mod app;
mod ui;

pub use app::{App, AppState, Dialog, DialogKind, Focus};
pub use config::{AppConfig, ConfigArgs};
pub use error::{AppError, Result};

/// Runs the table view over the configured snapshot.
pub fn run(config: &AppConfig) -> Result<()> {
    app::run_file(&config.data_file)
}
