use std::{io, path::Path, process::ExitCode};

use clap::Parser;
use engine::{Store, snapshot};
use tally_tui::{AppConfig, ConfigArgs, config, logging};
use tracing::error;

use crate::{
    error::Result,
    menu::{Menu, TableView},
    prompt::Prompter,
};

mod error;
mod menu;
mod prompt;

#[derive(Debug, Parser)]
#[command(name = "tally", about = "Personal finance tracker")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

/// Opens the table view in this process, on the terminal the menu uses.
struct EmbeddedTable {
    settings: AppConfig,
}

impl TableView for EmbeddedTable {
    fn open(&mut self, data_file: &Path) -> Result<()> {
        let settings = AppConfig {
            data_file: data_file.to_path_buf(),
            ..self.settings.clone()
        };
        tally_tui::run(&settings)?;
        Ok(())
    }
}

fn run(settings: AppConfig) -> Result<()> {
    let store = match snapshot::load_existing(&settings.data_file)? {
        Some(store) => {
            println!("Transactions loaded successfully.");
            store
        }
        None => {
            println!("No transactions file found.");
            Store::new()
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let prompter = Prompter::new(stdin.lock(), stdout.lock());
    let data_file = settings.data_file.clone();
    let table = EmbeddedTable { settings };

    Menu::new(prompter, store, data_file, table).run()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match config::load(cli.config) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = logging::init(&settings) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Exiting with error: {err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
