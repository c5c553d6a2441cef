use std::process::ExitCode;

use clap::Parser;
use tally_tui::{ConfigArgs, config, logging};
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "tally_tui", about = "Sortable, searchable table of your transactions")]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let settings = match config::load(args.config) {
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

    match tally_tui::run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Exiting with error: {err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
