use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] engine::EngineError),
    #[error(transparent)]
    App(#[from] tally_tui::AppError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Standard input reached end of file while a prompt was waiting.
    #[error("input closed")]
    InputClosed,
}
