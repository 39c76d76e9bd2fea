use thiserror::Error;

use crate::GridInt;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("viewport of {width}x{height} is too small to hold a grid cell")]
    InvalidBounds { width: GridInt, height: GridInt },

    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, GameError>;
