use sweepfield_core::GameError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Could not find player {0}")]
    PlayerNotFound(String),
    #[error("{owner} does not trust this player")]
    NotTrusted { owner: String },
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Configuration error: {0}")]
    Config(String),
}
