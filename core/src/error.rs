use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board would overlap an existing game")]
    Overlap,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board sides must be between 5 and 50 cells")]
    InvalidSize,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board would extend past the edge of the grid")]
    OutOfBounds,
    #[error("Player already has a game in progress")]
    AlreadyHasGame,
    #[error("No active game at this position")]
    NoActiveGame,
    #[error("No game at this position")]
    NoGame,
    #[error("Game owner does not trust this player")]
    NotTrusted,
    #[error("Player is not allowed to do that")]
    Unauthorized,
    #[error("Mines have already been placed for this game")]
    BoardAlreadyGenerated,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
