use thiserror::Error;

use crate::action::PlayerId;

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("choice {index} is not one of the {available} playable cards")]
    InvalidChoice { index: usize, available: usize },
    #[error("card index {0} is outside the catalog")]
    UnknownCardIndex(usize),
    #[error("encoded card {0} is neither a catalog index nor hand padding")]
    InvalidEncodedCard(i32),
    #[error("unknown color: {0}")]
    UnknownColor(String),
    #[error("deck and discard pile are exhausted")]
    DeckExhausted,
    #[error("game has not been started")]
    NotStarted,
    #[error("game has already been started")]
    AlreadyStarted,
    #[error("game is already over")]
    GameOver,
    #[error("round has no winner yet")]
    NoWinner,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}
