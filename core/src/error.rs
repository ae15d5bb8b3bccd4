use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Choose to reveal (r) or flag (f)")]
    InvalidAction,
    #[error("Position {0:?} is outside the board")]
    IllegalPosition(Coord2),
    #[error("You cannot flag a revealed square")]
    FlagOnRevealed,
    #[error("You cannot reveal a flagged square; flag again to unflag")]
    RevealOnFlagged,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Board shape does not match its tiles")]
    InvalidBoardShape,
    #[error("Tile at {0:?} is inconsistent")]
    InconsistentTile(Coord2),
    #[error("Expected {expected} mines but found {actual}")]
    MineCountMismatch { expected: CellCount, actual: CellCount },
    #[error("Expected {expected} flags but found {actual}")]
    FlagCountMismatch { expected: CellCount, actual: CellCount },
}

impl GameError {
    /// Whether this is a rejected move the player should simply be told about.
    pub const fn is_notice(self) -> bool {
        matches!(self, Self::FlagOnRevealed | Self::RevealOnFlagged)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
