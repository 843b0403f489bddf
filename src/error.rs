//! Admission errors.
//!
//! Every variant is reported to the originating actor only and leaves the
//! session untouched. None of them ends a match.

use thiserror::Error;

use crate::core::{Coordinate, SessionId};
use crate::session::Phase;

/// Reasons an intent is refused before it reaches the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Game not found: {0}")]
    NotFound(SessionId),

    #[error("Game is full: {0}")]
    Full(SessionId),

    #[error("Player is not part of this game")]
    UnknownPlayer,

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Action not allowed during {actual:?} phase (requires {expected:?})")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("All resources must be placed ({placed}/{required})")]
    ResourcesIncomplete { placed: usize, required: usize },

    #[error("Player is already ready")]
    AlreadyReady,

    #[error("Ability not available")]
    AbilityUnavailable,

    #[error("Coordinate {0} is off the grid")]
    OutOfBounds(Coordinate),
}

impl SessionError {
    /// Stable machine-readable code for the wire.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::NotFound(_) => "not-found",
            SessionError::Full(_) => "full",
            SessionError::UnknownPlayer => "unknown-player",
            SessionError::NotYourTurn => "not-your-turn",
            SessionError::WrongPhase { .. } => "wrong-phase",
            SessionError::ResourcesIncomplete { .. } => "resources-incomplete",
            SessionError::AlreadyReady => "already-ready",
            SessionError::AbilityUnavailable => "ability-unavailable",
            SessionError::OutOfBounds(_) => "out-of-bounds",
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
