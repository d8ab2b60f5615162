//! Match-level error type returned synchronously to the calling client thread.
//!
//! This error type is transport-agnostic. Each variant maps to a stable
//! [`ErrorCode`] so the transport layer never matches on message strings.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::domain::cards_types::PileKind;
use crate::errors::error_code::ErrorCode;

/// Seat management failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeatingKind {
    MatchFull,
    MatchAlreadyStarted,
    AlreadySeated,
    PlayerNotFound,
}

/// Setup ballot failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SetupKind {
    /// The ballot (or the field being decided) does not exist yet.
    NotPermittedYet,
    /// The player already decided this field.
    AlreadyChosen,
}

/// Market draw failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MarketChoiceKind {
    OutOfBounds(usize),
    EmptySlot(usize),
}

impl Display for SeatingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SeatingKind::MatchFull => write!(f, "match is full"),
            SeatingKind::MatchAlreadyStarted => write!(f, "match already started"),
            SeatingKind::AlreadySeated => write!(f, "player already seated"),
            SeatingKind::PlayerNotFound => write!(f, "player not found"),
        }
    }
}

impl Display for SetupKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SetupKind::NotPermittedYet => write!(f, "choice not permitted yet"),
            SetupKind::AlreadyChosen => write!(f, "choice already made"),
        }
    }
}

impl Display for MarketChoiceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MarketChoiceKind::OutOfBounds(i) => write!(f, "slot {i} out of bounds"),
            MarketChoiceKind::EmptySlot(i) => write!(f, "slot {i} is empty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("seating error: {0}")]
    Seating(SeatingKind),
    #[error("setup error: {0}")]
    Setup(SetupKind),
    #[error("{0} pile is empty")]
    EmptyPile(PileKind),
    #[error("invalid market choice: {0}")]
    InvalidMarketChoice(MarketChoiceKind),
    #[error("invalid player count: {count} (a match needs 2 to 4 players)")]
    InvalidPlayerCount { count: usize },
    /// Malformed request parameter, outside the game's own taxonomy.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("phase mismatch: {0}")]
    PhaseMismatch(String),
}

impl MatchError {
    pub fn seating(kind: SeatingKind) -> Self {
        Self::Seating(kind)
    }

    pub fn setup(kind: SetupKind) -> Self {
        Self::Setup(kind)
    }

    pub fn invalid_parameter(detail: impl Into<String>) -> Self {
        Self::InvalidParameter(detail.into())
    }

    pub fn phase_mismatch(detail: impl Into<String>) -> Self {
        Self::PhaseMismatch(detail.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            MatchError::Seating(SeatingKind::MatchFull) => ErrorCode::MatchFull,
            MatchError::Seating(SeatingKind::MatchAlreadyStarted) => ErrorCode::MatchAlreadyStarted,
            MatchError::Seating(SeatingKind::AlreadySeated) => ErrorCode::AlreadySeated,
            MatchError::Seating(SeatingKind::PlayerNotFound) => ErrorCode::PlayerNotFound,
            MatchError::Setup(SetupKind::NotPermittedYet) => ErrorCode::NotPermittedYet,
            MatchError::Setup(SetupKind::AlreadyChosen) => ErrorCode::AlreadyChosen,
            MatchError::EmptyPile(_) => ErrorCode::EmptyPile,
            MatchError::InvalidMarketChoice(_) => ErrorCode::InvalidMarketChoice,
            MatchError::InvalidPlayerCount { .. } => ErrorCode::InvalidPlayerCount,
            MatchError::InvalidParameter(_) => ErrorCode::InvalidParameter,
            MatchError::PhaseMismatch(_) => ErrorCode::PhaseMismatch,
        }
    }
}
