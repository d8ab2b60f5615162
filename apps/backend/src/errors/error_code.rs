//! Error codes reported to clients.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! a transport layer puts on the wire.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Seating
    /// All four seats are taken
    MatchFull,
    /// Seats are closed once the match starts
    MatchAlreadyStarted,
    /// Identity already holds a seat
    AlreadySeated,
    /// Identity is not seated or has no registered sink
    PlayerNotFound,
    /// Start attempted with fewer than 2 or more than 4 players
    InvalidPlayerCount,

    // Setup
    /// Setup choice made before its ballot exists
    NotPermittedYet,
    /// Setup choice repeated
    AlreadyChosen,

    // Gameplay
    /// Draw attempted on an exhausted pile
    EmptyPile,
    /// Market index out of bounds or slot empty
    InvalidMarketChoice,
    /// Action not allowed in the current phase
    PhaseMismatch,
    /// Malformed request parameter
    InvalidParameter,

    // System Errors
    /// Configuration error
    ConfigError,
    /// Snapshot could not be written or read
    PersistenceError,
    /// Snapshot could not be encoded or decoded
    SerializationError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MatchFull => "MATCH_FULL",
            Self::MatchAlreadyStarted => "MATCH_ALREADY_STARTED",
            Self::AlreadySeated => "ALREADY_SEATED",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",

            Self::NotPermittedYet => "NOT_PERMITTED_YET",
            Self::AlreadyChosen => "ALREADY_CHOSEN",

            Self::EmptyPile => "EMPTY_PILE",
            Self::InvalidMarketChoice => "INVALID_MARKET_CHOICE",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::InvalidParameter => "INVALID_PARAMETER",

            Self::ConfigError => "CONFIG_ERROR",
            Self::PersistenceError => "PERSISTENCE_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const ALL: [ErrorCode; 14] = [
        ErrorCode::MatchFull,
        ErrorCode::MatchAlreadyStarted,
        ErrorCode::AlreadySeated,
        ErrorCode::PlayerNotFound,
        ErrorCode::InvalidPlayerCount,
        ErrorCode::NotPermittedYet,
        ErrorCode::AlreadyChosen,
        ErrorCode::EmptyPile,
        ErrorCode::InvalidMarketChoice,
        ErrorCode::PhaseMismatch,
        ErrorCode::InvalidParameter,
        ErrorCode::ConfigError,
        ErrorCode::PersistenceError,
        ErrorCode::SerializationError,
    ];

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::MatchFull.as_str(), "MATCH_FULL");
        assert_eq!(ErrorCode::MatchAlreadyStarted.as_str(), "MATCH_ALREADY_STARTED");
        assert_eq!(ErrorCode::NotPermittedYet.as_str(), "NOT_PERMITTED_YET");
        assert_eq!(ErrorCode::InvalidMarketChoice.as_str(), "INVALID_MARKET_CHOICE");
        assert_eq!(ErrorCode::PersistenceError.as_str(), "PERSISTENCE_ERROR");
    }

    #[test]
    fn test_codes_are_unique_and_screaming_snake() {
        let mut seen = HashSet::new();
        for code in ALL {
            let s = code.as_str();
            assert!(seen.insert(s), "duplicate code {s}");
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::EmptyPile), "EMPTY_PILE");
        assert_eq!(format!("{}", ErrorCode::AlreadyChosen), "ALREADY_CHOSEN");
    }
}
