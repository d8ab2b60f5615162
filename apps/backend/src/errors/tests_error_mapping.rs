// Unit tests for error mapping between the match taxonomy and AppError
use std::error::Error as _;
use std::io;

use crate::domain::cards_types::PileKind;
use crate::errors::domain::{MarketChoiceKind, MatchError, SeatingKind, SetupKind};
use crate::{AppError, ErrorCode};

#[test]
fn match_errors_keep_their_code_through_app_error() {
    let cases = [
        (MatchError::seating(SeatingKind::MatchFull), ErrorCode::MatchFull),
        (
            MatchError::seating(SeatingKind::MatchAlreadyStarted),
            ErrorCode::MatchAlreadyStarted,
        ),
        (MatchError::setup(SetupKind::AlreadyChosen), ErrorCode::AlreadyChosen),
        (MatchError::EmptyPile(PileKind::Resource), ErrorCode::EmptyPile),
        (
            MatchError::InvalidMarketChoice(MarketChoiceKind::OutOfBounds(7)),
            ErrorCode::InvalidMarketChoice,
        ),
        (
            MatchError::InvalidPlayerCount { count: 5 },
            ErrorCode::InvalidPlayerCount,
        ),
    ];

    for (err, code) in cases {
        let app: AppError = err.clone().into();
        assert_eq!(app.code(), code, "{err}");
        assert_eq!(app.to_string(), err.to_string());
    }
}

#[test]
fn persistence_error_keeps_source() {
    let app = AppError::persistence(
        "write snapshot",
        io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
    );
    assert_eq!(app.code(), ErrorCode::PersistenceError);
    assert!(app.source().is_some());
}

#[test]
fn config_error_code() {
    let app = AppError::config("CODEX_RNG_SEED is not a number");
    assert_eq!(app.code().as_str(), "CONFIG_ERROR");
    assert_eq!(
        app.to_string(),
        "Configuration error: CODEX_RNG_SEED is not a number"
    );
}
