use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Identity of a seated player (the lobby nickname).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Identity of one match session; also the snapshot key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Ulid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Ulid::new())
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Coarse lifecycle of a match.
///
/// `Forming -> Setup -> Playing -> LastRound -> Ended`, with any state able
/// to jump to `Ended` on disconnection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Seats are open.
    Forming,
    /// Piles and market are ready, setup ballots are open.
    Setup,
    /// Turns rotate normally.
    Playing,
    /// End condition observed; every player gets one final turn.
    LastRound,
    /// Match finished (normally or by disconnection).
    Ended,
}

impl MatchPhase {
    /// True while gameplay actions (draws, score updates, turn advance) are allowed.
    pub fn is_in_play(self) -> bool {
        matches!(self, MatchPhase::Playing | MatchPhase::LastRound)
    }
}

impl Display for MatchPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            MatchPhase::Forming => "forming",
            MatchPhase::Setup => "setup",
            MatchPhase::Playing => "playing",
            MatchPhase::LastRound => "last_round",
            MatchPhase::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Player seated after `current` in seating order, wrapping around.
///
/// Returns `None` when `current` is not seated.
pub fn next_in_seating<'a>(seating: &'a [PlayerId], current: &PlayerId) -> Option<&'a PlayerId> {
    let idx = seating.iter().position(|p| p == current)?;
    seating.get((idx + 1) % seating.len())
}
