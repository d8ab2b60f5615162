use serde::{Deserialize, Serialize};

use crate::domain::scoring::{RankedPlayer, Standings};
use crate::domain::state::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Turn rotation reached the end of the last round.
    Completed,
    /// A player disconnected while turns were being played.
    DisconnectedDuringPlay,
    /// A player disconnected before both setup barriers were cleared.
    DisconnectedDuringSetup,
}

/// How a match ended and who won it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub reason: EndReason,
    pub winners: Vec<PlayerId>,
    pub ranking: Vec<RankedPlayer>,
}

impl MatchOutcome {
    pub fn new(reason: EndReason, standings: Standings) -> Self {
        Self {
            reason,
            winners: standings.winners,
            ranking: standings.ranking,
        }
    }

    /// Wire-level winner count: `-1` ended in setup, `0` ended by
    /// disconnection during play, `>= 1` ended normally.
    pub fn winners_count(&self) -> i32 {
        match self.reason {
            EndReason::Completed => i32::try_from(self.winners.len()).unwrap_or(i32::MAX),
            EndReason::DisconnectedDuringPlay => 0,
            EndReason::DisconnectedDuringSetup => -1,
        }
    }
}
