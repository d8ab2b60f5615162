//! Serializable capture of a whole session, written for restart recovery.

use serde::{Deserialize, Serialize};

use crate::domain::board::PlayerBoard;
use crate::domain::cards_types::{ObjectiveCard, PlayableCard};
use crate::domain::deck::Deck;
use crate::domain::market::MarketView;
use crate::domain::state::{MatchPhase, PlayerId, SessionId};

/// One seated player's recoverable state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub player: PlayerId,
    pub board: PlayerBoard,
    pub personal_objective: Option<ObjectiveCard>,
    pub score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub session_id: SessionId,
    /// Unix timestamp (seconds) at which the snapshot was taken.
    pub saved_at: i64,
    pub phase: MatchPhase,
    /// Seating order; `players` follows the same order.
    pub seating: Vec<PlayerId>,
    pub players: Vec<PlayerSnapshot>,
    pub common_objectives: Vec<ObjectiveCard>,
    pub resource_pile: Deck<PlayableCard>,
    pub gold_pile: Deck<PlayableCard>,
    pub market: MarketView,
    pub current_player: Option<PlayerId>,
    pub first_player: Option<PlayerId>,
    pub last_round: bool,
    pub winning_score: u32,
}

impl MatchSnapshot {
    pub fn player(&self, player: &PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| &p.player == player)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
