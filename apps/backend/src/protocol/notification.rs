use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{CardSide, Kingdom, ObjectiveCard, PileKind, PlayableCard, StarterCard};
use crate::domain::market::MarketView;
use crate::domain::scoring::RankedPlayer;
use crate::domain::state::PlayerId;
use crate::protocol::game_state::MatchView;

/// Where a drawn card came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum DrawSource {
    Pile { pile: PileKind },
    Market { index: usize },
}

/// Everything the coordinator tells clients. Delivered through a
/// [`MessageSink`](crate::services::collaborators::MessageSink).
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    PlayerJoined {
        player: PlayerId,
        seated: Vec<PlayerId>,
    },
    PlayerLeft {
        player: PlayerId,
        seated: Vec<PlayerId>,
    },
    StarterCardAssigned {
        card: StarterCard,
    },
    StarterSideChosen {
        player: PlayerId,
        side: CardSide,
    },
    ObjectivesOffered {
        objectives: [ObjectiveCard; 2],
    },
    MatchStarted {
        view: MatchView,
    },
    /// Private to the drawing player.
    CardDrawn {
        card: PlayableCard,
        source: DrawSource,
    },
    /// Sent to everyone except the drawing player: only the new top kingdom.
    PileTopChanged {
        pile: PileKind,
        top_kingdom: Option<Kingdom>,
    },
    MarketChanged {
        market: MarketView,
        resource_top: Option<Kingdom>,
        gold_top: Option<Kingdom>,
    },
    ScoreChanged {
        player: PlayerId,
        score: u32,
    },
    TurnChanged {
        player: PlayerId,
    },
    LastRound,
    MatchEnded {
        winners_count: i32,
        winners: Vec<PlayerId>,
        ranking: Vec<RankedPlayer>,
    },
    StateSync {
        view: MatchView,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_are_tagged_snake_case() {
        let n = Notification::TurnChanged {
            player: PlayerId::from("ann"),
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "turn_changed");
        assert_eq!(json["player"], "ann");

        let json = serde_json::to_value(Notification::LastRound).unwrap();
        assert_eq!(json["type"], "last_round");
    }

    #[test]
    fn draw_source_encoding() {
        let n = Notification::PileTopChanged {
            pile: PileKind::Gold,
            top_kingdom: Some(Kingdom::Insect),
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["pile"], "gold");
        assert_eq!(json["top_kingdom"], "insect");

        let source = serde_json::to_value(DrawSource::Market { index: 3 }).unwrap();
        assert_eq!(source["from"], "market");
        assert_eq!(source["index"], 3);
    }
}
