use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Kingdom, ObjectiveCard, PlayableCard};
use crate::domain::market::MarketView;
use crate::domain::state::{MatchPhase, PlayerId, SessionId};

/// Full match state as seen by one player.
///
/// Public table state plus the viewer's own hand and personal objective.
/// Other players' hands are never included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub session_id: SessionId,
    pub phase: MatchPhase,
    pub seating: Vec<PlayerId>,
    pub current_player: Option<PlayerId>,
    pub market: MarketView,
    pub resource_top: Option<Kingdom>,
    pub gold_top: Option<Kingdom>,
    pub common_objectives: Vec<ObjectiveCard>,
    pub scores: Vec<(PlayerId, u32)>,
    pub last_round: bool,
    pub viewer: ViewerState,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerState {
    pub player: PlayerId,
    pub hand: Vec<PlayableCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_objective: Option<ObjectiveCard>,
}
