//! Interfaces the coordinator consumes but does not implement.
//!
//! Concrete implementations live in [`crate::adapters`]; tests supply their own.

use crate::domain::board::PlayerBoard;
use crate::domain::cards_types::{CardSide, ObjectiveCard, PlayableCard, StarterCard};
use crate::domain::snapshot::MatchSnapshot;
use crate::domain::state::{PlayerId, SessionId};
use crate::error::AppError;
use crate::protocol::Notification;

/// Per-player outbound channel.
///
/// Delivery is fire-and-forget: implementations must not block the caller,
/// and a failed delivery never rolls back game state.
pub trait MessageSink: Send + Sync {
    fn deliver(&self, notification: Notification) -> Result<(), AppError>;
}

/// Durable storage for full-session snapshots.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, session: SessionId, snapshot: &MatchSnapshot) -> Result<(), AppError>;

    /// Latest snapshot for `session`, if any. Only used at process restart.
    fn load(&self, session: SessionId) -> Result<Option<MatchSnapshot>, AppError>;
}

/// Card placement, hands and objective scoring.
pub trait RuleEngine: Send + Sync {
    /// Place the starter card on the player's field with the chosen side up.
    fn apply_starter_card(&self, player: &PlayerId, card: &StarterCard, side: CardSide);

    /// Give the player their opening hand.
    fn deal_hand(&self, player: &PlayerId, cards: Vec<PlayableCard>);

    /// Add a freshly drawn card to the player's hand.
    fn take_card(&self, player: &PlayerId, card: PlayableCard);

    /// Points `player` earns from a shared objective.
    fn objective_score(&self, player: &PlayerId, objective: &ObjectiveCard) -> u32;

    /// Points `player` earns from their own secret objective.
    fn personal_objective_score(&self, player: &PlayerId, objective: &ObjectiveCard) -> u32;

    /// Current hand and field, for snapshots and views.
    fn board(&self, player: &PlayerId) -> PlayerBoard;

    /// Reinstate a board read back from a snapshot.
    fn restore_board(&self, player: &PlayerId, board: PlayerBoard);
}
