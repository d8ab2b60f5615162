use dashmap::DashMap;
use tracing::debug;

use crate::domain::board::{PlacedCard, PlayerBoard};
use crate::domain::cards_types::{CardSide, ObjectiveCard, PlayableCard, StarterCard};
use crate::domain::state::PlayerId;
use crate::services::collaborators::RuleEngine;

/// Minimal rule engine: tracks hands and fields, scores objectives by
/// counting held cards of the required kingdom.
#[derive(Default)]
pub struct BasicRuleEngine {
    boards: DashMap<PlayerId, PlayerBoard>,
}

impl BasicRuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn objective_points(&self, player: &PlayerId, objective: &ObjectiveCard) -> u32 {
        let Some(board) = self.boards.get(player) else {
            return 0;
        };
        let needed = objective.requirement.count;
        if needed == 0 {
            return 0;
        }
        let held = board
            .hand
            .iter()
            .filter(|card| card.kingdom == objective.requirement.kingdom)
            .count();
        let held = u32::try_from(held).unwrap_or(u32::MAX);
        objective.points.saturating_mul(held / needed)
    }
}

impl RuleEngine for BasicRuleEngine {
    fn apply_starter_card(&self, player: &PlayerId, card: &StarterCard, side: CardSide) {
        let mut board = self.boards.entry(player.clone()).or_default();
        board.field.push(PlacedCard {
            card: card.id,
            side,
            x: 0,
            y: 0,
        });
        debug!(player = %player, card = card.id, side = ?side, "starter card placed");
    }

    fn deal_hand(&self, player: &PlayerId, cards: Vec<PlayableCard>) {
        self.boards.entry(player.clone()).or_default().hand.extend(cards);
    }

    fn take_card(&self, player: &PlayerId, card: PlayableCard) {
        self.boards.entry(player.clone()).or_default().hand.push(card);
    }

    fn objective_score(&self, player: &PlayerId, objective: &ObjectiveCard) -> u32 {
        self.objective_points(player, objective)
    }

    fn personal_objective_score(&self, player: &PlayerId, objective: &ObjectiveCard) -> u32 {
        self.objective_points(player, objective)
    }

    fn board(&self, player: &PlayerId) -> PlayerBoard {
        self.boards
            .get(player)
            .map(|board| board.value().clone())
            .unwrap_or_default()
    }

    fn restore_board(&self, player: &PlayerId, board: PlayerBoard) {
        self.boards.insert(player.clone(), board);
    }
}
