//! Rule engine with scripted objective scores.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use codex_backend::adapters::BasicRuleEngine;
use codex_backend::domain::board::PlayerBoard;
use codex_backend::domain::{CardSide, ObjectiveCard, PlayableCard, StarterCard};
use codex_backend::{PlayerId, RuleEngine};

/// Tracks boards like [`BasicRuleEngine`] but returns fixed objective
/// scores: `personal[player]` for the secret objective and
/// `common[player]` for each of the two common objectives.
#[derive(Default)]
pub struct ScriptedRules {
    boards: BasicRuleEngine,
    personal: HashMap<PlayerId, u32>,
    common: HashMap<PlayerId, u32>,
    starters_applied: AtomicUsize,
}

impl ScriptedRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_personal(mut self, player: &PlayerId, points: u32) -> Self {
        self.personal.insert(player.clone(), points);
        self
    }

    pub fn with_common(mut self, player: &PlayerId, points: u32) -> Self {
        self.common.insert(player.clone(), points);
        self
    }

    pub fn starters_applied(&self) -> usize {
        self.starters_applied.load(Ordering::SeqCst)
    }
}

impl RuleEngine for ScriptedRules {
    fn apply_starter_card(&self, player: &PlayerId, card: &StarterCard, side: CardSide) {
        self.starters_applied.fetch_add(1, Ordering::SeqCst);
        self.boards.apply_starter_card(player, card, side);
    }

    fn deal_hand(&self, player: &PlayerId, cards: Vec<PlayableCard>) {
        self.boards.deal_hand(player, cards);
    }

    fn take_card(&self, player: &PlayerId, card: PlayableCard) {
        self.boards.take_card(player, card);
    }

    fn objective_score(&self, player: &PlayerId, _objective: &ObjectiveCard) -> u32 {
        self.common.get(player).copied().unwrap_or(0)
    }

    fn personal_objective_score(&self, player: &PlayerId, _objective: &ObjectiveCard) -> u32 {
        self.personal.get(player).copied().unwrap_or(0)
    }

    fn board(&self, player: &PlayerId) -> PlayerBoard {
        self.boards.board(player)
    }

    fn restore_board(&self, player: &PlayerId, board: PlayerBoard) {
        self.boards.restore_board(player, board);
    }
}
