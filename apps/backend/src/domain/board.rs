//! Per-player hand and field, as reported by the rule engine.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{CardId, CardSide, PlayableCard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCard {
    pub card: CardId,
    pub side: CardSide,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBoard {
    pub hand: Vec<PlayableCard>,
    pub field: Vec<PlacedCard>,
}
