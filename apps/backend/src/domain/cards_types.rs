//! Core card-related types: Kingdom, CardSide, PlayableCard, StarterCard, ObjectiveCard

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

pub type CardId = u16;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kingdom {
    Fungi,
    Plant,
    Animal,
    Insect,
}

impl Kingdom {
    pub const ALL: [Kingdom; 4] = [
        Kingdom::Fungi,
        Kingdom::Plant,
        Kingdom::Animal,
        Kingdom::Insect,
    ];
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSide {
    Front,
    Back,
}

/// Which of the two playable-card piles a card (or market slot) belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PileKind {
    Resource,
    Gold,
}

impl Display for PileKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PileKind::Resource => f.write_str("resource"),
            PileKind::Gold => f.write_str("gold"),
        }
    }
}

/// A resource or gold card: the only cards that live in hands and the market.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PlayableCard {
    pub id: CardId,
    pub kind: PileKind,
    pub kingdom: Kingdom,
    pub points: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct StarterCard {
    pub id: CardId,
}

/// "Hold `count` cards of `kingdom`".
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ObjectiveRequirement {
    pub kingdom: Kingdom,
    pub count: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ObjectiveCard {
    pub id: CardId,
    pub points: u32,
    pub requirement: ObjectiveRequirement,
}
