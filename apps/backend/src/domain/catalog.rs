//! Standard card set: 40 resource, 40 gold, 6 starter and 16 objective cards.

use crate::domain::cards_types::{
    CardId, Kingdom, ObjectiveCard, ObjectiveRequirement, PileKind, PlayableCard, StarterCard,
};

pub const CARDS_PER_KINGDOM: usize = 10;
pub const STARTER_CARDS: usize = 6;

const RESOURCE_FIRST_ID: CardId = 1;
const GOLD_FIRST_ID: CardId = 41;
const STARTER_FIRST_ID: CardId = 81;
const OBJECTIVE_FIRST_ID: CardId = 87;

// Points by position within a kingdom's run of ten.
const RESOURCE_POINTS: [u32; CARDS_PER_KINGDOM] = [0, 0, 0, 0, 0, 0, 0, 1, 1, 1];
const GOLD_POINTS: [u32; CARDS_PER_KINGDOM] = [1, 1, 1, 2, 2, 2, 3, 3, 3, 5];

// (cards required, points) for the four objectives of each kingdom.
const OBJECTIVE_TIERS: [(u32, u32); 4] = [(3, 1), (4, 2), (5, 2), (6, 3)];

fn playable_run(kind: PileKind, first_id: CardId, points: &[u32; CARDS_PER_KINGDOM]) -> Vec<PlayableCard> {
    let mut cards = Vec::with_capacity(CARDS_PER_KINGDOM * Kingdom::ALL.len());
    let mut id = first_id;
    for kingdom in Kingdom::ALL {
        for &pts in points {
            cards.push(PlayableCard {
                id,
                kind,
                kingdom,
                points: pts,
            });
            id += 1;
        }
    }
    cards
}

pub fn resource_cards() -> Vec<PlayableCard> {
    playable_run(PileKind::Resource, RESOURCE_FIRST_ID, &RESOURCE_POINTS)
}

pub fn gold_cards() -> Vec<PlayableCard> {
    playable_run(PileKind::Gold, GOLD_FIRST_ID, &GOLD_POINTS)
}

pub fn starter_cards() -> Vec<StarterCard> {
    (0..STARTER_CARDS as CardId)
        .map(|offset| StarterCard {
            id: STARTER_FIRST_ID + offset,
        })
        .collect()
}

pub fn objective_cards() -> Vec<ObjectiveCard> {
    let mut cards = Vec::with_capacity(OBJECTIVE_TIERS.len() * Kingdom::ALL.len());
    let mut id = OBJECTIVE_FIRST_ID;
    for kingdom in Kingdom::ALL {
        for (count, points) in OBJECTIVE_TIERS {
            cards.push(ObjectiveCard {
                id,
                points,
                requirement: ObjectiveRequirement { kingdom, count },
            });
            id += 1;
        }
    }
    cards
}
