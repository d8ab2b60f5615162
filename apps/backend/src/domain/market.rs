//! The face-up market: two slots fed by the resource pile, two by the gold pile.
//!
//! Slot provenance is part of the type: a [`MarketSlot`] always knows which
//! pile refills it, so callers never reason about index parity.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{PileKind, PlayableCard};
use crate::domain::rules::MARKET_SLOTS;

/// Cards as seen by clients, indexed 0..=3 (0-1 resource, 2-3 gold).
pub type MarketView = [Option<PlayableCard>; MARKET_SLOTS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarketSlot {
    source: PileKind,
    position: usize,
}

impl MarketSlot {
    pub const ALL: [MarketSlot; MARKET_SLOTS] = [
        MarketSlot::new(PileKind::Resource, 0),
        MarketSlot::new(PileKind::Resource, 1),
        MarketSlot::new(PileKind::Gold, 0),
        MarketSlot::new(PileKind::Gold, 1),
    ];

    const fn new(source: PileKind, position: usize) -> Self {
        Self { source, position }
    }

    /// Map a client-facing index to a slot; `None` outside 0..=3.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Pile that refills this slot.
    pub fn source(self) -> PileKind {
        self.source
    }

    pub fn index(self) -> usize {
        match self.source {
            PileKind::Resource => self.position,
            PileKind::Gold => 2 + self.position,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    resource: [Option<PlayableCard>; 2],
    gold: [Option<PlayableCard>; 2],
}

impl Market {
    fn slot_mut(&mut self, slot: MarketSlot) -> &mut Option<PlayableCard> {
        match slot.source {
            PileKind::Resource => &mut self.resource[slot.position],
            PileKind::Gold => &mut self.gold[slot.position],
        }
    }

    pub fn get(&self, slot: MarketSlot) -> Option<&PlayableCard> {
        match slot.source {
            PileKind::Resource => self.resource[slot.position].as_ref(),
            PileKind::Gold => self.gold[slot.position].as_ref(),
        }
    }

    /// Empty the slot, returning what it held.
    pub fn take(&mut self, slot: MarketSlot) -> Option<PlayableCard> {
        self.slot_mut(slot).take()
    }

    /// Put `card` (or nothing, once the source pile is exhausted) in the slot.
    pub fn refill(&mut self, slot: MarketSlot, card: Option<PlayableCard>) {
        *self.slot_mut(slot) = card;
    }

    pub fn view(&self) -> MarketView {
        MarketSlot::ALL.map(|slot| self.get(slot).cloned())
    }

    pub fn from_view(view: MarketView) -> Self {
        let [r0, r1, g0, g1] = view;
        Self {
            resource: [r0, r1],
            gold: [g0, g1],
        }
    }

    pub fn is_empty(&self) -> bool {
        MarketSlot::ALL.iter().all(|&slot| self.get(slot).is_none())
    }
}
