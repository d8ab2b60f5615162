//! Draw piles.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Kingdom, PlayableCard};

/// Ordered stack of drawable cards. The top of the pile is the last element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck<C> {
    cards: Vec<C>,
}

impl<C> Deck<C> {
    /// Build a pile from cards listed bottom-first.
    pub fn new(cards: Vec<C>) -> Self {
        Self { cards }
    }

    /// Remove and return the top card; `None` once the pile is exhausted.
    pub fn draw(&mut self) -> Option<C> {
        self.cards.pop()
    }

    pub fn peek(&self) -> Option<&C> {
        self.cards.last()
    }

    /// Randomize order in place; the multiset of cards is unchanged.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, bottom-first.
    pub fn cards(&self) -> &[C] {
        &self.cards
    }
}

impl<C> Default for Deck<C> {
    fn default() -> Self {
        Self { cards: Vec::new() }
    }
}

impl Deck<PlayableCard> {
    /// Kingdom of the top card, visible to every player without drawing.
    pub fn top_kingdom(&self) -> Option<Kingdom> {
        self.peek().map(|c| c.kingdom)
    }
}
