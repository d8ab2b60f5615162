//! Property tests for draw piles and the market.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards_types::PileKind;
use crate::domain::deck::Deck;
use crate::domain::market::{Market, MarketSlot};
use crate::domain::test_gens;

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Shuffling permutes a pile without adding or losing cards.
    #[test]
    fn prop_shuffle_preserves_contents(
        cards in test_gens::pile(PileKind::Resource, 40),
        seed in any::<u64>(),
    ) {
        let mut deck = Deck::new(cards.clone());
        deck.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));

        let mut before: Vec<u16> = cards.iter().map(|c| c.id).collect();
        let mut after: Vec<u16> = deck.cards().iter().map(|c| c.id).collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    /// The top kingdom is always the kingdom of the next card drawn.
    #[test]
    fn prop_top_kingdom_predicts_draw(
        cards in test_gens::pile(PileKind::Gold, 12),
    ) {
        let mut deck = Deck::new(cards);
        while let Some(expected) = deck.top_kingdom() {
            let drawn = deck.draw();
            prop_assert_eq!(drawn.map(|c| c.kingdom), Some(expected));
        }
        prop_assert!(deck.draw().is_none());
    }

    /// Repeatedly taking from random slots and refilling from the slot's own
    /// pile never puts a card of the wrong kind in a slot.
    #[test]
    fn prop_market_slots_keep_their_source(
        resource in test_gens::pile(PileKind::Resource, 10),
        gold in test_gens::pile(PileKind::Gold, 10),
        picks in prop::collection::vec(0usize..4, 1..40),
    ) {
        let mut resource = Deck::new(resource);
        let mut gold = Deck::new(gold);
        let mut market = Market::default();
        for slot in MarketSlot::ALL {
            let pile = match slot.source() {
                PileKind::Resource => &mut resource,
                PileKind::Gold => &mut gold,
            };
            market.refill(slot, pile.draw());
        }

        for index in picks {
            let Some(slot) = MarketSlot::from_index(index) else {
                continue;
            };
            if market.take(slot).is_none() {
                continue;
            }
            let pile = match slot.source() {
                PileKind::Resource => &mut resource,
                PileKind::Gold => &mut gold,
            };
            market.refill(slot, pile.draw());

            for (i, card) in market.view().iter().enumerate() {
                if let Some(card) = card {
                    let expected = if i < 2 { PileKind::Resource } else { PileKind::Gold };
                    prop_assert_eq!(card.kind, expected, "slot {} holds a {} card", i, card.kind);
                }
            }
        }
    }
}
