use tracing::{debug, info};

use super::{Match, Recipient, Table};
use crate::domain::cards_types::{PileKind, PlayableCard};
use crate::domain::market::MarketSlot;
use crate::domain::state::PlayerId;
use crate::errors::domain::{MarketChoiceKind, MatchError};
use crate::protocol::{DrawSource, Notification};

impl Match {
    /// Draw the top card of the gold pile for the current player.
    pub fn draw_gold(&self) -> Result<PlayableCard, MatchError> {
        self.draw_from_pile(PileKind::Gold)
    }

    /// Draw the top card of the resource pile for the current player.
    pub fn draw_resource(&self) -> Result<PlayableCard, MatchError> {
        self.draw_from_pile(PileKind::Resource)
    }

    /// Take the face-up card in market slot `index` (0-1 resource, 2-3 gold)
    /// and refill the slot from its own pile.
    ///
    /// An exhausted pile leaves the slot empty; taking from an empty slot is
    /// rejected until something refills it.
    pub fn draw_market(&self, index: usize) -> Result<PlayableCard, MatchError> {
        let slot = MarketSlot::from_index(index)
            .ok_or(MatchError::InvalidMarketChoice(MarketChoiceKind::OutOfBounds(index)))?;

        let (player, card, market_changed, turn) = {
            let mut table = self.table.lock();
            let player = acting_player(&table)?;
            let card = table
                .market
                .take(slot)
                .ok_or(MatchError::InvalidMarketChoice(MarketChoiceKind::EmptySlot(index)))?;

            let replacement = table.pile_mut(slot.source()).draw();
            if replacement.is_none() {
                debug!(
                    session = %self.session_id,
                    index,
                    pile = %slot.source(),
                    "pile exhausted, market slot left empty"
                );
            }
            table.market.refill(slot, replacement);
            self.rules.take_card(&player, card.clone());

            let market_changed = Notification::MarketChanged {
                market: table.market.view(),
                resource_top: table.resource_pile.top_kingdom(),
                gold_top: table.gold_pile.top_kingdom(),
            };
            (player, card, market_changed, self.delivery_turn())
        };

        debug!(session = %self.session_id, player = %player, index, card = card.id, "market card drawn");
        self.dispatch(
            vec![
                (
                    Recipient::Player(player),
                    Notification::CardDrawn {
                        card: card.clone(),
                        source: DrawSource::Market { index },
                    },
                ),
                (Recipient::All, market_changed),
            ],
            turn,
        );
        Ok(card)
    }

    /// Add `delta` points to the current player's score and return the new
    /// total. Whether the caller is that player is the transport's concern.
    pub fn update_score_track(&self, delta: u32) -> Result<u32, MatchError> {
        let (player, score, turn) = {
            let mut table = self.table.lock();
            let player = acting_player(&table)?;
            let score = table
                .score_track
                .add_score(&player, delta)
                .ok_or_else(|| MatchError::phase_mismatch("current player has no ledger entry"))?;
            (player, score, self.delivery_turn())
        };

        info!(session = %self.session_id, player = %player, delta, score, "score updated");
        self.dispatch(
            vec![(Recipient::All, Notification::ScoreChanged { player, score })],
            turn,
        );
        Ok(score)
    }

    fn draw_from_pile(&self, pile: PileKind) -> Result<PlayableCard, MatchError> {
        let (player, card, top_kingdom, turn) = {
            let mut table = self.table.lock();
            let player = acting_player(&table)?;
            let deck = table.pile_mut(pile);
            let card = deck.draw().ok_or(MatchError::EmptyPile(pile))?;
            let top_kingdom = deck.top_kingdom();
            self.rules.take_card(&player, card.clone());
            (player, card, top_kingdom, self.delivery_turn())
        };

        debug!(session = %self.session_id, player = %player, pile = %pile, card = card.id, "pile card drawn");
        self.dispatch(
            vec![
                (
                    Recipient::Player(player.clone()),
                    Notification::CardDrawn {
                        card: card.clone(),
                        source: DrawSource::Pile { pile },
                    },
                ),
                (
                    Recipient::AllExcept(player),
                    Notification::PileTopChanged { pile, top_kingdom },
                ),
            ],
            turn,
        );
        Ok(card)
    }
}

/// The player whose turn it is, provided play is under way.
fn acting_player(table: &Table) -> Result<PlayerId, MatchError> {
    if !table.phase.is_in_play() {
        return Err(MatchError::phase_mismatch(format!(
            "no turn in progress during {}",
            table.phase
        )));
    }
    table
        .current_player
        .clone()
        .ok_or_else(|| MatchError::phase_mismatch("no current player"))
}
