//! Domain layer: pure game types and rules.

pub mod board;
pub mod cards_types;
pub mod catalog;
pub mod deck;
pub mod market;
pub mod outcome;
pub mod rules;
pub mod score_track;
pub mod scoring;
pub mod setup;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_piles;
#[cfg(test)]
mod tests_props_scoring;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use cards_types::{CardSide, Kingdom, ObjectiveCard, PileKind, PlayableCard, StarterCard};
pub use deck::Deck;
pub use market::{Market, MarketSlot, MarketView};
pub use score_track::ScoreTrack;
