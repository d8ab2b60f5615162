use std::ops::RangeInclusive;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Score that triggers the last round unless configured otherwise.
pub const WINNING_SCORE: u32 = 20;

pub const MARKET_SLOTS: usize = 4;
pub const OFFERED_OBJECTIVES: usize = 2;
pub const COMMON_OBJECTIVES: usize = 2;

// Opening hand: two resource cards then one gold card.
pub const OPENING_RESOURCE_CARDS: usize = 2;
pub const OPENING_GOLD_CARDS: usize = 1;

pub fn valid_player_counts() -> RangeInclusive<usize> {
    MIN_PLAYERS..=MAX_PLAYERS
}
