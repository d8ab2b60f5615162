// Proptest generators for domain types.

use std::env;

use proptest::prelude::*;

use crate::domain::cards_types::{Kingdom, PileKind, PlayableCard};
use crate::domain::state::PlayerId;

/// Case count from `PROPTEST_CASES`, low by default for fast CI.
pub fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(32);

    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

pub fn kingdom() -> impl Strategy<Value = Kingdom> {
    prop_oneof![
        Just(Kingdom::Fungi),
        Just(Kingdom::Plant),
        Just(Kingdom::Animal),
        Just(Kingdom::Insect),
    ]
}

pub fn pile_kind() -> impl Strategy<Value = PileKind> {
    prop_oneof![Just(PileKind::Resource), Just(PileKind::Gold)]
}

/// A pile of `len` cards of one kind with distinct ids.
pub fn pile(kind: PileKind, len: usize) -> impl Strategy<Value = Vec<PlayableCard>> {
    prop::collection::vec((kingdom(), 0u32..=3), len).prop_map(move |specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (kingdom, points))| PlayableCard {
                id: u16::try_from(i + 1).unwrap_or(u16::MAX),
                kind,
                kingdom,
                points,
            })
            .collect()
    })
}

/// 2 to 4 distinct player identities in seating order.
pub fn seating() -> impl Strategy<Value = Vec<PlayerId>> {
    (2usize..=4).prop_map(|n| (0..n).map(|i| PlayerId::new(format!("p{i}"))).collect())
}

/// Seating plus one (play score, objective score) pair per player.
pub fn ledger() -> impl Strategy<Value = Vec<(PlayerId, u32, u32)>> {
    seating().prop_flat_map(|players| {
        let n = players.len();
        prop::collection::vec((0u32..=30, 0u32..=12), n).prop_map(move |scores| {
            players
                .iter()
                .cloned()
                .zip(scores)
                .map(|(p, (play, objective))| (p, play, objective))
                .collect()
        })
    })
}
