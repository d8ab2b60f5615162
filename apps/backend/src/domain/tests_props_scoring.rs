//! Property tests for end-of-match scoring.

use proptest::prelude::*;

use crate::domain::score_track::ScoreTrack;
use crate::domain::scoring::settle;
use crate::domain::state::PlayerId;
use crate::domain::test_gens;

fn split(ledger: &[(PlayerId, u32, u32)]) -> (ScoreTrack, Vec<(PlayerId, u32)>) {
    let players: Vec<PlayerId> = ledger.iter().map(|(p, _, _)| p.clone()).collect();
    let mut track = ScoreTrack::new(&players);
    for (p, play, _) in ledger {
        track.add_score(p, *play);
    }
    let objectives = ledger.iter().map(|(p, _, o)| (p.clone(), *o)).collect();
    (track, objectives)
}

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Settling a cloned ledger twice gives identical standings.
    #[test]
    fn prop_settle_is_deterministic(ledger in test_gens::ledger()) {
        let (track, objectives) = split(&ledger);
        let mut first = track.clone();
        let mut second = track;
        prop_assert_eq!(settle(&mut first, &objectives), settle(&mut second, &objectives));
        prop_assert_eq!(first, second);
    }

    /// Winners always hold the top total, and among them the top objective score.
    #[test]
    fn prop_winners_hold_top_total(ledger in test_gens::ledger()) {
        let (mut track, objectives) = split(&ledger);
        let standings = settle(&mut track, &objectives);

        prop_assert!(!standings.winners.is_empty());
        let top = standings.ranking.iter().map(|r| r.score).max().unwrap_or(0);
        let best_objective = standings
            .ranking
            .iter()
            .filter(|r| r.score == top)
            .map(|r| r.objective_score)
            .max()
            .unwrap_or(0);
        for winner in &standings.winners {
            let entry = standings.ranking.iter().find(|r| &r.player == winner).unwrap();
            prop_assert_eq!(entry.score, top);
            prop_assert_eq!(entry.objective_score, best_objective);
        }
    }

    /// The ranking lists every player once, totals descending.
    #[test]
    fn prop_ranking_is_sorted(ledger in test_gens::ledger()) {
        let (mut track, objectives) = split(&ledger);
        let standings = settle(&mut track, &objectives);

        prop_assert_eq!(standings.ranking.len(), ledger.len());
        for pair in standings.ranking.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for (p, play, objective) in &ledger {
            let entry = standings.ranking.iter().find(|r| &r.player == p).unwrap();
            prop_assert_eq!(entry.score, play + objective);
        }
    }
}
