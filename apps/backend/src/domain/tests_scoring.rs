use crate::domain::score_track::ScoreTrack;
use crate::domain::scoring::{settle, unscored};
use crate::domain::state::PlayerId;

fn track_with(scores: &[(&str, u32)]) -> ScoreTrack {
    let players: Vec<PlayerId> = scores.iter().map(|(p, _)| PlayerId::from(*p)).collect();
    let mut track = ScoreTrack::new(&players);
    for (p, s) in scores {
        track.add_score(&PlayerId::from(*p), *s);
    }
    track
}

fn objectives(scores: &[(&str, u32)]) -> Vec<(PlayerId, u32)> {
    scores.iter().map(|(p, s)| (PlayerId::from(*p), *s)).collect()
}

#[test]
fn unique_leader_wins_outright() {
    let mut track = track_with(&[("ann", 12), ("bob", 9)]);
    let standings = settle(&mut track, &objectives(&[("ann", 2), ("bob", 3)]));
    assert_eq!(standings.winners, vec![PlayerId::from("ann")]);
    assert_eq!(track.score(&"ann".into()), Some(14));
    assert_eq!(track.score(&"bob".into()), Some(12));
}

#[test]
fn tie_on_total_broken_by_objective_points() {
    // A: 18 + 4 = 22, B: 15 + 7 = 22 -> B has more objective points
    let mut track = track_with(&[("a", 18), ("b", 15)]);
    let standings = settle(&mut track, &objectives(&[("a", 4), ("b", 7)]));

    assert_eq!(standings.winners, vec![PlayerId::from("b")]);
    assert_eq!(track.score(&"a".into()), Some(22));
    assert_eq!(track.score(&"b".into()), Some(22));
}

#[test]
fn tie_on_objective_points_keeps_every_tied_leader() {
    let mut track = track_with(&[("a", 10), ("b", 10), ("c", 3)]);
    let standings = settle(&mut track, &objectives(&[("a", 5), ("b", 5), ("c", 5)]));
    assert_eq!(
        standings.winners,
        vec![PlayerId::from("a"), PlayerId::from("b")]
    );
}

#[test]
fn tiebreak_only_considers_tied_leaders() {
    // c has the most objective points but is not among the leaders
    let mut track = track_with(&[("a", 12), ("b", 14), ("c", 2)]);
    let standings = settle(&mut track, &objectives(&[("a", 3), ("b", 1), ("c", 9)]));
    // a: 15, b: 15, c: 11 -> tie between a and b, a wins on objectives
    assert_eq!(standings.winners, vec![PlayerId::from("a")]);
}

#[test]
fn ranking_is_by_total_descending_independent_of_winner() {
    let mut track = track_with(&[("a", 18), ("b", 15), ("c", 21)]);
    let standings = settle(&mut track, &objectives(&[("a", 4), ("b", 7), ("c", 0)]));

    // a = 22, b = 22, c = 21 -> b wins on objective points
    assert_eq!(standings.winners, vec![PlayerId::from("b")]);
    let order: Vec<_> = standings.ranking.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(order, vec!["a", "b", "c"]);
    assert_eq!(standings.ranking[1].objective_score, 7);
}

#[test]
fn settling_a_cloned_ledger_is_deterministic() {
    let track = track_with(&[("a", 7), ("b", 7), ("c", 7), ("d", 1)]);
    let obj = objectives(&[("a", 2), ("b", 3), ("c", 3), ("d", 0)]);

    let mut first = track.clone();
    let mut second = track.clone();
    let s1 = settle(&mut first, &obj);
    let s2 = settle(&mut second, &obj);

    assert_eq!(s1, s2);
    assert_eq!(first, second);
    assert_eq!(s1.winners, vec![PlayerId::from("b"), PlayerId::from("c")]);
}

#[test]
fn unscored_leaves_ledger_untouched() {
    let track = track_with(&[("a", 0), ("b", 0)]);
    let standings = unscored(&track);
    assert!(standings.winners.is_empty());
    assert_eq!(standings.ranking.len(), 2);
    assert!(standings.ranking.iter().all(|r| r.score == 0));
}
