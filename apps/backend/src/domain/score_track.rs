use serde::{Deserialize, Serialize};

use crate::domain::rules::WINNING_SCORE;
use crate::domain::state::PlayerId;

/// Cumulative per-player score, kept in seating order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTrack {
    scores: Vec<(PlayerId, u32)>,
    winning_score: u32,
}

impl ScoreTrack {
    pub fn new(players: &[PlayerId]) -> Self {
        Self::with_winning_score(players, WINNING_SCORE)
    }

    pub fn with_winning_score(players: &[PlayerId], winning_score: u32) -> Self {
        Self {
            scores: players.iter().map(|p| (p.clone(), 0)).collect(),
            winning_score,
        }
    }

    /// Add `points` to `player`. Unknown players are ignored and yield `None`.
    pub fn add_score(&mut self, player: &PlayerId, points: u32) -> Option<u32> {
        let entry = self.scores.iter_mut().find(|(p, _)| p == player)?;
        entry.1 = entry.1.saturating_add(points);
        Some(entry.1)
    }

    pub fn score(&self, player: &PlayerId) -> Option<u32> {
        self.scores.iter().find(|(p, _)| p == player).map(|(_, s)| *s)
    }

    pub fn winning_score(&self) -> u32 {
        self.winning_score
    }

    /// True once any player has reached the winning threshold.
    pub fn is_finished(&self) -> bool {
        self.scores.iter().any(|(_, s)| *s >= self.winning_score)
    }

    /// Every player holding the highest score (seating order).
    pub fn leaders(&self) -> Vec<PlayerId> {
        let Some(top) = self.scores.iter().map(|(_, s)| *s).max() else {
            return Vec::new();
        };
        self.scores
            .iter()
            .filter(|(_, s)| *s == top)
            .map(|(p, _)| p.clone())
            .collect()
    }

    /// Players by score descending; equal scores keep seating order.
    pub fn ranking(&self) -> Vec<(PlayerId, u32)> {
        let mut ranked = self.scores.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn entries(&self) -> &[(PlayerId, u32)] {
        &self.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players() -> Vec<PlayerId> {
        vec!["ann".into(), "bob".into(), "cid".into()]
    }

    #[test]
    fn add_score_accumulates() {
        let mut track = ScoreTrack::new(&players());
        assert_eq!(track.add_score(&"bob".into(), 3), Some(3));
        assert_eq!(track.add_score(&"bob".into(), 4), Some(7));
        assert_eq!(track.score(&"bob".into()), Some(7));
        assert_eq!(track.score(&"ann".into()), Some(0));
    }

    #[test]
    fn add_score_unknown_player() {
        let mut track = ScoreTrack::new(&players());
        assert_eq!(track.add_score(&"zed".into(), 3), None);
    }

    #[test]
    fn finished_at_threshold() {
        let mut track = ScoreTrack::new(&players());
        track.add_score(&"cid".into(), 19);
        assert!(!track.is_finished());
        track.add_score(&"cid".into(), 1);
        assert!(track.is_finished());
    }

    #[test]
    fn custom_threshold() {
        let mut track = ScoreTrack::with_winning_score(&players(), 5);
        track.add_score(&"ann".into(), 5);
        assert!(track.is_finished());
    }

    #[test]
    fn leaders_include_ties() {
        let mut track = ScoreTrack::new(&players());
        track.add_score(&"ann".into(), 5);
        track.add_score(&"cid".into(), 5);
        track.add_score(&"bob".into(), 2);
        assert_eq!(track.leaders(), vec![PlayerId::from("ann"), PlayerId::from("cid")]);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let mut track = ScoreTrack::new(&players());
        track.add_score(&"bob".into(), 9);
        track.add_score(&"cid".into(), 4);
        track.add_score(&"ann".into(), 4);
        let ranked: Vec<_> = track.ranking().into_iter().map(|(p, _)| p).collect();
        assert_eq!(ranked, vec![PlayerId::from("bob"), "ann".into(), "cid".into()]);
    }
}
