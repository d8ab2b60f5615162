//! End-of-match scoring: objective points, winner selection, final ranking.

use serde::{Deserialize, Serialize};

use crate::domain::score_track::ScoreTrack;
use crate::domain::state::PlayerId;

/// One line of the end-of-match report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub player: PlayerId,
    pub score: u32,
    /// Points earned from objectives at the end (personal + both common).
    pub objective_score: u32,
}

/// Result of settling the ledger at the end of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub winners: Vec<PlayerId>,
    /// Total score descending; equal totals keep seating order.
    pub ranking: Vec<RankedPlayer>,
}

/// Add each player's objective points to the ledger and decide the winners.
///
/// Highest total wins. Tied leaders are separated by objective points only;
/// leaders still tied on those all win.
pub fn settle(track: &mut ScoreTrack, objective_scores: &[(PlayerId, u32)]) -> Standings {
    for (player, points) in objective_scores {
        track.add_score(player, *points);
    }

    let objective_of = |player: &PlayerId| {
        objective_scores
            .iter()
            .find(|(p, _)| p == player)
            .map_or(0, |(_, s)| *s)
    };

    let leaders = track.leaders();
    let winners = if leaders.len() <= 1 {
        leaders
    } else {
        let best = leaders.iter().map(|p| objective_of(p)).max().unwrap_or(0);
        leaders
            .into_iter()
            .filter(|p| objective_of(p) == best)
            .collect()
    };

    let ranking = track
        .ranking()
        .into_iter()
        .map(|(player, score)| RankedPlayer {
            objective_score: objective_of(&player),
            player,
            score,
        })
        .collect();

    Standings { winners, ranking }
}

/// Ranking without scoring anything, used when a match is abandoned in setup.
pub fn unscored(track: &ScoreTrack) -> Standings {
    Standings {
        winners: Vec::new(),
        ranking: track
            .ranking()
            .into_iter()
            .map(|(player, score)| RankedPlayer {
                player,
                score,
                objective_score: 0,
            })
            .collect(),
    }
}
