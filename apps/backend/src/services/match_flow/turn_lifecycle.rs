use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use tracing::{info, warn};

use super::{Match, Outbox, Recipient, SeatTable, SetupStage, Table};
use crate::config::MatchConfig;
use crate::domain::market::Market;
use crate::domain::outcome::{EndReason, MatchOutcome};
use crate::domain::score_track::ScoreTrack;
use crate::domain::scoring;
use crate::domain::snapshot::MatchSnapshot;
use crate::domain::state::{next_in_seating, MatchPhase, PlayerId};
use crate::errors::domain::{MatchError, SeatingKind};
use crate::protocol::Notification;
use crate::services::collaborators::{RuleEngine, SnapshotStore};
use crate::services::registry::SessionRegistry;

/// What a call to [`Match::next_turn`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnAdvance {
    /// Play moved on to this player.
    Next(PlayerId),
    /// The end condition was just reached; this player opens the last round.
    LastRoundStarted(PlayerId),
    /// The last round is over.
    Ended(MatchOutcome),
}

impl Match {
    /// Pass the turn to the next player in seating order.
    ///
    /// Each time the turn comes back to the first player the end condition
    /// (both piles empty, or someone at the winning score) is checked. The
    /// first time it holds the last round starts; the next time the turn
    /// comes back, the match is scored and ends.
    pub fn next_turn(&self) -> Result<TurnAdvance, MatchError> {
        let mut outbox: Outbox = Vec::new();

        let (advance, snapshot, turn) = {
            let mut table = self.table.lock();
            if !table.phase.is_in_play() {
                return Err(MatchError::phase_mismatch(format!(
                    "cannot advance turn during {}",
                    table.phase
                )));
            }
            let (Some(current), Some(first)) = (table.current_player.clone(), table.first_player.clone())
            else {
                return Err(MatchError::phase_mismatch("no turn in progress"));
            };
            let next = next_in_seating(&table.seating, &current)
                .cloned()
                .ok_or_else(|| MatchError::phase_mismatch("current player is not seated"))?;

            let mut advance = TurnAdvance::Next(next.clone());
            if next == first {
                if table.last_round {
                    let outcome = self.finish_locked(&mut table, EndReason::Completed);
                    outbox.push((Recipient::All, ended_notification(&outcome)));
                    let turn = self.delivery_turn();
                    drop(table);
                    self.match_over.notify_all();
                    self.dispatch(outbox, turn);
                    return Ok(TurnAdvance::Ended(outcome));
                }
                if end_condition(&table) {
                    table.last_round = true;
                    table.phase = MatchPhase::LastRound;
                    info!(
                        session = %self.session_id,
                        first_player = %first,
                        scores = ?table.score_track.entries(),
                        "last round begins"
                    );
                    outbox.push((Recipient::All, Notification::LastRound));
                    advance = TurnAdvance::LastRoundStarted(next.clone());
                }
            }

            table.current_player = Some(next.clone());
            outbox.push((Recipient::All, Notification::TurnChanged { player: next.clone() }));
            info!(session = %self.session_id, player = %next, phase = %table.phase, "turn changed");
            (advance, self.snapshot_locked(&table), self.delivery_turn())
        };

        self.persist(&snapshot);
        self.dispatch(outbox, turn);
        Ok(advance)
    }

    /// End the match because a player dropped out.
    ///
    /// During setup nothing is scored and the ballots are discarded; during
    /// play the match is scored as usual but reported without winners. Calling
    /// this on a match that already ended returns the recorded outcome, for any
    /// caller; otherwise `player` must hold a seat.
    pub fn end_for_disconnection(&self, player: &PlayerId) -> Result<MatchOutcome, MatchError> {
        let seated = self.seats.lock().players.contains(player);

        let outcome = {
            let mut table = self.table.lock();
            if let Some(outcome) = table.outcome.clone() {
                return Ok(outcome);
            }
            if !seated {
                return Err(MatchError::seating(SeatingKind::PlayerNotFound));
            }
            let reason = if table.phase.is_in_play() {
                EndReason::DisconnectedDuringPlay
            } else {
                EndReason::DisconnectedDuringSetup
            };
            warn!(
                session = %self.session_id,
                player = %player,
                phase = %table.phase,
                "player disconnected, ending match"
            );
            self.finish_locked(&mut table, reason)
        };

        {
            let mut seats = self.seats.lock();
            seats.started = true;
        }
        // Claimed under the setup lock: choices made before the abandon go out first
        let turn = {
            let mut stage = self.setup.lock();
            stage.abandoned = true;
            stage.ballots = None;
            self.setup_progress.notify_all();
            self.delivery_turn()
        };
        self.match_over.notify_all();

        self.dispatch(vec![(Recipient::All, ended_notification(&outcome))], turn);
        Ok(outcome)
    }

    /// Park the calling thread until the match ends and return its outcome.
    ///
    /// This is the tail of [`Match::start_match`]; a coordinator rebuilt with
    /// [`Match::restore`] runs it directly on its driver thread.
    pub fn resume(&self) -> Result<MatchOutcome, MatchError> {
        let mut table = self.table.lock();
        while table.phase != MatchPhase::Ended {
            self.match_over.wait(&mut table);
        }
        table
            .outcome
            .clone()
            .ok_or_else(|| MatchError::phase_mismatch("match ended without an outcome"))
    }

    /// Rebuild a coordinator from a snapshot taken during play.
    ///
    /// Boards are pushed back into `rules`, and every seated player that has a
    /// sink in `registry` is bound to it; the others can [`Match::reconnect`].
    pub fn restore(
        snapshot: MatchSnapshot,
        config: MatchConfig,
        registry: Arc<SessionRegistry>,
        snapshots: Arc<dyn SnapshotStore>,
        rules: Arc<dyn RuleEngine>,
    ) -> Result<Self, MatchError> {
        if !snapshot.phase.is_in_play() {
            return Err(MatchError::phase_mismatch(format!(
                "cannot restore a match in {}",
                snapshot.phase
            )));
        }

        let mut score_track =
            ScoreTrack::with_winning_score(&snapshot.seating, snapshot.winning_score);
        let mut personal_objectives = HashMap::new();
        for saved in &snapshot.players {
            score_track.add_score(&saved.player, saved.score);
            rules.restore_board(&saved.player, saved.board.clone());
            if let Some(objective) = &saved.personal_objective {
                personal_objectives.insert(saved.player.clone(), objective.clone());
            }
        }

        let sinks = snapshot
            .seating
            .iter()
            .filter_map(|p| registry.sink_for(p).map(|sink| (p.clone(), sink)))
            .collect();
        let seats = SeatTable {
            players: snapshot.seating.clone(),
            sinks,
            started: true,
        };

        let mut table = Table::new(&config);
        table.phase = snapshot.phase;
        table.seating = snapshot.seating;
        table.resource_pile = snapshot.resource_pile;
        table.gold_pile = snapshot.gold_pile;
        table.market = Market::from_view(snapshot.market);
        table.common_objectives = snapshot.common_objectives;
        table.personal_objectives = personal_objectives;
        table.score_track = score_track;
        table.current_player = snapshot.current_player;
        table.first_player = snapshot.first_player;
        table.last_round = snapshot.last_round;

        info!(
            session = %snapshot.session_id,
            phase = %table.phase,
            players = table.seating.len(),
            "match restored from snapshot"
        );

        Ok(Self {
            session_id: snapshot.session_id,
            config,
            registry,
            snapshots,
            rules,
            seats: Mutex::new(seats),
            setup: Mutex::new(SetupStage {
                ballots: None,
                abandoned: false,
                completed: true,
            }),
            setup_progress: Condvar::new(),
            table: Mutex::new(table),
            match_over: Condvar::new(),
            delivery: Mutex::new(()),
        })
    }

    /// Score the match, record the outcome and move to `Ended`.
    fn finish_locked(&self, table: &mut Table, reason: EndReason) -> MatchOutcome {
        let standings = match reason {
            EndReason::DisconnectedDuringSetup => scoring::unscored(&table.score_track),
            EndReason::Completed | EndReason::DisconnectedDuringPlay => {
                let objective_scores: Vec<(PlayerId, u32)> = {
                    let table: &Table = table;
                    table
                        .seating
                        .iter()
                        .map(|player| (player.clone(), self.objective_points(table, player)))
                        .collect()
                };
                scoring::settle(&mut table.score_track, &objective_scores)
            }
        };

        let outcome = MatchOutcome::new(reason, standings);
        table.phase = MatchPhase::Ended;
        table.current_player = None;
        table.outcome = Some(outcome.clone());

        info!(
            session = %self.session_id,
            reason = ?outcome.reason,
            winners_count = outcome.winners_count(),
            winners = ?outcome.winners,
            "match ended"
        );
        outcome
    }

    /// Personal objective plus both common objectives, as scored by the rule engine.
    fn objective_points(&self, table: &Table, player: &PlayerId) -> u32 {
        let personal = table
            .personal_objectives
            .get(player)
            .map_or(0, |objective| self.rules.personal_objective_score(player, objective));
        table
            .common_objectives
            .iter()
            .map(|objective| self.rules.objective_score(player, objective))
            .fold(personal, u32::saturating_add)
    }
}

fn end_condition(table: &Table) -> bool {
    (table.resource_pile.is_empty() && table.gold_pile.is_empty()) || table.score_track.is_finished()
}

fn ended_notification(outcome: &MatchOutcome) -> Notification {
    Notification::MatchEnded {
        winners_count: outcome.winners_count(),
        winners: outcome.winners.clone(),
        ranking: outcome.ranking.clone(),
    }
}
