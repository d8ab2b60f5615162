//! Runs one complete match in memory.
//!
//! Every player is a thread that reacts only to the notifications in its own
//! queue, plus one driver thread running `start_match`: the same shape a
//! networked deployment has, without the network.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use codex_backend::adapters::{BasicRuleEngine, InMemorySnapshotStore, QueueSink};
use codex_backend::domain::scoring::RankedPlayer;
use codex_backend::domain::CardSide;
use codex_backend::protocol::Notification;
use codex_backend::{
    EndReason, Match, MatchConfig, MatchError, PlayerId, SessionId, SessionRegistry, TurnAdvance,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// How long a player waits for its next cue before giving up and dropping.
const PLAYER_PATIENCE: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SimError {
    #[error("match error: {0}")]
    Match(#[from] MatchError),
    #[error("thread {0} panicked")]
    ThreadPanicked(String),
    #[error("failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub game_num: u32,
    pub seed: u64,
    pub players: Vec<PlayerId>,
    pub reason: EndReason,
    pub winners_count: i32,
    pub winners: Vec<PlayerId>,
    pub ranking: Vec<RankedPlayer>,
    pub turns: u32,
    pub snapshots_written: usize,
    pub duration_ms: f64,
}

pub struct Simulator {
    game_num: u32,
    seed: u64,
    config: MatchConfig,
    player_count: usize,
}

impl Simulator {
    pub fn new(game_num: u32, seed: u64, config: MatchConfig, player_count: usize) -> Self {
        Self {
            game_num,
            seed,
            config: config.with_seed(seed),
            player_count,
        }
    }

    pub fn simulate_game(&self) -> Result<GameResult, SimError> {
        let started = Instant::now();
        let players: Vec<PlayerId> = (0..self.player_count)
            .map(|i| PlayerId::new(format!("g{}-p{i}", self.game_num)))
            .collect();

        let registry = Arc::new(SessionRegistry::new());
        let sinks: Vec<Arc<QueueSink>> = players
            .iter()
            .map(|player| {
                let sink = Arc::new(QueueSink::new());
                registry.register(player.clone(), sink.clone());
                sink
            })
            .collect();
        let snapshots = Arc::new(InMemorySnapshotStore::new());
        let session = SessionId::generate();
        let game = Arc::new(Match::new(
            session,
            self.config.clone(),
            registry,
            snapshots.clone(),
            Arc::new(BasicRuleEngine::new()),
        ));
        for player in &players {
            game.take_seat(player.clone())?;
        }

        let driver = {
            let game = Arc::clone(&game);
            thread::Builder::new()
                .name(format!("driver-{}", self.game_num))
                .spawn(move || game.start_match())?
        };

        let mut seats = Vec::with_capacity(players.len());
        for (seat, (player, sink)) in players.iter().cloned().zip(sinks).enumerate() {
            let game = Arc::clone(&game);
            let rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(seat as u64 + 1));
            let handle = thread::Builder::new()
                .name(player.to_string())
                .spawn(move || SeatBot { game, player, sink, rng }.run())?;
            seats.push(handle);
        }

        let mut turns = 0;
        for handle in seats {
            turns += handle
                .join()
                .map_err(|_| SimError::ThreadPanicked("player".into()))?;
        }
        let outcome = driver
            .join()
            .map_err(|_| SimError::ThreadPanicked("driver".into()))??;

        Ok(GameResult {
            game_num: self.game_num,
            seed: self.seed,
            players,
            reason: outcome.reason,
            winners_count: outcome.winners_count(),
            winners: outcome.winners,
            ranking: outcome.ranking,
            turns,
            snapshots_written: snapshots.save_count(session),
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

/// A player that makes random legal choices.
struct SeatBot {
    game: Arc<Match>,
    player: PlayerId,
    sink: Arc<QueueSink>,
    rng: ChaCha8Rng,
}

impl SeatBot {
    /// Play until the match ends; returns the number of turns taken.
    fn run(mut self) -> u32 {
        if !self.setup() {
            return 0;
        }

        let mut turns = 0;
        loop {
            let Some(cue) = self.next_cue(|n| {
                matches!(
                    n,
                    Notification::MatchStarted { .. }
                        | Notification::TurnChanged { .. }
                        | Notification::MatchEnded { .. }
                )
            }) else {
                return turns;
            };

            let my_turn = match cue {
                Notification::MatchStarted { view } => view.current_player.as_ref() == Some(&self.player),
                Notification::TurnChanged { player } => player == self.player,
                _ => return turns,
            };
            if !my_turn {
                continue;
            }

            turns += 1;
            match self.take_turn() {
                Ok(TurnAdvance::Ended(_)) => return turns,
                Ok(_) => {}
                Err(e) => {
                    warn!(player = %self.player, error = %e, "turn failed");
                    self.drop_out();
                    return turns;
                }
            }
        }
    }

    fn setup(&mut self) -> bool {
        if self
            .next_cue(|n| matches!(n, Notification::StarterCardAssigned { .. }))
            .is_none()
        {
            return false;
        }
        let side = if self.rng.random_bool(0.5) {
            CardSide::Front
        } else {
            CardSide::Back
        };
        if let Err(e) = self.game.choose_starter_side(&self.player, side) {
            warn!(player = %self.player, error = %e, "starter side rejected");
            return false;
        }

        if self
            .next_cue(|n| matches!(n, Notification::ObjectivesOffered { .. }))
            .is_none()
        {
            return false;
        }
        let index = self.rng.random_range(0..2);
        if let Err(e) = self.game.choose_objective(&self.player, index) {
            warn!(player = %self.player, error = %e, "objective rejected");
            return false;
        }
        true
    }

    /// Wait for a notification matching `pred`. A `MatchEnded` always
    /// satisfies the wait; silence past the patience limit counts as a drop.
    fn next_cue<F>(&self, pred: F) -> Option<Notification>
    where
        F: Fn(&Notification) -> bool,
    {
        let cue = self.sink.wait_for(
            |n| pred(n) || matches!(n, Notification::MatchEnded { .. }),
            PLAYER_PATIENCE,
        );
        match cue {
            Some(Notification::MatchEnded { .. }) => None,
            Some(n) => Some(n),
            None => {
                warn!(player = %self.player, "no cue received, dropping out");
                self.drop_out();
                None
            }
        }
    }

    fn drop_out(&self) {
        if let Err(e) = self.game.end_for_disconnection(&self.player) {
            warn!(player = %self.player, error = %e, "could not end the match");
        }
    }

    /// Draw one card from wherever something is left, score a little, pass.
    fn take_turn(&mut self) -> Result<TurnAdvance, MatchError> {
        let first_choice = self.rng.random_range(0..6);
        for offset in 0..6 {
            let drawn = match (first_choice + offset) % 6 {
                0 => self.game.draw_gold(),
                1 => self.game.draw_resource(),
                slot => self.game.draw_market(slot - 2),
            };
            match drawn {
                Ok(card) => {
                    debug!(player = %self.player, card = card.id, "drew");
                    break;
                }
                Err(MatchError::EmptyPile(_) | MatchError::InvalidMarketChoice(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        let delta = self.rng.random_range(0..=3);
        if delta > 0 {
            self.game.update_score_track(delta)?;
        }
        self.game.next_turn()
    }
}
