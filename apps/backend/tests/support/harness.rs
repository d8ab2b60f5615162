//! Drives a real coordinator through real threads.
//!
//! The harness seats players, runs `start_match` on a named driver thread and
//! reacts to the notifications each player's queue receives, the way a
//! transport layer would.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use codex_backend::adapters::{InMemorySnapshotStore, QueueSink};
use codex_backend::domain::CardSide;
use codex_backend::protocol::Notification;
use codex_backend::{
    Match, MatchConfig, MatchError, MatchOutcome, MatchPhase, PlayerId, RuleEngine, SessionId,
    SessionRegistry, TurnAdvance,
};
use codex_test_support::unique_helpers::unique_player_names;

pub const WAIT: Duration = Duration::from_secs(5);
pub const SHORT_WAIT: Duration = Duration::from_millis(100);

pub struct MatchHarness {
    pub game: Arc<Match>,
    pub players: Vec<PlayerId>,
    pub sinks: Vec<Arc<QueueSink>>,
    pub registry: Arc<SessionRegistry>,
    pub snapshots: Arc<InMemorySnapshotStore>,
    driver: Option<JoinHandle<Result<MatchOutcome, MatchError>>>,
}

impl MatchHarness {
    /// Register and seat `count` uniquely named players.
    pub fn seated(count: usize, config: MatchConfig, rules: Arc<dyn RuleEngine>) -> Self {
        let players: Vec<PlayerId> = unique_player_names(count)
            .into_iter()
            .map(PlayerId::new)
            .collect();
        Self::seated_as(players, config, rules)
    }

    pub fn seated_as(players: Vec<PlayerId>, config: MatchConfig, rules: Arc<dyn RuleEngine>) -> Self {
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
        let game = Arc::new(Match::new(
            SessionId::generate(),
            config,
            Arc::clone(&registry),
            snapshots.clone(),
            rules,
        ));
        for player in &players {
            game.take_seat(player.clone()).expect("seat player");
        }
        Self {
            game,
            players,
            sinks,
            registry,
            snapshots,
            driver: None,
        }
    }

    /// Spawn the driver thread running `start_match`.
    pub fn start(&mut self) {
        let game = Arc::clone(&self.game);
        let handle = thread::Builder::new()
            .name("driver".into())
            .spawn(move || game.start_match())
            .expect("spawn driver");
        self.driver = Some(handle);
    }

    pub fn sink(&self, player: &PlayerId) -> &Arc<QueueSink> {
        let idx = self
            .players
            .iter()
            .position(|p| p == player)
            .expect("known player");
        &self.sinks[idx]
    }

    /// Block until `player` receives a notification matching `pred`.
    pub fn expect<F>(&self, player: &PlayerId, pred: F) -> Notification
    where
        F: Fn(&Notification) -> bool,
    {
        self.sink(player)
            .wait_for(pred, WAIT)
            .unwrap_or_else(|| panic!("{player} never received the expected notification"))
    }

    /// Wait until every player has been assigned a starter card.
    pub fn await_starters(&self) {
        for player in &self.players {
            self.expect(player, |n| matches!(n, Notification::StarterCardAssigned { .. }));
        }
    }

    /// Wait until every player has been offered objectives.
    pub fn await_offers(&self) {
        for player in &self.players {
            self.expect(player, |n| matches!(n, Notification::ObjectivesOffered { .. }));
        }
    }

    /// Wait until every player has received the opening state.
    pub fn await_play(&self) {
        for player in &self.players {
            self.expect(player, |n| matches!(n, Notification::MatchStarted { .. }));
        }
        assert_eq!(self.game.phase(), MatchPhase::Playing);
    }

    /// Start the match and clear both setup barriers with default choices.
    pub fn start_and_complete_setup(&mut self) {
        self.start();
        self.await_starters();
        for player in &self.players {
            self.game
                .choose_starter_side(player, CardSide::Front)
                .expect("choose starter side");
        }
        self.await_offers();
        for player in &self.players {
            self.game.choose_objective(player, 0).expect("choose objective");
        }
        self.await_play();
    }

    /// Advance turns until the match ends.
    pub fn play_out(&self) -> MatchOutcome {
        for _ in 0..1_000 {
            if let TurnAdvance::Ended(outcome) = self.game.next_turn().expect("next turn") {
                return outcome;
            }
        }
        panic!("match did not end");
    }

    /// Join the driver thread and return what `start_match` returned.
    pub fn join(&mut self) -> Result<MatchOutcome, MatchError> {
        self.driver
            .take()
            .expect("driver was started")
            .join()
            .expect("driver thread panicked")
    }

    pub fn driver_finished(&self) -> bool {
        self.driver.as_ref().is_some_and(|h| h.is_finished())
    }
}
