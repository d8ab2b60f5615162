//! Match coordinator: one instance per game session.
//!
//! The coordinator is a shared-memory monitor. Client-action threads call the
//! seat, setup and gameplay methods; exactly one driver thread runs
//! [`Match::start_match`] (or [`Match::resume`] after a restore) and stays
//! parked until the match ends.
//!
//! Three independent aggregates each sit behind their own mutex: the seat
//! table, the setup stage and the table (piles, market, ledger, turn). No code
//! path holds two of them at once.
//!
//! Notifications are delivered outside the aggregate locks, in mutation order:
//! a mutating call takes the delivery lock before it releases the aggregate it
//! changed and keeps it until its notifications are out. Lock order is
//! table or setup, then delivery, then seats.

mod player_actions;
mod seats;
mod setup;
mod turn_lifecycle;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex, MutexGuard};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use crate::config::MatchConfig;
use crate::domain::cards_types::{ObjectiveCard, PileKind, PlayableCard, StarterCard};
use crate::domain::deck::Deck;
use crate::domain::market::{Market, MarketView};
use crate::domain::outcome::MatchOutcome;
use crate::domain::score_track::ScoreTrack;
use crate::domain::setup::SetupBallots;
use crate::domain::snapshot::{MatchSnapshot, PlayerSnapshot};
use crate::domain::state::{MatchPhase, PlayerId, SessionId};
use crate::protocol::{MatchView, Notification, ViewerState};
use crate::services::collaborators::{MessageSink, RuleEngine, SnapshotStore};
use crate::services::registry::SessionRegistry;

pub use turn_lifecycle::TurnAdvance;

/// Seating order plus each seated player's bound sink.
#[derive(Default)]
struct SeatTable {
    players: Vec<PlayerId>,
    sinks: HashMap<PlayerId, Arc<dyn MessageSink>>,
    started: bool,
}

/// Setup ballots exist only between the start of setup and the moment the
/// driver deals opening hands.
#[derive(Default)]
struct SetupStage {
    ballots: Option<SetupBallots>,
    abandoned: bool,
    completed: bool,
}

struct Table {
    phase: MatchPhase,
    seating: Vec<PlayerId>,
    resource_pile: Deck<PlayableCard>,
    gold_pile: Deck<PlayableCard>,
    starter_pile: Deck<StarterCard>,
    objective_pile: Deck<ObjectiveCard>,
    market: Market,
    common_objectives: Vec<ObjectiveCard>,
    personal_objectives: HashMap<PlayerId, ObjectiveCard>,
    score_track: ScoreTrack,
    current_player: Option<PlayerId>,
    first_player: Option<PlayerId>,
    last_round: bool,
    outcome: Option<MatchOutcome>,
    rng: ChaCha8Rng,
}

impl Table {
    fn new(config: &MatchConfig) -> Self {
        Self {
            phase: MatchPhase::Forming,
            seating: Vec::new(),
            resource_pile: Deck::default(),
            gold_pile: Deck::default(),
            starter_pile: Deck::default(),
            objective_pile: Deck::default(),
            market: Market::default(),
            common_objectives: Vec::new(),
            personal_objectives: HashMap::new(),
            score_track: ScoreTrack::with_winning_score(&[], config.winning_score),
            current_player: None,
            first_player: None,
            last_round: false,
            outcome: None,
            rng: seeded_rng(config.rng_seed),
        }
    }

    fn pile_mut(&mut self, kind: PileKind) -> &mut Deck<PlayableCard> {
        match kind {
            PileKind::Resource => &mut self.resource_pile,
            PileKind::Gold => &mut self.gold_pile,
        }
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// Who a queued notification goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Recipient {
    Player(PlayerId),
    All,
    AllExcept(PlayerId),
}

type Outbox = Vec<(Recipient, Notification)>;

/// Held from the end of a mutation until its notifications are delivered.
type DeliveryTurn<'a> = MutexGuard<'a, ()>;

pub struct Match {
    session_id: SessionId,
    config: MatchConfig,
    registry: Arc<SessionRegistry>,
    snapshots: Arc<dyn SnapshotStore>,
    rules: Arc<dyn RuleEngine>,
    seats: Mutex<SeatTable>,
    setup: Mutex<SetupStage>,
    setup_progress: Condvar,
    table: Mutex<Table>,
    match_over: Condvar,
    delivery: Mutex<()>,
}

impl Match {
    pub fn new(
        session_id: SessionId,
        config: MatchConfig,
        registry: Arc<SessionRegistry>,
        snapshots: Arc<dyn SnapshotStore>,
        rules: Arc<dyn RuleEngine>,
    ) -> Self {
        let table = Table::new(&config);
        Self {
            session_id,
            config,
            registry,
            snapshots,
            rules,
            seats: Mutex::new(SeatTable::default()),
            setup: Mutex::new(SetupStage::default()),
            setup_progress: Condvar::new(),
            table: Mutex::new(table),
            match_over: Condvar::new(),
            delivery: Mutex::new(()),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Seated players in seating order.
    pub fn players(&self) -> Vec<PlayerId> {
        self.seats.lock().players.clone()
    }

    pub fn is_started(&self) -> bool {
        self.seats.lock().started
    }

    pub fn phase(&self) -> MatchPhase {
        self.table.lock().phase
    }

    pub fn market(&self) -> MarketView {
        self.table.lock().market.view()
    }

    /// The two common objectives, empty until play begins.
    pub fn objectives(&self) -> Vec<ObjectiveCard> {
        self.table.lock().common_objectives.clone()
    }

    pub fn personal_objective(&self, player: &PlayerId) -> Option<ObjectiveCard> {
        self.table.lock().personal_objectives.get(player).cloned()
    }

    pub fn score_track(&self) -> ScoreTrack {
        self.table.lock().score_track.clone()
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.table.lock().current_player.clone()
    }

    pub fn first_player(&self) -> Option<PlayerId> {
        self.table.lock().first_player.clone()
    }

    pub fn last_round(&self) -> bool {
        self.table.lock().last_round
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.table.lock().outcome.clone()
    }

    /// Cards left in the (resource, gold) piles.
    pub fn pile_sizes(&self) -> (usize, usize) {
        let table = self.table.lock();
        (table.resource_pile.len(), table.gold_pile.len())
    }

    /// Full state as `viewer` may see it.
    pub fn view_for(&self, viewer: &PlayerId) -> MatchView {
        let table = self.table.lock();
        self.view_locked(&table, viewer)
    }

    /// Capture the complete session state.
    pub fn snapshot(&self) -> MatchSnapshot {
        let table = self.table.lock();
        self.snapshot_locked(&table)
    }

    fn view_locked(&self, table: &Table, viewer: &PlayerId) -> MatchView {
        MatchView {
            session_id: self.session_id,
            phase: table.phase,
            seating: table.seating.clone(),
            current_player: table.current_player.clone(),
            market: table.market.view(),
            resource_top: table.resource_pile.top_kingdom(),
            gold_top: table.gold_pile.top_kingdom(),
            common_objectives: table.common_objectives.clone(),
            scores: table.score_track.entries().to_vec(),
            last_round: table.last_round,
            viewer: ViewerState {
                player: viewer.clone(),
                hand: self.rules.board(viewer).hand,
                personal_objective: table.personal_objectives.get(viewer).cloned(),
            },
        }
    }

    fn snapshot_locked(&self, table: &Table) -> MatchSnapshot {
        let players = table
            .seating
            .iter()
            .map(|player| PlayerSnapshot {
                player: player.clone(),
                board: self.rules.board(player),
                personal_objective: table.personal_objectives.get(player).cloned(),
                score: table.score_track.score(player).unwrap_or(0),
            })
            .collect();

        MatchSnapshot {
            session_id: self.session_id,
            saved_at: time::OffsetDateTime::now_utc().unix_timestamp(),
            phase: table.phase,
            seating: table.seating.clone(),
            players,
            common_objectives: table.common_objectives.clone(),
            resource_pile: table.resource_pile.clone(),
            gold_pile: table.gold_pile.clone(),
            market: table.market.view(),
            current_player: table.current_player.clone(),
            first_player: table.first_player.clone(),
            last_round: table.last_round,
            winning_score: table.score_track.winning_score(),
        }
    }

    /// Write a snapshot; failures are logged and never affect the game.
    fn persist(&self, snapshot: &MatchSnapshot) {
        if let Err(e) = self.snapshots.save(self.session_id, snapshot) {
            warn!(
                session = %self.session_id,
                code = %e.code(),
                error = %e,
                "failed to persist snapshot"
            );
        }
    }

    /// Claim the next delivery slot. Take it while still holding the lock of
    /// the aggregate whose change is being announced.
    fn delivery_turn(&self) -> DeliveryTurn<'_> {
        self.delivery.lock()
    }

    /// Deliver queued notifications, then give up the delivery slot.
    ///
    /// Must be called with no table or setup lock held.
    fn dispatch(&self, outbox: Outbox, _turn: DeliveryTurn<'_>) {
        if outbox.is_empty() {
            return;
        }

        let deliveries: Vec<(PlayerId, Arc<dyn MessageSink>, Notification)> = {
            let seats = self.seats.lock();
            let mut deliveries = Vec::new();
            for (recipient, notification) in outbox {
                for player in &seats.players {
                    let wanted = match &recipient {
                        Recipient::Player(p) => p == player,
                        Recipient::All => true,
                        Recipient::AllExcept(p) => p != player,
                    };
                    if !wanted {
                        continue;
                    }
                    if let Some(sink) = seats.sinks.get(player) {
                        deliveries.push((player.clone(), Arc::clone(sink), notification.clone()));
                    }
                }
            }
            deliveries
        };

        for (player, sink, notification) in deliveries {
            if let Err(e) = sink.deliver(notification) {
                warn!(
                    session = %self.session_id,
                    player = %player,
                    error = %e,
                    "notification delivery failed"
                );
            }
        }
    }
}
