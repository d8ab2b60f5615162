use rand::seq::IndexedRandom;
use tracing::{debug, info};

use super::{DeliveryTurn, Match, Outbox, Recipient, Table};
use crate::domain::cards_types::{CardSide, ObjectiveCard, PlayableCard, StarterCard};
use crate::domain::catalog;
use crate::domain::deck::Deck;
use crate::domain::market::{Market, MarketSlot};
use crate::domain::outcome::MatchOutcome;
use crate::domain::rules::{
    valid_player_counts, COMMON_OBJECTIVES, OPENING_GOLD_CARDS, OPENING_RESOURCE_CARDS,
};
use crate::domain::score_track::ScoreTrack;
use crate::domain::setup::{SetupBallots, SetupStep};
use crate::domain::state::{MatchPhase, PlayerId};
use crate::errors::domain::{MatchError, SeatingKind, SetupKind};
use crate::protocol::Notification;

impl Match {
    /// Run the match from the end of seating to its final outcome.
    ///
    /// Called on the driver thread. Blocks at both setup barriers and then for
    /// the whole of play; returns once the match has ended, normally or by
    /// disconnection.
    pub fn start_match(&self) -> Result<MatchOutcome, MatchError> {
        let players = self.close_seating()?;
        info!(session = %self.session_id, players = players.len(), "match starting");

        let Some(starters) = self.prepare_table(&players) else {
            return self.resume();
        };
        let Some(turn) = self.open_ballots(&starters) else {
            return self.resume();
        };
        self.dispatch(
            starters
                .into_iter()
                .map(|(player, card)| {
                    (
                        Recipient::Player(player),
                        Notification::StarterCardAssigned { card },
                    )
                })
                .collect(),
            turn,
        );

        if !self.await_setup(SetupStep::StarterSide) {
            debug!(session = %self.session_id, "setup abandoned at starter side barrier");
            return self.resume();
        }
        info!(session = %self.session_id, "all starter sides chosen");

        let Some((offers, turn)) = self.offer_objectives(&players)? else {
            return self.resume();
        };
        self.dispatch(
            offers
                .into_iter()
                .map(|(player, objectives)| {
                    (
                        Recipient::Player(player),
                        Notification::ObjectivesOffered { objectives },
                    )
                })
                .collect(),
            turn,
        );

        if !self.await_setup(SetupStep::Objective) {
            debug!(session = %self.session_id, "setup abandoned at objective barrier");
            return self.resume();
        }
        info!(session = %self.session_id, "all objectives chosen");

        self.begin_play()?;
        self.resume()
    }

    /// Choose which side of the assigned starter card faces up.
    pub fn choose_starter_side(&self, player: &PlayerId, side: CardSide) -> Result<(), MatchError> {
        let (decided, total, turn) = {
            let mut stage = self.setup.lock();
            let closed = stage.completed || stage.abandoned;
            let ballots = open_ballots_mut(&mut stage.ballots, closed)?;
            let ballot = ballots.ballot_mut(player)?;
            ballot.choose_starter_side(side)?;
            self.rules
                .apply_starter_card(player, ballot.starter_card(), side);

            let decided = ballots.decided(SetupStep::StarterSide);
            if ballots.is_complete(SetupStep::StarterSide) {
                self.setup_progress.notify_all();
            }
            let total = ballots.len();
            (decided, total, self.delivery_turn())
        };

        info!(
            session = %self.session_id,
            player = %player,
            side = ?side,
            decided,
            total,
            "starter side chosen"
        );
        self.dispatch(
            vec![(
                Recipient::All,
                Notification::StarterSideChosen {
                    player: player.clone(),
                    side,
                },
            )],
            turn,
        );
        Ok(())
    }

    /// Keep one of the two offered objectives as the player's secret objective.
    pub fn choose_objective(&self, player: &PlayerId, index: usize) -> Result<ObjectiveCard, MatchError> {
        let mut stage = self.setup.lock();
        let closed = stage.completed || stage.abandoned;
        let ballots = open_ballots_mut(&mut stage.ballots, closed)?;
        let chosen = ballots.ballot_mut(player)?.choose_objective(index)?.clone();

        let decided = ballots.decided(SetupStep::Objective);
        let total = ballots.len();
        if ballots.is_complete(SetupStep::Objective) {
            self.setup_progress.notify_all();
        }
        drop(stage);

        info!(
            session = %self.session_id,
            player = %player,
            objective = chosen.id,
            decided,
            total,
            "objective chosen"
        );
        Ok(chosen)
    }

    /// Freeze the seat table. The player count is checked before anything
    /// changes, so a failed start leaves the match unstarted.
    fn close_seating(&self) -> Result<Vec<PlayerId>, MatchError> {
        let mut seats = self.seats.lock();
        if seats.started {
            return Err(MatchError::seating(SeatingKind::MatchAlreadyStarted));
        }
        let count = seats.players.len();
        if !valid_player_counts().contains(&count) {
            return Err(MatchError::InvalidPlayerCount { count });
        }
        seats.started = true;
        Ok(seats.players.clone())
    }

    /// Shuffle every pile, fill the market and draw one starter per player.
    ///
    /// Returns `None` if the match was already ended by a disconnection.
    fn prepare_table(&self, players: &[PlayerId]) -> Option<Vec<(PlayerId, StarterCard)>> {
        let mut table = self.table.lock();
        if table.phase != MatchPhase::Forming {
            return None;
        }
        let Table {
            rng,
            resource_pile,
            gold_pile,
            starter_pile,
            objective_pile,
            ..
        } = &mut *table;

        *resource_pile = Deck::new(catalog::resource_cards());
        *gold_pile = Deck::new(catalog::gold_cards());
        *starter_pile = Deck::new(catalog::starter_cards());
        *objective_pile = Deck::new(catalog::objective_cards());
        resource_pile.shuffle(rng);
        gold_pile.shuffle(rng);
        starter_pile.shuffle(rng);
        objective_pile.shuffle(rng);

        let mut market = Market::default();
        for slot in MarketSlot::ALL {
            market.refill(slot, table.pile_mut(slot.source()).draw());
        }
        table.market = market;

        let starters: Vec<(PlayerId, StarterCard)> = players
            .iter()
            .cloned()
            .zip(std::iter::from_fn(|| table.starter_pile.draw()))
            .collect();

        table.seating = players.to_vec();
        table.score_track = ScoreTrack::with_winning_score(players, self.config.winning_score);
        table.phase = MatchPhase::Setup;
        Some(starters)
    }

    /// Create the ballots and claim the delivery slot for the starter cards.
    /// Returns `None` if setup was already abandoned.
    fn open_ballots(&self, starters: &[(PlayerId, StarterCard)]) -> Option<DeliveryTurn<'_>> {
        let mut stage = self.setup.lock();
        if stage.abandoned {
            return None;
        }
        stage.ballots = Some(SetupBallots::new(starters.iter().cloned()));
        Some(self.delivery_turn())
    }

    /// Park the driver until every ballot has decided `step`.
    ///
    /// Returns `false` when setup was abandoned instead. Being woken does not
    /// imply completion, so the predicate is re-checked on every wake.
    fn await_setup(&self, step: SetupStep) -> bool {
        let mut stage = self.setup.lock();
        loop {
            if stage.abandoned {
                return false;
            }
            match &stage.ballots {
                Some(ballots) if ballots.is_complete(step) => return true,
                Some(_) => {}
                None => return false,
            }
            self.setup_progress.wait(&mut stage);
        }
    }

    /// Draw and offer two objectives per player.
    fn offer_objectives(
        &self,
        players: &[PlayerId],
    ) -> Result<Option<(Vec<(PlayerId, [ObjectiveCard; 2])>, DeliveryTurn<'_>)>, MatchError> {
        let offers = {
            let mut table = self.table.lock();
            if table.phase != MatchPhase::Setup {
                return Ok(None);
            }
            let pile = &mut table.objective_pile;
            players
                .iter()
                .map(|player| Some((player.clone(), [pile.draw()?, pile.draw()?])))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| MatchError::invalid_parameter("objective pile exhausted"))?
        };

        let mut stage = self.setup.lock();
        if stage.abandoned {
            return Ok(None);
        }
        let Some(ballots) = stage.ballots.as_mut() else {
            return Ok(None);
        };
        for (player, objectives) in &offers {
            ballots.ballot_mut(player)?.offer_objectives(objectives.clone())?;
        }
        Ok(Some((offers, self.delivery_turn())))
    }

    /// Close setup: deal opening hands, reveal the common objectives and pick
    /// the first player. Does nothing if the match ended in the meantime.
    fn begin_play(&self) -> Result<(), MatchError> {
        let ballots = {
            let mut stage = self.setup.lock();
            if stage.abandoned {
                return Ok(());
            }
            let Some(ballots) = stage.ballots.take() else {
                return Ok(());
            };
            stage.completed = true;
            ballots
        };

        let (snapshot, outbox, turn) = {
            let mut table = self.table.lock();
            if table.phase != MatchPhase::Setup {
                return Ok(());
            }

            let seating = table.seating.clone();
            for player in &seating {
                let mut hand: Vec<PlayableCard> = Vec::new();
                hand.extend(std::iter::from_fn(|| table.resource_pile.draw()).take(OPENING_RESOURCE_CARDS));
                hand.extend(std::iter::from_fn(|| table.gold_pile.draw()).take(OPENING_GOLD_CARDS));
                self.rules.deal_hand(player, hand);

                if let Some(objective) = ballots.get(player).and_then(|b| b.chosen_objective()) {
                    table
                        .personal_objectives
                        .insert(player.clone(), objective.clone());
                }
            }

            let common: Vec<ObjectiveCard> = std::iter::from_fn(|| table.objective_pile.draw())
                .take(COMMON_OBJECTIVES)
                .collect();
            table.common_objectives = common;

            let first = {
                let Table { rng, seating, .. } = &mut *table;
                seating.choose(rng).cloned()
            };
            let Some(first) = first else {
                return Err(MatchError::InvalidPlayerCount { count: 0 });
            };
            table.first_player = Some(first.clone());
            table.current_player = Some(first.clone());
            table.phase = MatchPhase::Playing;

            info!(
                session = %self.session_id,
                first_player = %first,
                resource_left = table.resource_pile.len(),
                gold_left = table.gold_pile.len(),
                "setup complete, play begins"
            );

            let outbox: Outbox = seating
                .iter()
                .map(|player| {
                    (
                        Recipient::Player(player.clone()),
                        Notification::MatchStarted {
                            view: self.view_locked(&table, player),
                        },
                    )
                })
                .collect();
            (self.snapshot_locked(&table), outbox, self.delivery_turn())
        };

        self.persist(&snapshot);
        self.dispatch(outbox, turn);
        Ok(())
    }
}

/// Ballots that accept decisions, or the reason they don't.
fn open_ballots_mut(
    ballots: &mut Option<SetupBallots>,
    closed: bool,
) -> Result<&mut SetupBallots, MatchError> {
    match ballots {
        Some(ballots) => Ok(ballots),
        None if closed => Err(MatchError::phase_mismatch("setup is over")),
        None => Err(MatchError::setup(SetupKind::NotPermittedYet)),
    }
}
