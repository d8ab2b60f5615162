use tracing::{info, warn};

use super::{Match, Recipient};
use crate::domain::rules::MAX_PLAYERS;
use crate::domain::state::PlayerId;
use crate::errors::domain::{MatchError, SeatingKind};
use crate::protocol::Notification;

impl Match {
    /// Seat `player` and bind the sink registered for them.
    ///
    /// Fails once the match has started, when all four seats are taken, when
    /// the player is already seated, or when no sink is registered for them.
    pub fn take_seat(&self, player: PlayerId) -> Result<(), MatchError> {
        let turn = self.delivery_turn();
        let seated = {
            let mut seats = self.seats.lock();
            if seats.started {
                return Err(MatchError::seating(SeatingKind::MatchAlreadyStarted));
            }
            if seats.players.contains(&player) {
                return Err(MatchError::seating(SeatingKind::AlreadySeated));
            }
            if seats.players.len() >= MAX_PLAYERS {
                return Err(MatchError::seating(SeatingKind::MatchFull));
            }
            let sink = self
                .registry
                .sink_for(&player)
                .ok_or(MatchError::seating(SeatingKind::PlayerNotFound))?;

            seats.players.push(player.clone());
            seats.sinks.insert(player.clone(), sink);
            seats.players.clone()
        };

        info!(session = %self.session_id, player = %player, seated = seated.len(), "player took a seat");
        self.dispatch(
            vec![(Recipient::All, Notification::PlayerJoined { player, seated })],
            turn,
        );
        Ok(())
    }

    /// Remove `player` from the table before the match starts.
    pub fn leave_seat(&self, player: &PlayerId) -> Result<(), MatchError> {
        let turn = self.delivery_turn();
        let (seated, leaver_sink) = {
            let mut seats = self.seats.lock();
            if seats.started {
                return Err(MatchError::seating(SeatingKind::MatchAlreadyStarted));
            }
            let Some(pos) = seats.players.iter().position(|p| p == player) else {
                return Err(MatchError::seating(SeatingKind::PlayerNotFound));
            };
            seats.players.remove(pos);
            let sink = seats.sinks.remove(player);
            (seats.players.clone(), sink)
        };

        info!(session = %self.session_id, player = %player, seated = seated.len(), "player left their seat");
        let notification = Notification::PlayerLeft {
            player: player.clone(),
            seated,
        };
        if let Some(sink) = leaver_sink {
            // The leaver is no longer reachable through the seat table
            if let Err(e) = sink.deliver(notification.clone()) {
                warn!(session = %self.session_id, player = %player, error = %e, "notification delivery failed");
            }
        }
        self.dispatch(vec![(Recipient::All, notification)], turn);
        Ok(())
    }

    /// Rebind a seated player's sink from the registry and send them the
    /// current state.
    ///
    /// Notifications from other threads reach the rebound sink only after the
    /// state sync.
    pub fn reconnect(&self, player: &PlayerId) -> Result<(), MatchError> {
        let sink = self
            .registry
            .sink_for(player)
            .ok_or(MatchError::seating(SeatingKind::PlayerNotFound))?;

        let (view, turn) = {
            let table = self.table.lock();
            (self.view_locked(&table, player), self.delivery_turn())
        };
        {
            let mut seats = self.seats.lock();
            if !seats.players.contains(player) {
                return Err(MatchError::seating(SeatingKind::PlayerNotFound));
            }
            seats.sinks.insert(player.clone(), sink);
        }

        info!(session = %self.session_id, player = %player, phase = %view.phase, "player reconnected");
        self.dispatch(
            vec![(Recipient::Player(player.clone()), Notification::StateSync { view })],
            turn,
        );
        Ok(())
    }
}
