use std::sync::Arc;

use dashmap::DashMap;

use crate::domain::state::PlayerId;
use crate::services::collaborators::MessageSink;

/// Message sinks of connected players, keyed by identity.
///
/// Owned by the transport layer and handed to each match at construction,
/// so a coordinator never reaches for process-wide state.
#[derive(Default)]
pub struct SessionRegistry {
    sinks: DashMap<PlayerId, Arc<dyn MessageSink>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sinks: DashMap::new(),
        }
    }

    /// Register (or replace, on reconnect) the sink for `player`.
    pub fn register(&self, player: PlayerId, sink: Arc<dyn MessageSink>) {
        self.sinks.insert(player, sink);
    }

    pub fn unregister(&self, player: &PlayerId) {
        self.sinks.remove(player);
    }

    pub fn sink_for(&self, player: &PlayerId) -> Option<Arc<dyn MessageSink>> {
        self.sinks.get(player).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}
