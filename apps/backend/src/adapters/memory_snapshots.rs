use std::collections::HashMap;

use parking_lot::Mutex;

use crate::domain::snapshot::MatchSnapshot;
use crate::domain::state::SessionId;
use crate::error::AppError;
use crate::services::collaborators::SnapshotStore;

/// Keeps every snapshot ever saved, per session.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    history: Mutex<HashMap<SessionId, Vec<MatchSnapshot>>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All snapshots saved for `session`, oldest first.
    pub fn history(&self, session: SessionId) -> Vec<MatchSnapshot> {
        self.history
            .lock()
            .get(&session)
            .cloned()
            .unwrap_or_default()
    }

    pub fn save_count(&self, session: SessionId) -> usize {
        self.history.lock().get(&session).map_or(0, Vec::len)
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn save(&self, session: SessionId, snapshot: &MatchSnapshot) -> Result<(), AppError> {
        self.history
            .lock()
            .entry(session)
            .or_default()
            .push(snapshot.clone());
        Ok(())
    }

    fn load(&self, session: SessionId) -> Result<Option<MatchSnapshot>, AppError> {
        Ok(self
            .history
            .lock()
            .get(&session)
            .and_then(|saved| saved.last().cloned()))
    }
}
