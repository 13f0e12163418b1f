use std::sync::Arc;
use std::time::Instant;

use crate::services::RosterService;
use crate::storage::{JsonFileStore, RosterStore};

/// Shared handler state; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<RosterService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self {
            roster: Arc::new(RosterService::new(store)),
            started_at: Instant::now(),
        }
    }

    /// State backed by the JSON roster file at `path`
    pub fn with_roster_file(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileStore::new(path)))
    }
}
