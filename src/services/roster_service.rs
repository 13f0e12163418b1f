use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::models::{
    GameFormat, NewStudent, RankingEntry, RatingsUpdate, RosterDocument, Student, StudentSummary,
};
use crate::storage::{RosterStore, StoreError};

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Corrupt roster data: {0}")]
    CorruptData(#[source] serde_json::Error),

    #[error("Roster storage unavailable: {0}")]
    StorageUnavailable(#[source] std::io::Error),
}

impl From<StoreError> for RosterError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(e) => RosterError::StorageUnavailable(e),
            StoreError::Corrupt(e) => RosterError::CorruptData(e),
        }
    }
}

/// Result of a committed deletion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionOutcome {
    pub deleted_student: StudentSummary,
    pub remaining_students: usize,
}

/// Domain operations over the roster document.
///
/// Every mutation is a full load -> mutate -> save cycle run under
/// `write_lock`, so concurrent requests against the same document are
/// serialized instead of overwriting each other.
pub struct RosterService {
    store: Arc<dyn RosterStore>,
    write_lock: Mutex<()>,
}

impl RosterService {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Remove exactly one student by id and persist the roster.
    ///
    /// A miss never writes. A failed save is reported as
    /// `StorageUnavailable` and the removal is discarded.
    #[instrument(skip(self))]
    pub async fn delete_member(&self, id: &str) -> Result<DeletionOutcome, RosterError> {
        let id = Self::require_id(id)?;

        let _guard = self.write_lock.lock().await;
        let mut roster = self.store.load().await?;

        let removed = roster
            .remove(id)
            .ok_or_else(|| RosterError::NotFound(format!("Student {} not found", id)))?;

        self.store.save(&roster).await?;

        let outcome = DeletionOutcome {
            deleted_student: removed.summary(),
            remaining_students: roster.len(),
        };
        info!(
            student = %outcome.deleted_student.id,
            remaining = outcome.remaining_students,
            "student deleted"
        );
        Ok(outcome)
    }

    #[instrument(skip(self, new_student), fields(id = ?new_student.id))]
    pub async fn create_member(&self, new_student: NewStudent) -> Result<Student, RosterError> {
        let id = Self::require_id(new_student.id.as_deref().unwrap_or_default())?;
        if id.chars().any(char::is_whitespace) {
            return Err(RosterError::InvalidRequest(
                "Student ID must not contain whitespace".to_string(),
            ));
        }

        let (rapid, blitz, bullet) = match (new_student.rapid, new_student.blitz, new_student.bullet) {
            (Some(rapid), Some(blitz), Some(bullet)) => (rapid, blitz, bullet),
            _ => {
                return Err(RosterError::InvalidRequest(
                    "rapid, blitz and bullet ratings are required".to_string(),
                ))
            }
        };
        Self::validate_ratings(&[rapid, blitz, bullet])?;

        let _guard = self.write_lock.lock().await;
        let mut roster = self.store.load().await?;

        if roster.contains(id) {
            return Err(RosterError::Conflict(format!("Student {} already exists", id)));
        }

        let student = Student::new(id, rapid, blitz, bullet);
        roster.students.push(student.clone());
        self.store.save(&roster).await?;

        info!(student = %id, total = roster.len(), "student created");
        Ok(student)
    }

    #[instrument(skip(self))]
    pub async fn get_member(&self, id: &str) -> Result<Student, RosterError> {
        let id = Self::require_id(id)?;
        let roster = self.store.load().await?;

        roster
            .find(id)
            .cloned()
            .ok_or_else(|| RosterError::NotFound(format!("Student {} not found", id)))
    }

    #[instrument(skip(self, update))]
    pub async fn update_ratings(&self, id: &str, update: RatingsUpdate) -> Result<Student, RosterError> {
        let id = Self::require_id(id)?;
        if update.is_empty() {
            return Err(RosterError::InvalidRequest(
                "at least one of rapid, blitz or bullet is required".to_string(),
            ));
        }
        Self::validate_ratings(&update.values())?;

        let _guard = self.write_lock.lock().await;
        let mut roster = self.store.load().await?;

        let student = roster
            .find_mut(id)
            .ok_or_else(|| RosterError::NotFound(format!("Student {} not found", id)))?;
        update.apply(student);
        let updated = student.clone();

        self.store.save(&roster).await?;

        info!(student = %id, "ratings updated");
        Ok(updated)
    }

    /// Students ordered by descending rating in `format`, ties broken by id.
    /// Entries without a numeric rating in `format` rank last; entries
    /// without a string id are not listed.
    #[instrument(skip(self))]
    pub async fn rankings(&self, format: GameFormat) -> Result<Vec<RankingEntry>, RosterError> {
        let roster = self.store.load().await?;

        let mut students: Vec<(f64, StudentSummary)> = roster
            .students
            .iter()
            .filter(|s| s.id().is_some())
            .map(|s| {
                let rating = s
                    .rating(format)
                    .and_then(serde_json::Number::as_f64)
                    .unwrap_or(f64::NEG_INFINITY);
                (rating, s.summary())
            })
            .collect();
        students.sort_by(|(ra, a), (rb, b)| rb.total_cmp(ra).then_with(|| a.id.cmp(&b.id)));

        Ok(students
            .into_iter()
            .enumerate()
            .map(|(i, (_, student))| RankingEntry { rank: i + 1, student })
            .collect())
    }

    /// Current roster snapshot, used by the health check
    pub async fn snapshot(&self) -> Result<RosterDocument, RosterError> {
        Ok(self.store.load().await?)
    }

    fn require_id(raw: &str) -> Result<&str, RosterError> {
        let id = raw.trim();
        if id.is_empty() {
            warn!("rejected request without student id");
            return Err(RosterError::InvalidRequest("Student ID is required".to_string()));
        }
        Ok(id)
    }

    fn validate_ratings(ratings: &[i64]) -> Result<(), RosterError> {
        if ratings.iter().any(|r| *r < 0) {
            return Err(RosterError::InvalidRequest(
                "ratings must be non-negative integers".to_string(),
            ));
        }
        Ok(())
    }
}
