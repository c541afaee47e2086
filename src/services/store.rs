use crate::models::{HistorySet, MatchRecord, OpenSlot};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by the persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A slot was no longer open when we tried to claim it; a concurrent
    /// run got there first. The caller should treat the run as stale.
    #[error("Slot conflict: {0}")]
    SlotConflict(String),
}

/// Persistence collaborator for the matching run.
///
/// The scorer, graph builder and solver never touch this; only the route
/// layer (on behalf of result assembly) does, which keeps the core testable
/// with zero external dependencies.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Open availability slots (and their participants) for one activity.
    async fn fetch_open_slots(&self, activity_type: &str) -> Result<Vec<OpenSlot>, StoreError>;

    /// All previously recorded pairs, across every activity type.
    async fn fetch_history(&self) -> Result<HistorySet, StoreError>;

    /// Persist one match.
    async fn record_match(&self, record: &MatchRecord) -> Result<(), StoreError>;

    /// Transition slots from open to matched. Must be atomic under
    /// concurrent callers: a slot flips open -> matched exactly once, so
    /// two overlapping runs cannot both claim the same participant. A slot
    /// that is no longer open yields `SlotConflict`.
    async fn mark_matched(&self, slot_ids: &[uuid::Uuid]) -> Result<(), StoreError>;

    /// Liveness of the backing store, for the health endpoint.
    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
