use crate::models::{HistorySet, MatchRecord, OpenSlot, Participant};
use crate::services::store::{MatchStore, StoreError};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;

/// PostgreSQL-backed persistence collaborator.
///
/// Holds the availability slots, participant profiles, and the match log
/// the scorer's history set is built from.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings.
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }
}

#[async_trait]
impl MatchStore for PostgresClient {
    async fn fetch_open_slots(&self, activity_type: &str) -> Result<Vec<OpenSlot>, StoreError> {
        let query = r#"
            SELECT s.id AS slot_id,
                   p.id AS participant_id,
                   p.program,
                   p.section,
                   p.interests,
                   p.display_name
            FROM availability_slots s
            JOIN participants p ON p.id = s.participant_id
            WHERE s.status = 'open' AND s.activity_type = $1
            ORDER BY s.created_at
        "#;

        let rows = sqlx::query(query)
            .bind(activity_type)
            .fetch_all(&self.pool)
            .await?;

        let slots: Vec<OpenSlot> = rows
            .iter()
            .map(|row| OpenSlot {
                slot_id: row.get("slot_id"),
                participant: Participant {
                    id: row.get("participant_id"),
                    program: row.get("program"),
                    section: row.get("section"),
                    interests: row.get("interests"),
                    display_name: row.get("display_name"),
                },
            })
            .collect();

        tracing::debug!("Fetched {} open slots for {}", slots.len(), activity_type);

        Ok(slots)
    }

    async fn fetch_history(&self) -> Result<HistorySet, StoreError> {
        let query = r#"
            SELECT participant_1_id, participant_2_id
            FROM matches
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let history: HistorySet = rows
            .iter()
            .map(|row| {
                (
                    row.get::<String, _>("participant_1_id"),
                    row.get::<String, _>("participant_2_id"),
                )
            })
            .collect();

        tracing::debug!("Loaded {} historical pairs", history.len());

        Ok(history)
    }

    async fn record_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO matches
                (participant_1_id, participant_2_id, score, activity_type, location, scheduled_time)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        sqlx::query(query)
            .bind(&record.participant_1_id)
            .bind(&record.participant_2_id)
            .bind(record.score)
            .bind(&record.activity_type)
            .bind(&record.location)
            .bind(record.scheduled_time)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded match: {} <-> {} ({})",
            record.participant_1_id,
            record.participant_2_id,
            record.score
        );

        Ok(())
    }

    async fn mark_matched(&self, slot_ids: &[uuid::Uuid]) -> Result<(), StoreError> {
        // Compare-and-swap on slot status: only open slots transition, and
        // the affected-row count tells us whether a concurrent run already
        // claimed one of them.
        let query = r#"
            UPDATE availability_slots
            SET status = 'matched'
            WHERE id = ANY($1) AND status = 'open'
        "#;

        let result = sqlx::query(query)
            .bind(slot_ids)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() != slot_ids.len() as u64 {
            return Err(StoreError::SlotConflict(format!(
                "expected to claim {} slots, claimed {}",
                slot_ids.len(),
                result.rows_affected()
            )));
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
