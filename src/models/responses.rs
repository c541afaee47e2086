use crate::models::domain::MatchRecord;
use serde::{Deserialize, Serialize};

/// One formed pair as reported to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedPair {
    #[serde(rename = "participant1")]
    pub participant_1: String,
    #[serde(rename = "participant2")]
    pub participant_2: String,
    pub score: f64,
    pub location: String,
    #[serde(rename = "scheduledTime")]
    pub scheduled_time: chrono::DateTime<chrono::Utc>,
}

impl From<&MatchRecord> for MatchedPair {
    fn from(record: &MatchRecord) -> Self {
        Self {
            participant_1: record.participant_1_name.clone(),
            participant_2: record.participant_2_name.clone(),
            score: record.score,
            location: record.location.clone(),
            scheduled_time: record.scheduled_time,
        }
    }
}

/// Response for the run-match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMatchResponse {
    pub message: String,
    #[serde(rename = "matchesCount")]
    pub matches_count: usize,
    pub matches: Vec<MatchedPair>,
    /// Participant ids left without a partner (odd pools leave exactly one).
    #[serde(rename = "unmatchedParticipants")]
    pub unmatched_participants: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
