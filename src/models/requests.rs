use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to run a matching round for one activity pool
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RunMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "activity_type", rename = "activityType")]
    pub activity_type: String,
    /// Slot time the formed matches are scheduled for. Explicit on purpose:
    /// records must carry the slot's time, not the wall clock of the run.
    #[serde(alias = "scheduled_time", rename = "scheduledTime")]
    pub scheduled_time: chrono::DateTime<chrono::Utc>,
}
