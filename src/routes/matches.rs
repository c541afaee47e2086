use crate::core::{MatchError, Matcher};
use crate::models::{
    ErrorResponse, HealthResponse, MatchedPair, Participant, RunMatchRequest, RunMatchResponse,
};
use crate::services::MatchStore;
use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MatchStore>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/run", web::post().to(run_match));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Run a matching round for one activity pool
///
/// POST /api/v1/matches/run
///
/// Request body:
/// ```json
/// {
///   "activityType": "Lunch",
///   "scheduledTime": "2026-09-02T13:00:00Z"
/// }
/// ```
async fn run_match(
    state: web::Data<AppState>,
    req: web::Json<RunMatchRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for run_match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let activity_type = &req.activity_type;
    tracing::info!("Running matching for activity: {}", activity_type);

    // Fetch the open pool for this activity
    let slots = match state.store.fetch_open_slots(activity_type).await {
        Ok(slots) => slots,
        Err(e) => {
            tracing::error!("Failed to fetch open slots for {}: {}", activity_type, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch open slots".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let participants: Vec<Participant> =
        slots.iter().map(|s| s.participant.clone()).collect();
    let slot_by_participant: HashMap<&str, uuid::Uuid> = slots
        .iter()
        .map(|s| (s.participant.id.as_str(), s.slot_id))
        .collect();

    tracing::debug!(
        "Found {} open slots for {}",
        participants.len(),
        activity_type
    );

    // Fetch pairing history (global across activity types)
    let history = match state.store.fetch_history().await {
        Ok(history) => history,
        Err(e) => {
            tracing::error!("Failed to fetch match history: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch match history".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Run the matching pipeline
    let outcome = match state
        .matcher
        .run(&participants, &history, activity_type, req.scheduled_time)
    {
        Ok(outcome) => outcome,
        Err(e @ MatchError::InvalidParticipant(_)) => {
            tracing::info!("Rejected run for {}: {}", activity_type, e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid participant data".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    if outcome.records.is_empty() {
        return HttpResponse::Ok().json(RunMatchResponse {
            message: "Not enough open participants to match".to_string(),
            matches_count: 0,
            matches: vec![],
            unmatched_participants: outcome.unmatched,
        });
    }

    // Persist each match and claim its two slots
    let mut matches = Vec::with_capacity(outcome.records.len());
    for record in &outcome.records {
        if let Err(e) = state.store.record_match(record).await {
            tracing::error!("Failed to record match: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record match".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }

        let slot_ids: Vec<uuid::Uuid> = [&record.participant_1_id, &record.participant_2_id]
            .iter()
            .filter_map(|id| slot_by_participant.get(id.as_str()).copied())
            .collect();
        if let Err(e) = state.store.mark_matched(&slot_ids).await {
            tracing::error!("Failed to mark slots matched: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to mark slots matched".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }

        matches.push(MatchedPair::from(record));
    }

    tracing::info!(
        "Matching run for {} made {} pairs from {} candidates ({} unmatched)",
        activity_type,
        matches.len(),
        outcome.total_candidates,
        outcome.unmatched.len()
    );

    HttpResponse::Ok().json(RunMatchResponse {
        message: "Matching run successfully".to_string(),
        matches_count: matches.len(),
        matches,
        unmatched_participants: outcome.unmatched,
    })
}
