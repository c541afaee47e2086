// Route-level tests against an in-memory store

use actix_web::{test, web, App};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use synapse_algo::models::{HistorySet, MatchRecord, OpenSlot, Participant, RunMatchResponse};
use synapse_algo::routes::matches::AppState;
use synapse_algo::routes::configure_routes;
use synapse_algo::services::{MatchStore, StoreError};
use synapse_algo::Matcher;

/// In-memory stand-in for the PostgreSQL store. Slots carry an open flag
/// so the claim semantics of `mark_matched` can be exercised.
#[derive(Default)]
struct InMemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    slots: Vec<(OpenSlot, bool)>,
    history: Vec<(String, String)>,
    recorded: Vec<MatchRecord>,
    fail_writes: bool,
}

impl InMemoryStore {
    fn with_pool(participants: Vec<Participant>) -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.lock().unwrap();
            for participant in participants {
                inner.slots.push((
                    OpenSlot {
                        slot_id: uuid::Uuid::new_v4(),
                        participant,
                    },
                    true,
                ));
            }
        }
        store
    }

    fn add_history(&self, a: &str, b: &str) {
        self.inner
            .lock()
            .unwrap()
            .history
            .push((a.to_string(), b.to_string()));
    }

    fn fail_writes(&self) {
        self.inner.lock().unwrap().fail_writes = true;
    }

    fn recorded(&self) -> Vec<MatchRecord> {
        self.inner.lock().unwrap().recorded.clone()
    }

    fn open_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .slots
            .iter()
            .filter(|(_, open)| *open)
            .count()
    }
}

#[async_trait]
impl MatchStore for InMemoryStore {
    async fn fetch_open_slots(&self, activity_type: &str) -> Result<Vec<OpenSlot>, StoreError> {
        let _ = activity_type;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .slots
            .iter()
            .filter(|(_, open)| *open)
            .map(|(slot, _)| slot.clone())
            .collect())
    }

    async fn fetch_history(&self) -> Result<HistorySet, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.history.iter().cloned().collect())
    }

    async fn record_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(StoreError::Sqlx(sqlx::Error::PoolClosed));
        }
        inner.recorded.push(record.clone());
        Ok(())
    }

    async fn mark_matched(&self, slot_ids: &[uuid::Uuid]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(StoreError::Sqlx(sqlx::Error::PoolClosed));
        }
        for id in slot_ids {
            let slot = inner
                .slots
                .iter_mut()
                .find(|(slot, _)| slot.slot_id == *id);
            match slot {
                Some((_, open)) if *open => *open = false,
                _ => return Err(StoreError::SlotConflict(id.to_string())),
            }
        }
        Ok(())
    }
}

fn participant(id: &str, program: &str, section: &str, interests: &[&str]) -> Participant {
    Participant {
        id: id.to_string(),
        program: program.to_string(),
        section: section.to_string(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        display_name: format!("Participant {}", id),
    }
}

fn four_person_pool() -> Vec<Participant> {
    vec![
        participant("A", "X", "1", &["music", "sports"]),
        participant("B", "Y", "1", &["music"]),
        participant("C", "X", "2", &[]),
        participant("D", "Y", "2", &["sports"]),
    ]
}

fn app_state(store: Arc<InMemoryStore>) -> AppState {
    AppState {
        store: store as Arc<dyn MatchStore>,
        matcher: Matcher::with_default_locations(),
    }
}

macro_rules! spawn_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(app_state($store)))
                .configure(configure_routes),
        )
        .await
    };
}

fn run_request(activity: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/matches/run")
        .set_json(serde_json::json!({
            "activityType": activity,
            "scheduledTime": "2026-09-02T13:00:00Z",
        }))
}

#[actix_web::test]
async fn test_health_endpoint() {
    let store = Arc::new(InMemoryStore::default());
    let app = spawn_app!(store);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp["status"], "healthy");
    assert!(resp["version"].is_string());
}

#[actix_web::test]
async fn test_run_match_pairs_full_pool() {
    let store = Arc::new(InMemoryStore::with_pool(four_person_pool()));
    let app = spawn_app!(store.clone());

    let resp: RunMatchResponse = test::call_and_read_body_json(&app, run_request("Lunch").to_request()).await;

    assert_eq!(resp.message, "Matching run successfully");
    assert_eq!(resp.matches_count, 2);
    assert!(resp.unmatched_participants.is_empty());

    // Both pairs persisted and all four slots claimed.
    let recorded = store.recorded();
    assert_eq!(recorded.len(), 2);
    assert_eq!(store.open_count(), 0);

    // The optimal pairing here is A-D and B-C.
    let mut pairs: Vec<(String, String)> = recorded
        .iter()
        .map(|r| (r.participant_1_id.clone(), r.participant_2_id.clone()))
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("A".to_string(), "D".to_string()),
            ("B".to_string(), "C".to_string()),
        ]
    );

    // Lunch resolves to the Mess venue.
    assert!(recorded.iter().all(|r| r.location == "Mess"));
    assert!(recorded.iter().all(|r| r.activity_type == "Lunch"));
}

#[actix_web::test]
async fn test_run_match_odd_pool_leaves_one_unmatched() {
    let pool = vec![
        participant("a", "X", "1", &["music"]),
        participant("b", "Y", "2", &["music"]),
        participant("c", "X", "1", &[]),
    ];
    let store = Arc::new(InMemoryStore::with_pool(pool));
    let app = spawn_app!(store.clone());

    let resp: RunMatchResponse = test::call_and_read_body_json(&app, run_request("Coffee").to_request()).await;

    // a-b dominates every alternative, leaving c out.
    assert_eq!(resp.matches_count, 1);
    assert_eq!(resp.unmatched_participants, vec!["c".to_string()]);
    assert_eq!(store.open_count(), 1);
}

#[actix_web::test]
async fn test_run_match_empty_pool() {
    let store = Arc::new(InMemoryStore::default());
    let app = spawn_app!(store.clone());

    let resp: RunMatchResponse = test::call_and_read_body_json(&app, run_request("Lunch").to_request()).await;

    assert_eq!(resp.message, "Not enough open participants to match");
    assert_eq!(resp.matches_count, 0);
    assert!(store.recorded().is_empty());
}

#[actix_web::test]
async fn test_run_match_single_participant() {
    let store = Arc::new(InMemoryStore::with_pool(vec![participant(
        "solo", "X", "1", &[],
    )]));
    let app = spawn_app!(store.clone());

    let resp: RunMatchResponse = test::call_and_read_body_json(&app, run_request("Lunch").to_request()).await;

    assert_eq!(resp.matches_count, 0);
    assert_eq!(resp.unmatched_participants, vec!["solo".to_string()]);
    // The lone slot stays open for the next run.
    assert_eq!(store.open_count(), 1);
}

#[actix_web::test]
async fn test_run_match_honors_history() {
    let store = Arc::new(InMemoryStore::with_pool(four_person_pool()));
    // A-D and B-C would be optimal on a clean slate; both are history now.
    store.add_history("A", "D");
    store.add_history("B", "C");
    let app = spawn_app!(store.clone());

    let resp: RunMatchResponse = test::call_and_read_body_json(&app, run_request("Lunch").to_request()).await;

    assert_eq!(resp.matches_count, 2);
    let recorded = store.recorded();
    for record in &recorded {
        let pair = (record.participant_1_id.as_str(), record.participant_2_id.as_str());
        assert!(pair != ("A", "D") && pair != ("D", "A"));
        assert!(pair != ("B", "C") && pair != ("C", "B"));
    }
}

#[actix_web::test]
async fn test_run_match_rejects_blank_activity() {
    let store = Arc::new(InMemoryStore::default());
    let app = spawn_app!(store);

    let resp = test::call_service(&app, run_request("").to_request()).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_run_match_rejects_invalid_participant() {
    // Missing program is bad input, surfaced before any pairing happens.
    let mut broken = participant("A", "X", "1", &[]);
    broken.program.clear();
    let store = Arc::new(InMemoryStore::with_pool(vec![
        broken,
        participant("B", "Y", "2", &[]),
    ]));
    let app = spawn_app!(store.clone());

    let resp = test::call_service(&app, run_request("Lunch").to_request()).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    assert!(store.recorded().is_empty());
    assert_eq!(store.open_count(), 2);
}

#[actix_web::test]
async fn test_run_match_persistence_failure_is_500() {
    let store = Arc::new(InMemoryStore::with_pool(four_person_pool()));
    store.fail_writes();
    let app = spawn_app!(store);

    let resp = test::call_service(&app, run_request("Lunch").to_request()).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[actix_web::test]
async fn test_mark_matched_claims_each_slot_once() {
    let store = InMemoryStore::with_pool(vec![participant("A", "X", "1", &[])]);
    let slot_id = store.inner.lock().unwrap().slots[0].0.slot_id;

    store.mark_matched(&[slot_id]).await.unwrap();
    // Second claim finds the slot already taken.
    let err = store.mark_matched(&[slot_id]).await.unwrap_err();
    assert!(matches!(err, StoreError::SlotConflict(_)));
}
