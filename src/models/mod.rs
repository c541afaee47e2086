// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{HistorySet, MatchRecord, Matching, OpenSlot, Participant};
pub use requests::RunMatchRequest;
pub use responses::{ErrorResponse, HealthResponse, MatchedPair, RunMatchResponse};
