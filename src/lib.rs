//! Synapse Algo - pair-matching service for recurring social events
//!
//! This library pairs participants of a recurring social slot (lunch,
//! coffee) into disjoint two-person matches. Compatibility scoring and a
//! general maximum weight matching solver (blossom algorithm) form the
//! core; storage and HTTP are thin glue around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{maximum_weight_matching, CandidateGraph, LocationTable, MatchOutcome, Matcher};
pub use models::{HistorySet, MatchRecord, Matching, Participant, RunMatchRequest, RunMatchResponse};
