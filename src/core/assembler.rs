use crate::core::scoring::compatibility_score;
use crate::models::{HistorySet, MatchRecord, Matching, Participant};
use std::collections::HashMap;

/// Activity-type to venue mapping.
///
/// An explicit table owned by the caller (seeded from configuration), not
/// something baked into the solver. Unknown activity types fall back to the
/// default venue.
#[derive(Debug, Clone)]
pub struct LocationTable {
    venues: HashMap<String, String>,
    fallback: String,
}

impl LocationTable {
    /// Register or override a venue for an activity type.
    pub fn set_venue(&mut self, activity_type: impl Into<String>, venue: impl Into<String>) {
        self.venues.insert(activity_type.into(), venue.into());
    }

    /// Override the venue used for unknown activity types.
    pub fn set_fallback(&mut self, venue: impl Into<String>) {
        self.fallback = venue.into();
    }

    pub fn venue_for(&self, activity_type: &str) -> &str {
        self.venues
            .get(activity_type)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl Default for LocationTable {
    fn default() -> Self {
        let mut venues = HashMap::new();
        venues.insert("Lunch".to_string(), "Mess".to_string());
        venues.insert("Coffee".to_string(), "CCD".to_string());
        Self {
            venues,
            fallback: "Campus Center".to_string(),
        }
    }
}

/// Convert a solved matching back into domain records.
///
/// Scores are recomputed through the scorer against the same history
/// snapshot used to build the graph, so the recorded score can never drift
/// from the weight the solver optimized. `scheduled_time` is an explicit
/// input: records carry the slot's time, not the time the algorithm ran.
pub fn assemble(
    matching: &Matching,
    participants: &[Participant],
    history: &HistorySet,
    activity_type: &str,
    scheduled_time: chrono::DateTime<chrono::Utc>,
    locations: &LocationTable,
) -> Vec<MatchRecord> {
    let location = locations.venue_for(activity_type);
    matching
        .pairs()
        .map(|(u, v)| {
            let p1 = &participants[u];
            let p2 = &participants[v];
            MatchRecord {
                participant_1_id: p1.id.clone(),
                participant_1_name: p1.display_name.clone(),
                participant_2_id: p2.id.clone(),
                participant_2_name: p2.display_name.clone(),
                score: compatibility_score(p1, p2, history),
                activity_type: activity_type.to_string(),
                location: location.to_string(),
                scheduled_time,
            }
        })
        .collect()
}

/// Participants not covered by the matching (odd pools leave exactly one).
pub fn unmatched<'a>(matching: &Matching, participants: &'a [Participant]) -> Vec<&'a Participant> {
    matching
        .unmatched()
        .into_iter()
        .map(|u| &participants[u])
        .collect()
}
