use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A participant eligible for one matching run.
///
/// Immutable for the duration of a run. Rows come out of the slots table
/// joined with the participants table; `validate` rejects records that are
/// missing required fields before any graph work starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub program: String,
    pub section: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl Participant {
    /// Check that all required fields are present (non-empty).
    ///
    /// `id`, `program` and `section` feed directly into scoring and history
    /// normalization; an empty value there is bad input, not a default.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("participant is missing an id".to_string());
        }
        if self.program.is_empty() {
            return Err(format!("participant {} is missing a program", self.id));
        }
        if self.section.is_empty() {
            return Err(format!("participant {} is missing a section", self.id));
        }
        Ok(())
    }
}

/// Set of previously matched pairs, normalized to (min-id, max-id).
///
/// History is global across activity types: a lunch pairing discourages a
/// future coffee pairing just the same.
#[derive(Debug, Clone, Default)]
pub struct HistorySet {
    pairs: HashSet<(String, String)>,
}

impl HistorySet {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    /// Record that two participants have been matched before.
    pub fn record(&mut self, a: &str, b: &str) {
        self.pairs.insert(Self::normalize(a, b));
    }

    /// O(1) membership test, order-insensitive.
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.pairs.contains(&Self::normalize(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(String, String)> for HistorySet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (a, b) in iter {
            set.record(&a, &b);
        }
        set
    }
}

/// A matching over node indices 0..n: a set of disjoint edges.
///
/// Invariant: each node appears in at most one edge, and `mate` is
/// symmetric (`mate[u] == Some(v)` implies `mate[v] == Some(u)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    mate: Vec<Option<usize>>,
}

impl Matching {
    pub fn new(mate: Vec<Option<usize>>) -> Self {
        Self { mate }
    }

    pub fn mate(&self, v: usize) -> Option<usize> {
        self.mate.get(v).copied().flatten()
    }

    /// Matched pairs `(u, v)` with `u < v`, each emitted once in node order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mate
            .iter()
            .enumerate()
            .filter_map(|(u, m)| m.map(|v| (u, v)))
            .filter(|&(u, v)| u < v)
    }

    /// Number of matched pairs (cardinality).
    pub fn len(&self) -> usize {
        self.pairs().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the disjointness/symmetry invariant.
    pub fn is_valid(&self) -> bool {
        self.mate.iter().enumerate().all(|(u, m)| match m {
            None => true,
            Some(v) => *v != u && self.mate.get(*v).copied().flatten() == Some(u),
        })
    }

    /// Node indices not covered by any matched edge.
    pub fn unmatched(&self) -> Vec<usize> {
        self.mate
            .iter()
            .enumerate()
            .filter_map(|(u, m)| m.is_none().then_some(u))
            .collect()
    }
}

/// One persisted/returned match: the only artifact that crosses the
/// system boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "participant1Id")]
    pub participant_1_id: String,
    #[serde(rename = "participant1Name")]
    pub participant_1_name: String,
    #[serde(rename = "participant2Id")]
    pub participant_2_id: String,
    #[serde(rename = "participant2Name")]
    pub participant_2_name: String,
    pub score: f64,
    #[serde(rename = "activityType")]
    pub activity_type: String,
    pub location: String,
    #[serde(rename = "scheduledTime")]
    pub scheduled_time: chrono::DateTime<chrono::Utc>,
}

/// An open availability slot: the slot row id plus its participant.
///
/// The slot id is what `mark_matched` flips from open to matched; keeping
/// it alongside the participant saves the caller a reverse lookup.
#[derive(Debug, Clone)]
pub struct OpenSlot {
    pub slot_id: uuid::Uuid,
    pub participant: Participant,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: &str) -> Participant {
        Participant {
            id: id.to_string(),
            program: "MBA".to_string(),
            section: "A".to_string(),
            interests: vec![],
            display_name: format!("Participant {}", id),
        }
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut p = participant("p1");
        assert!(p.validate().is_ok());

        p.program.clear();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_history_is_order_insensitive() {
        let mut history = HistorySet::new();
        history.record("b", "a");

        assert!(history.contains("a", "b"));
        assert!(history.contains("b", "a"));
        assert!(!history.contains("a", "c"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_matching_pairs_and_validity() {
        let m = Matching::new(vec![Some(1), Some(0), None, Some(4), Some(3)]);
        assert!(m.is_valid());
        assert_eq!(m.pairs().collect::<Vec<_>>(), vec![(0, 1), (3, 4)]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.unmatched(), vec![2]);
    }

    #[test]
    fn test_matching_detects_broken_symmetry() {
        let m = Matching::new(vec![Some(1), Some(2), Some(1)]);
        assert!(!m.is_valid());
    }
}
