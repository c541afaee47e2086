use crate::models::{HistorySet, Participant};

/// Bonus for pairing across programs.
pub const DIVERSITY_BONUS: f64 = 50.0;

/// Bonus per shared interest tag.
pub const INTEREST_WEIGHT: f64 = 10.0;

/// Penalty for pairing within the same section.
pub const SAME_SECTION_PENALTY: f64 = -20.0;

/// Penalty for repeating a previous pairing.
///
/// Deliberately finite: large enough to lose to any non-repeat pairing,
/// but the solver may still select a repeat when that is the only way to
/// reach maximum cardinality. Do not turn this into a hard exclusion.
pub const HISTORY_PENALTY: f64 = -1000.0;

/// Compatibility score for a pair of participants.
///
/// Pure and symmetric: `compatibility_score(a, b, h) == compatibility_score(b, a, h)`.
/// Additive terms:
/// - different program        -> +DIVERSITY_BONUS
/// - each shared interest     -> +INTEREST_WEIGHT
/// - same section             -> +SAME_SECTION_PENALTY
/// - previously matched pair  -> +HISTORY_PENALTY
pub fn compatibility_score(p1: &Participant, p2: &Participant, history: &HistorySet) -> f64 {
    let mut score = 0.0;

    if p1.program != p2.program {
        score += DIVERSITY_BONUS;
    }

    let shared = p1
        .interests
        .iter()
        .filter(|tag| p2.interests.contains(tag))
        .count();
    score += shared as f64 * INTEREST_WEIGHT;

    if p1.section == p2.section {
        score += SAME_SECTION_PENALTY;
    }

    if history.contains(&p1.id, &p2.id) {
        score += HISTORY_PENALTY;
    }

    score
}
