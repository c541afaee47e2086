// Unit tests for Synapse Algo

use synapse_algo::core::{
    assembler::{assemble, LocationTable},
    graph::CandidateGraph,
    matching::maximum_weight_matching,
    scoring::{compatibility_score, DIVERSITY_BONUS, HISTORY_PENALTY, INTEREST_WEIGHT, SAME_SECTION_PENALTY},
};
use synapse_algo::models::{HistorySet, Participant};
use chrono::{TimeZone, Utc};

fn participant(id: &str, program: &str, section: &str, interests: &[&str]) -> Participant {
    Participant {
        id: id.to_string(),
        program: program.to_string(),
        section: section.to_string(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        display_name: format!("Participant {}", id),
    }
}

/// The four-participant pool from the product walkthrough:
/// A(X,1,{music,sports}) B(Y,1,{music}) C(X,2,{}) D(Y,2,{sports}).
fn walkthrough_pool() -> Vec<Participant> {
    vec![
        participant("A", "X", "1", &["music", "sports"]),
        participant("B", "Y", "1", &["music"]),
        participant("C", "X", "2", &[]),
        participant("D", "Y", "2", &["sports"]),
    ]
}

#[test]
fn test_walkthrough_edge_weights() {
    let pool = walkthrough_pool();
    let history = HistorySet::new();

    let score = |i: usize, j: usize| compatibility_score(&pool[i], &pool[j], &history);

    assert_eq!(score(0, 1), 40.0); // A-B: diversity + interest + same section
    assert_eq!(score(0, 2), 0.0); // A-C: same program, no shared interests
    assert_eq!(score(0, 3), 60.0); // A-D: diversity + interest
    assert_eq!(score(1, 2), 50.0); // B-C: diversity
    assert_eq!(score(1, 3), 0.0); // B-D: same program
    assert_eq!(score(2, 3), 30.0); // C-D: diversity + same section
}

#[test]
fn test_score_symmetry_over_all_pairs() {
    let pool = walkthrough_pool();
    let mut history = HistorySet::new();
    history.record("A", "C");

    for i in 0..pool.len() {
        for j in 0..pool.len() {
            if i != j {
                assert_eq!(
                    compatibility_score(&pool[i], &pool[j], &history),
                    compatibility_score(&pool[j], &pool[i], &history),
                );
            }
        }
    }
}

#[test]
fn test_scoring_constants() {
    assert_eq!(DIVERSITY_BONUS, 50.0);
    assert_eq!(INTEREST_WEIGHT, 10.0);
    assert_eq!(SAME_SECTION_PENALTY, -20.0);
    assert_eq!(HISTORY_PENALTY, -1000.0);
    // The history penalty must dominate every positive term a realistic
    // pair can accumulate, without being infinite.
    assert!(HISTORY_PENALTY.abs() > DIVERSITY_BONUS + 20.0 * INTEREST_WEIGHT);
}

#[test]
fn test_maximality_on_complete_graphs() {
    // A complete graph always admits a matching of floor(n/2) pairs.
    let history = HistorySet::new();
    for n in 2..=9 {
        let pool: Vec<Participant> = (0..n)
            .map(|i| {
                participant(
                    &format!("p{}", i),
                    if i % 2 == 0 { "X" } else { "Y" },
                    &format!("s{}", i % 3),
                    &[],
                )
            })
            .collect();
        let graph = CandidateGraph::build(&pool, &history).unwrap();
        let matching = maximum_weight_matching(&graph);
        assert!(matching.is_valid());
        assert_eq!(matching.len(), n / 2, "wrong cardinality for n={}", n);
        assert_eq!(matching.unmatched().len(), n % 2);
    }
}

#[test]
fn test_history_steers_away_from_repeats_when_avoidable() {
    // A-B were matched before. With four candidates the solver pairs
    // around the repeat even though A-B alone would score highest.
    let pool = vec![
        participant("A", "X", "1", &["music", "sports", "film"]),
        participant("B", "Y", "2", &["music", "sports", "film"]),
        participant("C", "X", "2", &[]),
        participant("D", "Y", "1", &[]),
    ];
    let mut history = HistorySet::new();
    history.record("A", "B");

    let graph = CandidateGraph::build(&pool, &history).unwrap();
    let matching = maximum_weight_matching(&graph);

    // A must not be re-paired with B.
    assert_ne!(matching.mate(0), Some(1));
    assert_eq!(matching.len(), 2);
}

#[test]
fn test_no_drift_between_solver_weight_and_recorded_score() {
    let pool = walkthrough_pool();
    let mut history = HistorySet::new();
    history.record("B", "C");

    let graph = CandidateGraph::build(&pool, &history).unwrap();
    let matching = maximum_weight_matching(&graph);
    let when = Utc.with_ymd_and_hms(2026, 9, 2, 13, 0, 0).unwrap();
    let records = assemble(&matching, &pool, &history, "Lunch", when, &LocationTable::default());

    for record in &records {
        let p1 = pool.iter().find(|p| p.id == record.participant_1_id).unwrap();
        let p2 = pool.iter().find(|p| p.id == record.participant_2_id).unwrap();
        assert_eq!(record.score, compatibility_score(p1, p2, &history));
        // And the recorded score is the weight the solver optimized.
        let edge_weight = graph
            .edges()
            .iter()
            .find(|&&(i, j, _)| {
                (pool[i].id == record.participant_1_id && pool[j].id == record.participant_2_id)
                    || (pool[j].id == record.participant_1_id
                        && pool[i].id == record.participant_2_id)
            })
            .map(|&(_, _, w)| w)
            .unwrap();
        assert_eq!(record.score, edge_weight);
    }
}

#[test]
fn test_pipeline_determinism() {
    let pool = walkthrough_pool();
    let history = HistorySet::new();

    let first = maximum_weight_matching(&CandidateGraph::build(&pool, &history).unwrap());
    let second = maximum_weight_matching(&CandidateGraph::build(&pool, &history).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_large_pool_smoke() {
    // Tens-to-low-hundreds is the expected pool size; make sure a
    // hundred-node complete graph solves and stays valid.
    let history = HistorySet::new();
    let interests = ["music", "sports", "film", "chess", "food"];
    let pool: Vec<Participant> = (0..100)
        .map(|i| {
            participant(
                &format!("p{}", i),
                ["X", "Y", "Z"][i % 3],
                ["1", "2", "3", "4"][i % 4],
                &interests[..(i % interests.len())],
            )
        })
        .collect();

    let graph = CandidateGraph::build(&pool, &history).unwrap();
    let matching = maximum_weight_matching(&graph);
    assert!(matching.is_valid());
    assert_eq!(matching.len(), 50);
}
