use crate::core::scoring::compatibility_score;
use crate::models::{HistorySet, Participant};

/// Complete undirected weighted graph over one run's candidate pool.
///
/// Nodes are indices into the participant slice the graph was built from;
/// edges hold every unordered pair exactly once with its compatibility
/// score. Nothing is pre-filtered: negative and zero weights are offered to
/// the solver so global optimality, not greedy pruning, decides the result.
/// Built fresh per run, never persisted.
#[derive(Debug, Clone)]
pub struct CandidateGraph {
    nodes: usize,
    edges: Vec<(usize, usize, f64)>,
}

impl CandidateGraph {
    /// Build the candidate graph for a pool of participants.
    ///
    /// Returns `None` for pools of fewer than two participants: an empty
    /// run is a legitimate outcome, not an error, and the caller
    /// short-circuits to an empty match set.
    pub fn build(participants: &[Participant], history: &HistorySet) -> Option<Self> {
        if participants.len() < 2 {
            return None;
        }

        let n = participants.len();
        let mut edges = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                let weight = compatibility_score(&participants[i], &participants[j], history);
                edges.push((i, j, weight));
            }
        }

        Some(Self { nodes: n, edges })
    }

    pub fn node_count(&self) -> usize {
        self.nodes
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in deterministic build order (i < j, lexicographic by index).
    pub fn edges(&self) -> &[(usize, usize, f64)] {
        &self.edges
    }

    /// Construct a graph directly from an edge list. Used by the solver
    /// tests; node count is explicit so isolated nodes are representable.
    pub fn from_edges(nodes: usize, edges: Vec<(usize, usize, f64)>) -> Self {
        debug_assert!(edges.iter().all(|&(i, j, _)| i != j && i < nodes && j < nodes));
        Self { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: &str, program: &str, section: &str) -> Participant {
        Participant {
            id: id.to_string(),
            program: program.to_string(),
            section: section.to_string(),
            interests: vec![],
            display_name: id.to_string(),
        }
    }

    #[test]
    fn test_insufficient_candidates() {
        let history = HistorySet::new();
        assert!(CandidateGraph::build(&[], &history).is_none());
        assert!(CandidateGraph::build(&[participant("a", "MBA", "A")], &history).is_none());
    }

    #[test]
    fn test_complete_graph_edge_count() {
        let history = HistorySet::new();
        let pool: Vec<Participant> = (0..5)
            .map(|i| participant(&format!("p{}", i), "MBA", "A"))
            .collect();

        let graph = CandidateGraph::build(&pool, &history).unwrap();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 10);
    }

    #[test]
    fn test_negative_edges_are_kept() {
        // Same program, same section: every pair scores -20.
        let history = HistorySet::new();
        let pool = vec![
            participant("a", "MBA", "A"),
            participant("b", "MBA", "A"),
        ];

        let graph = CandidateGraph::build(&pool, &history).unwrap();
        assert_eq!(graph.edges(), &[(0, 1, -20.0)]);
    }

    #[test]
    fn test_edge_order_is_deterministic() {
        let history = HistorySet::new();
        let pool: Vec<Participant> = (0..4)
            .map(|i| participant(&format!("p{}", i), "MBA", "A"))
            .collect();

        let graph = CandidateGraph::build(&pool, &history).unwrap();
        let indices: Vec<(usize, usize)> = graph.edges().iter().map(|&(i, j, _)| (i, j)).collect();
        assert_eq!(indices, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }
}
