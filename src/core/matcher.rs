use crate::core::assembler::{assemble, unmatched, LocationTable};
use crate::core::graph::CandidateGraph;
use crate::core::matching::maximum_weight_matching;
use crate::models::{HistorySet, MatchRecord, Participant};
use thiserror::Error;

/// Errors produced before any solver work begins.
///
/// Note what is NOT here: a pool of fewer than two participants is a
/// legitimate empty outcome (see `MatchOutcome`), and a solver invariant
/// violation is a fatal bug, not a reportable error.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid participant data: {0}")]
    InvalidParticipant(String),
}

/// Result of one matching run.
#[derive(Debug)]
pub struct MatchOutcome {
    pub records: Vec<MatchRecord>,
    /// Ids of participants left without a partner.
    pub unmatched: Vec<String>,
    pub total_candidates: usize,
}

impl MatchOutcome {
    fn empty(total_candidates: usize, pool: &[Participant]) -> Self {
        Self {
            records: Vec::new(),
            unmatched: pool.iter().map(|p| p.id.clone()).collect(),
            total_candidates,
        }
    }
}

/// Run orchestrator: validate -> score -> solve -> assemble.
///
/// Pure and synchronous; one run is entirely CPU-bound on a single thread
/// and performs no I/O. Everything that talks to storage lives behind the
/// persistence collaborator in the route layer.
#[derive(Debug, Clone)]
pub struct Matcher {
    locations: LocationTable,
}

impl Matcher {
    pub fn new(locations: LocationTable) -> Self {
        Self { locations }
    }

    pub fn with_default_locations() -> Self {
        Self {
            locations: LocationTable::default(),
        }
    }

    /// Pair up a candidate pool for one activity slot.
    ///
    /// Input-shape errors are reported before any solver work. Pools of
    /// fewer than two validated participants short-circuit to an empty
    /// outcome. A matching that violates the disjointness invariant
    /// indicates a solver defect and aborts the run rather than returning
    /// a partially-correct result.
    pub fn run(
        &self,
        participants: &[Participant],
        history: &HistorySet,
        activity_type: &str,
        scheduled_time: chrono::DateTime<chrono::Utc>,
    ) -> Result<MatchOutcome, MatchError> {
        for p in participants {
            p.validate().map_err(MatchError::InvalidParticipant)?;
        }

        let graph = match CandidateGraph::build(participants, history) {
            Some(graph) => graph,
            None => {
                tracing::info!(
                    "Insufficient candidates for {} ({} in pool), returning empty match set",
                    activity_type,
                    participants.len()
                );
                return Ok(MatchOutcome::empty(participants.len(), participants));
            }
        };

        tracing::debug!(
            "Built candidate graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        let matching = maximum_weight_matching(&graph);
        assert!(
            matching.is_valid(),
            "matching invariant violated: a participant is covered by two pairs"
        );

        let records = assemble(
            &matching,
            participants,
            history,
            activity_type,
            scheduled_time,
            &self.locations,
        );
        let unmatched_ids = unmatched(&matching, participants)
            .into_iter()
            .map(|p| p.id.clone())
            .collect();

        Ok(MatchOutcome {
            records,
            unmatched: unmatched_ids,
            total_candidates: participants.len(),
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_locations()
    }
}
