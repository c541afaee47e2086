// Core algorithm exports
pub mod assembler;
pub mod graph;
pub mod matcher;
pub mod matching;
pub mod scoring;

pub use assembler::{assemble, unmatched, LocationTable};
pub use graph::CandidateGraph;
pub use matcher::{MatchError, MatchOutcome, Matcher};
pub use matching::maximum_weight_matching;
pub use scoring::compatibility_score;
