//! Assembly-point identification and application.
//!
//! One pass per target multicolor: carve relevant subnets out of every connected
//! component, score each support edge, select a conflict-free set of joins and commit
//! them with 2-breaks before the next target is tried.

pub mod apply;
pub mod orchestrator;
pub mod score;
pub mod select;
pub mod subnet;
pub mod targets;

pub use apply::assemble_points;
pub use orchestrator::{AssemblyRecord, Scaffolder};
pub use score::{RepeatScorer, Scoring};
pub use select::{select_by_matching, select_greedy_per_repeat};
pub use subnet::{irregular_subnets, repeat_subnets, RepeatSubnets};
pub use targets::expand_targets;

use crate::libs::bg::Vertex;
use serde::Serialize;

/// A scored join between two fragment ends.
///
/// `after` already includes the offset of the target multicolor, so
/// `score == before - after`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyPoint {
    pub v1: Vertex,
    pub v2: Vertex,
    pub score: i64,
    pub before: usize,
    pub after: usize,
    /// Repeat whose copy the join runs through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<String>,
    /// Target genomes already present on the support edge.
    pub s_support: Vec<String>,
}

impl AssemblyPoint {
    /// Same join seen from the other end.
    pub fn reversed(&self) -> Self {
        Self {
            v1: self.v2.clone(),
            v2: self.v1.clone(),
            ..self.clone()
        }
    }
}
