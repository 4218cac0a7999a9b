use super::{Termination, Trajectory};
use crate::model::TrajectoryError;
use mobility_core::model::SegmentId;
use serde::{Deserialize, Serialize};

/// the result of one generation call. each requested trajectory has its own
/// outcome, so a failure while sampling one trajectory leaves the others intact.
#[derive(Debug, Clone)]
pub struct GenerationBatch {
    pub origin: SegmentId,
    outcomes: Vec<Result<Trajectory, TrajectoryError>>,
}

/// counts of trajectory outcomes within a batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub completed: usize,
    pub truncated: usize,
    pub cancelled: usize,
    pub failed: usize,
}

impl GenerationBatch {
    pub fn new(origin: SegmentId, outcomes: Vec<Result<Trajectory, TrajectoryError>>) -> Self {
        Self { origin, outcomes }
    }

    /// per-trajectory outcomes, in the order they were requested
    pub fn outcomes(&self) -> &[Result<Trajectory, TrajectoryError>] {
        &self.outcomes
    }

    /// every trajectory that was produced, regardless of how it terminated
    pub fn trajectories(&self) -> impl Iterator<Item = &Trajectory> + '_ {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    /// the failed trajectories with their position in the batch
    pub fn failures(&self) -> impl Iterator<Item = (usize, &TrajectoryError)> + '_ {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(idx, o)| o.as_ref().err().map(|e| (idx, e)))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn summary(&self) -> GenerationSummary {
        self.outcomes
            .iter()
            .fold(GenerationSummary::default(), |mut acc, outcome| {
                match outcome {
                    Ok(t) => match t.termination {
                        Termination::EndOfSequence => acc.completed += 1,
                        Termination::Truncated => acc.truncated += 1,
                        Termination::Cancelled => acc.cancelled += 1,
                    },
                    Err(_) => acc.failed += 1,
                }
                acc
            })
    }
}
