use super::vocabulary::Token;
use mobility_core::model::{CoreError, SegmentId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrajectoryError {
    #[error("invalid generation input: {0}")]
    InvalidInput(String),
    #[error("cannot build a vocabulary from an empty set of road segment ids")]
    EmptyVocabulary,
    #[error("cannot build an adjacency constraint from an empty edge set")]
    EmptyEdgeSet,
    #[error("road segment '{0}' is too large to index a dense adjacency matrix")]
    UnaddressableSegment(SegmentId),
    #[error("road segment '{0}' not found in vocabulary")]
    UnknownSegment(SegmentId),
    #[error("token {token} out of range for vocabulary of size {size}")]
    UnknownToken { token: Token, size: usize },
    #[error("road segment '{0}' not found in road network")]
    MissingSegment(SegmentId),
    #[error("road segment '{0}' appears more than once in road network")]
    DuplicateSegment(SegmentId),
    #[error("edge {0} -> {1} refers to a road segment not in the road network")]
    DanglingEdge(SegmentId, SegmentId),
    #[error("road segment '{0}' has no start/end coordinates")]
    MissingCoordinates(SegmentId),
    #[error("trajectory {trajectory}, step {step}: oracle failed: {message}")]
    OracleFailure {
        trajectory: usize,
        step: usize,
        message: String,
    },
    #[error("trajectory {trajectory}, step {step}: oracle returned malformed logits: {message}")]
    MalformedLogits {
        trajectory: usize,
        step: usize,
        message: String,
    },
    #[error("trajectory {trajectory}, step {step}: no token has non-zero probability: {message}")]
    EmptySupport {
        trajectory: usize,
        step: usize,
        message: String,
    },
    #[error("failure reading generation configuration: {0}")]
    ConfigurationError(String),
    #[error(transparent)]
    CoreError(#[from] CoreError),
}

impl TrajectoryError {
    /// true when the error is scoped to a single trajectory of a batch, and
    /// other trajectories generated in the same call are unaffected.
    pub fn is_generation_error(&self) -> bool {
        matches!(
            self,
            TrajectoryError::OracleFailure { .. }
                | TrajectoryError::MalformedLogits { .. }
                | TrajectoryError::EmptySupport { .. }
        )
    }
}
