use mobility_core::model::SegmentId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// the decoded meaning of a token: either a road segment or the reserved
/// end-of-sequence marker which terminates a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenValue {
    Segment(SegmentId),
    EndOfSequence,
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::Segment(id) => write!(f, "{id}"),
            TokenValue::EndOfSequence => write!(f, "</S>"),
        }
    }
}
