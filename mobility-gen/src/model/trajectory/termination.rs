use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// how the decoding loop of a trajectory came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// the oracle emitted the end-of-sequence token
    EndOfSequence,
    /// the maximum length was reached without an end-of-sequence token
    Truncated,
    /// a cancellation request arrived before the trajectory terminated
    Cancelled,
}

impl Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::EndOfSequence => write!(f, "end_of_sequence"),
            Termination::Truncated => write!(f, "truncated"),
            Termination::Cancelled => write!(f, "cancelled"),
        }
    }
}
