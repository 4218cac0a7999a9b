use super::CoreError;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// identifier of a road segment in the network topology. road segments are the
/// nodes of the trajectory graph; directed edges between them are the legal
/// transitions a vehicle may take.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct SegmentId(pub u64);

impl SegmentId {
    /// the position of this segment in a dense (matrix) representation, if it
    /// can be addressed on this platform.
    pub fn as_index(&self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SegmentId {
    fn from(value: u64) -> Self {
        SegmentId(value)
    }
}

impl FromStr for SegmentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(SegmentId)
            .map_err(|e| CoreError::InvalidSegmentId(s.to_string(), e.to_string()))
    }
}
