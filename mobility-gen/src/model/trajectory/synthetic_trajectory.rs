use super::Termination;
use mobility_core::model::SegmentId;
use serde::{Deserialize, Serialize};
use std::iter;

/// a sampled sequence of road segments departing from an origin segment.
///
/// `segments` only holds sampled segments: the origin is kept separately and
/// the end-of-sequence marker is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trajectory {
    pub origin: SegmentId,
    pub segments: Vec<SegmentId>,
    pub termination: Termination,
}

impl Trajectory {
    pub fn new(origin: SegmentId, segments: Vec<SegmentId>, termination: Termination) -> Self {
        Self {
            origin,
            segments,
            termination,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.termination == Termination::Truncated
    }

    pub fn is_cancelled(&self) -> bool {
        self.termination == Termination::Cancelled
    }

    /// the full path, starting with the origin and followed by every sampled segment
    pub fn path(&self) -> impl Iterator<Item = &SegmentId> + '_ {
        iter::once(&self.origin).chain(self.segments.iter())
    }
}
