use mobility_core::model::{RoadSegment, SegmentId};
use std::collections::HashMap;

/// provides the physical length of a road segment, in meters, when known
pub trait GeometryLookup {
    fn segment_length(&self, id: &SegmentId) -> Option<f64>;
}

impl GeometryLookup for HashMap<SegmentId, f64> {
    fn segment_length(&self, id: &SegmentId) -> Option<f64> {
        self.get(id).copied()
    }
}

impl GeometryLookup for HashMap<SegmentId, RoadSegment> {
    fn segment_length(&self, id: &SegmentId) -> Option<f64> {
        self.get(id).map(|s| s.length)
    }
}
