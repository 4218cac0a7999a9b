use super::ReferenceRoute;
use mobility_core::model::Coordinate;
use serde::{Deserialize, Serialize};

/// comparison of one trajectory segment against its reference route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentMetrics {
    /// position of the segment along the route, starting at 0
    pub segment_index: usize,
    pub start_point: Coordinate,
    pub end_point: Coordinate,
    /// great-circle distance between the endpoints, in meters
    pub actual_distance: f64,
    pub reference_distance: f64,
    pub reference_duration: f64,
    pub duration_in_traffic: f64,
    pub start_label: String,
    pub end_label: String,
    /// travel time observed on the trajectory itself, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_duration: Option<f64>,
}

impl SegmentMetrics {
    pub fn new(
        segment_index: usize,
        start_point: Coordinate,
        end_point: Coordinate,
        actual_distance: f64,
        route: ReferenceRoute,
        observed_duration: Option<f64>,
    ) -> SegmentMetrics {
        SegmentMetrics {
            segment_index,
            start_point,
            end_point,
            actual_distance,
            reference_distance: route.distance,
            reference_duration: route.duration,
            duration_in_traffic: route.duration_in_traffic,
            start_label: route.start_label,
            end_label: route.end_label,
            observed_duration,
        }
    }

    pub fn traffic_delay(&self) -> f64 {
        self.duration_in_traffic - self.reference_duration
    }

    /// reference distance over actual distance, undefined for a zero-length segment
    pub fn efficiency(&self) -> Option<f64> {
        ratio(self.reference_distance, self.actual_distance)
    }
}

pub(crate) fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}
