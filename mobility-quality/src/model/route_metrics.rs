use super::{segment_metrics::ratio, SegmentMetrics};
use serde::{Deserialize, Serialize};

/// aggregate comparison of a trajectory against a reference router.
///
/// `total_distance_actual` covers every segment that was processed, while the
/// reference totals only cover segments the router answered for. segments
/// whose query failed are listed in `dropped_segments`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    pub total_distance_actual: f64,
    pub total_distance_reference: f64,
    pub total_duration_reference: f64,
    pub total_duration_traffic: f64,
    /// reference distance over actual distance
    pub route_efficiency: Option<f64>,
    /// duration in traffic over free-flow duration
    pub traffic_impact: Option<f64>,
    pub segments: Vec<SegmentMetrics>,
    pub dropped_segments: Vec<usize>,
    /// true if evaluation stopped before every segment was processed
    pub cancelled: bool,
}

impl RouteMetrics {
    /// folds per-segment results, given in route order, into route totals.
    ///
    /// # Arguments
    ///
    /// * `segments` - segments the reference router answered for
    /// * `dropped_segments` - indices of segments without a reference route
    /// * `total_distance_actual` - summed great-circle distance of all processed segments
    /// * `cancelled` - whether some segments were never processed
    pub fn new(
        segments: Vec<SegmentMetrics>,
        dropped_segments: Vec<usize>,
        total_distance_actual: f64,
        cancelled: bool,
    ) -> RouteMetrics {
        let total_distance_reference: f64 = segments.iter().map(|s| s.reference_distance).sum();
        let total_duration_reference: f64 = segments.iter().map(|s| s.reference_duration).sum();
        let total_duration_traffic: f64 = segments.iter().map(|s| s.duration_in_traffic).sum();
        let (route_efficiency, traffic_impact) = if segments.is_empty() {
            (None, None)
        } else {
            (
                ratio(total_distance_reference, total_distance_actual),
                ratio(total_duration_traffic, total_duration_reference),
            )
        };
        RouteMetrics {
            total_distance_actual,
            total_distance_reference,
            total_duration_reference,
            total_duration_traffic,
            route_efficiency,
            traffic_impact,
            segments,
            dropped_segments,
            cancelled,
        }
    }

    pub fn has_reference_segments(&self) -> bool {
        !self.segments.is_empty()
    }

    pub fn total_traffic_delay(&self) -> f64 {
        self.segments.iter().map(|s| s.traffic_delay()).sum()
    }
}
