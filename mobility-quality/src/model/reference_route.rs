use serde::{Deserialize, Serialize};

/// route facts reported by a reference router between two points.
/// distances are in meters and durations in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRoute {
    pub distance: f64,
    pub duration: f64,
    pub duration_in_traffic: f64,
    pub start_label: String,
    pub end_label: String,
}
