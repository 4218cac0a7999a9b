mod coordinate;
mod core_error;
mod road_segment;
mod segment_id;

pub use coordinate::Coordinate;
pub use core_error::CoreError;
pub use road_segment::RoadSegment;
pub use segment_id::SegmentId;
