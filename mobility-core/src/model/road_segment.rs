use super::{Coordinate, CoreError, SegmentId};
use serde::{Deserialize, Serialize};

/// a road segment of the network topology with its physical length in meters.
/// the start and end coordinates are only present when the topology source
/// carries geometry for the segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub id: SegmentId,
    pub length: f64,
    #[serde(default)]
    pub start: Option<Coordinate>,
    #[serde(default)]
    pub end: Option<Coordinate>,
}

impl RoadSegment {
    pub fn new(id: SegmentId, length: f64) -> Result<RoadSegment, CoreError> {
        if !length.is_finite() || length < 0.0 {
            return Err(CoreError::InvalidSegmentLength(id.to_string(), length));
        }
        Ok(RoadSegment {
            id,
            length,
            start: None,
            end: None,
        })
    }

    pub fn with_endpoints(mut self, start: Coordinate, end: Coordinate) -> RoadSegment {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_length() {
        assert!(RoadSegment::new(SegmentId(1), 12.5).is_ok());
        assert!(RoadSegment::new(SegmentId(1), -1.0).is_err());
        assert!(RoadSegment::new(SegmentId(1), f64::NAN).is_err());
    }

    #[test]
    fn test_with_endpoints() {
        let segment = RoadSegment::new(SegmentId(3), 10.0)
            .expect("valid segment")
            .with_endpoints((1.0, 2.0).into(), (1.5, 2.5).into());
        assert_eq!(segment.start, Some(Coordinate::from((1.0, 2.0))));
        assert_eq!(segment.end, Some(Coordinate::from((1.5, 2.5))));
    }
}
