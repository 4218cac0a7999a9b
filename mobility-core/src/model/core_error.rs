use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid road segment identifier '{0}': {1}")]
    InvalidSegmentId(String, String),
    #[error("invalid latitude {0}, must be in range [-90, 90]")]
    InvalidLatitude(f64),
    #[error("invalid longitude {0}, must be in range [-180, 180]")]
    InvalidLongitude(f64),
    #[error("road segment {0} has invalid length {1}, must be finite and non-negative")]
    InvalidSegmentLength(String, f64),
}
