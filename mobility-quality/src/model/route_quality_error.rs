use super::RouterError;
use mobility_core::model::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteQualityError {
    #[error("route quality requires at least 2 coordinates, found {0}")]
    InsufficientCoordinates(usize),
    #[error("coordinate {index} is invalid: {source}")]
    InvalidCoordinate { index: usize, source: CoreError },
    #[error("reference route for segment {segment} failed after {attempts} attempt(s): {source}")]
    RouterExhausted {
        segment: usize,
        attempts: u32,
        source: RouterError,
    },
    #[error("failure building evaluation thread pool: {0}")]
    ThreadPoolError(String),
    #[error("{0}")]
    ConfigurationError(String),
}
