use thiserror::Error;

/// failure reported by a reference router for a single coordinate pair
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouterError {
    /// transport-level failure, worth retrying
    #[error("network failure while querying reference router: {0}")]
    Network(String),
    /// the router answered but has no route for this pair
    #[error("reference router has no route: {0}")]
    Unavailable(String),
}

impl RouterError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, RouterError::Network(_))
    }
}
