use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("scoring model failed: {0}")]
    ScoringFailed(String),
    #[error("scoring model lock was poisoned by a panicked caller")]
    LockPoisoned,
}
