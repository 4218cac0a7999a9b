use super::{Oracle, OracleError, SequentialOracle};
use crate::model::vocabulary::Token;
use std::sync::Mutex;

/// serializes calls to a non-thread-safe model so that it may be shared
/// across parallel trajectory workers.
#[derive(Debug)]
pub struct SerializedOracle<S> {
    inner: Mutex<S>,
}

impl<S: SequentialOracle> SerializedOracle<S> {
    pub fn new(oracle: S) -> SerializedOracle<S> {
        SerializedOracle {
            inner: Mutex::new(oracle),
        }
    }

    pub fn into_inner(self) -> Result<S, OracleError> {
        self.inner.into_inner().map_err(|_| OracleError::LockPoisoned)
    }
}

impl<S: SequentialOracle> Oracle for SerializedOracle<S> {
    fn score(&self, context: &[Token]) -> Result<Vec<f64>, OracleError> {
        let mut oracle = self.inner.lock().map_err(|_| OracleError::LockPoisoned)?;
        oracle.score(context)
    }
}
