use super::OracleError;
use crate::model::vocabulary::Token;
use std::sync::Arc;

/// a thread-safe scoring model. given a token context, returns one
/// unnormalized log-probability per vocabulary token for the next position.
///
/// implementations must be referentially stable: identical contexts produce
/// identical logits. a logit of negative infinity marks a token as impossible.
pub trait Oracle: Send + Sync {
    fn score(&self, context: &[Token]) -> Result<Vec<f64>, OracleError>;
}

/// a scoring model which can only be invoked by one caller at a time,
/// such as a single-threaded model runtime. wrap in a
/// [`super::SerializedOracle`] to share it with the sampler.
pub trait SequentialOracle: Send {
    fn score(&mut self, context: &[Token]) -> Result<Vec<f64>, OracleError>;
}

impl<O: Oracle + ?Sized> Oracle for Arc<O> {
    fn score(&self, context: &[Token]) -> Result<Vec<f64>, OracleError> {
        (**self).score(context)
    }
}

impl<O: Oracle + ?Sized> Oracle for Box<O> {
    fn score(&self, context: &[Token]) -> Result<Vec<f64>, OracleError> {
        (**self).score(context)
    }
}
