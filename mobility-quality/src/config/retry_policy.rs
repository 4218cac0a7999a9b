use crate::model::RouteQualityError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// bounded exponential backoff applied to retryable reference router failures
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct RetryPolicy {
    /// total number of queries per segment, including the first one
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 250,
            backoff_multiplier: 2.0,
            max_backoff_ms: 5000,
        }
    }
}

impl RetryPolicy {
    /// a policy that queries each segment exactly once
    pub fn no_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 1,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), RouteQualityError> {
        if self.max_attempts == 0 {
            Err(RouteQualityError::ConfigurationError(String::from(
                "retry max_attempts must be at least 1",
            )))
        } else if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            Err(RouteQualityError::ConfigurationError(format!(
                "retry backoff_multiplier must be finite and >= 1, found {}",
                self.backoff_multiplier
            )))
        } else {
            Ok(())
        }
    }

    /// wait time after the failed attempt number `attempt` (starting at 1)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let ms = (self.initial_backoff_ms as f64) * self.backoff_multiplier.powi(exponent);
        let capped = ms.min(self.max_backoff_ms as f64);
        Duration::from_millis(capped as u64)
    }
}
