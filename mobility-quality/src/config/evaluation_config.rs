use super::RetryPolicy;
use crate::model::RouteQualityError;
use serde::{Deserialize, Serialize};

/// defines how route quality is evaluated against a reference router
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct EvaluationConfig {
    /// number of reference router queries in flight at once
    pub parallelism: usize,
    pub retry: RetryPolicy,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            retry: RetryPolicy::default(),
        }
    }
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<(), RouteQualityError> {
        if self.parallelism == 0 {
            return Err(RouteQualityError::ConfigurationError(String::from(
                "parallelism must be at least 1",
            )));
        }
        self.retry.validate()
    }
}

impl TryFrom<&String> for EvaluationConfig {
    type Error = RouteQualityError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let read = || {
            std::fs::read_to_string(f).map_err(|e| {
                RouteQualityError::ConfigurationError(format!("failure reading {f}: {e}"))
            })
        };
        let conf: EvaluationConfig = if f.ends_with(".toml") {
            toml::from_str(&read()?).map_err(|e| {
                RouteQualityError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else if f.ends_with(".json") {
            serde_json::from_str(&read()?).map_err(|e| {
                RouteQualityError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else {
            return Err(RouteQualityError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )));
        };
        conf.validate()?;
        Ok(conf)
    }
}
