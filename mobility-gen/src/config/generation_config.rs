use crate::{
    algorithm::sampling::MaskingPolicy,
    model::{adjacency::AdjacencyRepresentation, TrajectoryError},
};
use serde::{Deserialize, Serialize};

/// defines the behavior of a trajectory generation run
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// number of trajectories to sample from the origin
    pub count: usize,
    /// divides the logits before normalization. higher values flatten the
    /// distribution, lower values sharpen it. must be strictly positive.
    pub temperature: f64,
    /// maximum number of sampled segments per trajectory
    pub max_length: usize,
    /// when set, only the top-k logits remain eligible at each step
    pub top_k: Option<usize>,
    pub masking: MaskingPolicy,
    pub adjacency: AdjacencyRepresentation,
    /// sample trajectories of a batch on the rayon thread pool
    pub parallelize: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            count: 100,
            temperature: 1.0,
            max_length: 81,
            top_k: None,
            masking: MaskingPolicy::default(),
            adjacency: AdjacencyRepresentation::default(),
            parallelize: true,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), TrajectoryError> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            Err(TrajectoryError::InvalidInput(format!(
                "temperature must be finite and strictly positive, found {}",
                self.temperature
            )))
        } else if self.top_k == Some(0) {
            Err(TrajectoryError::InvalidInput(String::from(
                "top_k must be at least 1 when provided",
            )))
        } else {
            Ok(())
        }
    }
}

impl TryFrom<&String> for GenerationConfig {
    type Error = TrajectoryError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let conf: GenerationConfig = if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                TrajectoryError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                TrajectoryError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                TrajectoryError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                TrajectoryError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else {
            return Err(TrajectoryError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )));
        };
        conf.validate()?;
        Ok(conf)
    }
}
