use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// selects the storage used for the adjacency constraint
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjacencyRepresentation {
    /// `(M+2)²` boolean matrix
    #[default]
    Dense,
    /// successor sets per segment
    Sparse,
}

impl Display for AdjacencyRepresentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjacencyRepresentation::Dense => write!(f, "dense"),
            AdjacencyRepresentation::Sparse => write!(f, "sparse"),
        }
    }
}
