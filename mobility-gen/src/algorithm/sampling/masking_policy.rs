use serde::{Deserialize, Serialize};

/// where structurally illegal successors are removed from the next-token
/// distribution. this choice affects reproducibility: the same oracle and
/// seed produce different trajectories under different policies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskingPolicy {
    /// the sampler sets the logit of every token not reachable from the
    /// current segment to negative infinity, after temperature scaling and
    /// before top-k filtering
    #[default]
    PostFilter,
    /// the oracle is trusted to mask its own logits, typically because the
    /// model consumes the adjacency constraint internally
    Delegated,
}
