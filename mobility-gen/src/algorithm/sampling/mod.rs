pub mod logits_ops;
mod masking_policy;
mod trajectory_sampler;

pub use masking_policy::MaskingPolicy;
pub use trajectory_sampler::TrajectorySampler;
