//! the contract between the sampler and a next-token scoring model.
//!
//! the sampler has no knowledge of how a model computes its output. it only
//! requires one logit per vocabulary token for a given token context.
mod oracle_error;
mod scoring_oracle;
mod serialized_oracle;

pub use oracle_error::OracleError;
pub use scoring_oracle::{Oracle, SequentialOracle};
pub use serialized_oracle::SerializedOracle;
