mod evaluation_config;
mod retry_policy;

pub use evaluation_config::EvaluationConfig;
pub use retry_policy::RetryPolicy;
