pub mod adjacency;
pub mod network;
pub mod oracle;
pub mod trajectory;
mod trajectory_error;
pub mod vocabulary;

pub use trajectory_error::TrajectoryError;
