mod generation_batch;
mod synthetic_trajectory;
mod termination;

pub use generation_batch::{GenerationBatch, GenerationSummary};
pub use synthetic_trajectory::Trajectory;
pub use termination::Termination;
