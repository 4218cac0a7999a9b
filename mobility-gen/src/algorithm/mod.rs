pub mod sampling;
pub mod segment_length;
