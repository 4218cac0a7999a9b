pub mod algorithm;
pub mod config;
pub mod model;
