mod generation_config;

pub use generation_config::GenerationConfig;
