mod cancellation;
pub mod geo_utils;

pub use cancellation::CancellationSignal;
