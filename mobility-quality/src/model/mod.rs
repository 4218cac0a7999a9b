mod reference_route;
mod reference_router;
mod route_metrics;
mod route_quality_error;
mod router_error;
mod segment_metrics;

pub use reference_route::ReferenceRoute;
pub use reference_router::ReferenceRouter;
pub use route_metrics::RouteMetrics;
pub use route_quality_error::RouteQualityError;
pub use router_error::RouterError;
pub use segment_metrics::SegmentMetrics;
