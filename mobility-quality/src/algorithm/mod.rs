mod route_quality_evaluator;

pub use route_quality_evaluator::RouteQualityEvaluator;
