use crate::{
    config::EvaluationConfig,
    model::{ReferenceRoute, ReferenceRouter, RouteMetrics, RouteQualityError, SegmentMetrics},
};
use itertools::Itertools;
use mobility_core::{model::Coordinate, util::CancellationSignal};
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use std::thread;

/// compares consecutive coordinate pairs of a trajectory against a reference
/// router. router queries run on a dedicated bounded thread pool so that a
/// slow mapping service never saturates the global rayon pool.
pub struct RouteQualityEvaluator {
    config: EvaluationConfig,
    pool: ThreadPool,
}

/// what happened to a single consecutive coordinate pair
enum SegmentOutcome {
    Measured(SegmentMetrics),
    Dropped { index: usize, actual_distance: f64 },
    Skipped,
}

impl RouteQualityEvaluator {
    pub fn new(config: EvaluationConfig) -> Result<RouteQualityEvaluator, RouteQualityError> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.parallelism)
            .thread_name(|i| format!("route-quality-{i}"))
            .build()
            .map_err(|e| RouteQualityError::ThreadPoolError(e.to_string()))?;
        Ok(RouteQualityEvaluator { config, pool })
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// scores a route against the reference router.
    ///
    /// # Arguments
    ///
    /// * `coordinates` - the route as an ordered sequence of positions
    /// * `router` - reference router queried once per consecutive pair
    /// * `actual_times` - optional observed travel time per segment, in seconds.
    ///   entry `i` is attached to segment `i`, extra entries are ignored.
    /// * `cancel` - checked before each router query
    ///
    /// # Returns
    ///
    /// * route metrics, which may hold no reference segments when every query
    ///   failed. fails only when fewer than 2 coordinates are provided or a
    ///   coordinate is outside of the valid latitude/longitude range.
    pub fn evaluate<R>(
        &self,
        coordinates: &[Coordinate],
        router: &R,
        actual_times: Option<&[f64]>,
        cancel: &CancellationSignal,
    ) -> Result<RouteMetrics, RouteQualityError>
    where
        R: ReferenceRouter + ?Sized,
    {
        if coordinates.len() < 2 {
            return Err(RouteQualityError::InsufficientCoordinates(
                coordinates.len(),
            ));
        }
        for (index, c) in coordinates.iter().enumerate() {
            Coordinate::try_new(c.latitude, c.longitude)
                .map_err(|source| RouteQualityError::InvalidCoordinate { index, source })?;
        }
        let pairs = coordinates.iter().tuple_windows().enumerate().collect_vec();
        log::debug!(
            "evaluating {} segments with {} thread(s)",
            pairs.len(),
            self.config.parallelism
        );

        let outcomes: Vec<SegmentOutcome> = self.pool.install(|| {
            pairs
                .par_iter()
                .map(|(index, (src, dst))| {
                    let observed = actual_times.and_then(|times| times.get(*index).copied());
                    self.evaluate_segment(*index, src, dst, router, observed, cancel)
                })
                .collect()
        });

        let mut segments = vec![];
        let mut dropped_segments = vec![];
        let mut total_distance_actual = 0.0;
        let mut cancelled = false;
        for outcome in outcomes {
            match outcome {
                SegmentOutcome::Measured(segment) => {
                    total_distance_actual += segment.actual_distance;
                    segments.push(segment);
                }
                SegmentOutcome::Dropped {
                    index,
                    actual_distance,
                } => {
                    total_distance_actual += actual_distance;
                    dropped_segments.push(index);
                }
                SegmentOutcome::Skipped => cancelled = true,
            }
        }

        if !dropped_segments.is_empty() {
            log::warn!(
                "{} of {} segments have no reference route: {:?}",
                dropped_segments.len(),
                pairs.len(),
                dropped_segments
            );
        }
        if cancelled {
            log::info!("route evaluation cancelled, metrics cover processed segments only");
        }
        Ok(RouteMetrics::new(
            segments,
            dropped_segments,
            total_distance_actual,
            cancelled,
        ))
    }

    fn evaluate_segment<R>(
        &self,
        index: usize,
        src: &Coordinate,
        dst: &Coordinate,
        router: &R,
        observed_duration: Option<f64>,
        cancel: &CancellationSignal,
    ) -> SegmentOutcome
    where
        R: ReferenceRouter + ?Sized,
    {
        if cancel.is_cancelled() {
            return SegmentOutcome::Skipped;
        }
        let actual_distance = src.haversine_to(dst);
        match self.query_with_retry(index, src, dst, router, cancel) {
            Ok(route) => {
                log::debug!(
                    "segment {index}: actual {actual_distance:.2}m, reference {:.2}m",
                    route.distance
                );
                SegmentOutcome::Measured(SegmentMetrics::new(
                    index,
                    *src,
                    *dst,
                    actual_distance,
                    route,
                    observed_duration,
                ))
            }
            Err(e) => {
                log::warn!("{e}");
                SegmentOutcome::Dropped {
                    index,
                    actual_distance,
                }
            }
        }
    }

    /// queries the router, retrying network failures with backoff until the
    /// retry policy is exhausted or the evaluation is cancelled
    fn query_with_retry<R>(
        &self,
        index: usize,
        src: &Coordinate,
        dst: &Coordinate,
        router: &R,
        cancel: &CancellationSignal,
    ) -> Result<ReferenceRoute, RouteQualityError>
    where
        R: ReferenceRouter + ?Sized,
    {
        let policy = &self.config.retry;
        let mut attempt = 1;
        loop {
            match router.route(src, dst) {
                Ok(route) => return Ok(route),
                Err(e)
                    if e.is_retryable()
                        && attempt < policy.max_attempts
                        && !cancel.is_cancelled() =>
                {
                    let wait = policy.backoff(attempt);
                    log::debug!(
                        "segment {index} attempt {attempt} of {} failed, retrying in {}ms: {e}",
                        policy.max_attempts,
                        wait.as_millis()
                    );
                    thread::sleep(wait);
                    attempt += 1;
                }
                Err(source) => {
                    return Err(RouteQualityError::RouterExhausted {
                        segment: index,
                        attempts: attempt,
                        source,
                    })
                }
            }
        }
    }
}
