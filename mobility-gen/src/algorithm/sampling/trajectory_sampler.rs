use super::{logits_ops, MaskingPolicy};
use crate::{
    config::GenerationConfig,
    model::{
        adjacency::{AdjacencyConstraint, Reachability},
        oracle::Oracle,
        trajectory::{GenerationBatch, Termination, Trajectory},
        vocabulary::{GraphVocabulary, Token, TokenValue},
        TrajectoryError,
    },
};
use itertools::Itertools;
use mobility_core::{model::SegmentId, util::CancellationSignal};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use std::{iter, sync::Arc};

/// autoregressive trajectory decoder over a road network vocabulary.
///
/// each step asks the oracle for next-token logits given the tokens sampled so
/// far, reshapes them (temperature, adjacency masking, top-k), normalizes them
/// with a softmax and draws the next road segment. a trajectory ends when the
/// end-of-sequence token is drawn or after `max_length` steps.
///
/// the vocabulary and adjacency constraint are read-only and shared between
/// all trajectories of a batch.
pub struct TrajectorySampler {
    oracle: Arc<dyn Oracle>,
    vocabulary: Arc<GraphVocabulary>,
    adjacency: Arc<AdjacencyConstraint>,
    /// adjacency index of each token, in token order
    token_indices: Vec<usize>,
}

impl TrajectorySampler {
    pub fn new(
        oracle: Arc<dyn Oracle>,
        vocabulary: Arc<GraphVocabulary>,
        adjacency: Arc<AdjacencyConstraint>,
    ) -> TrajectorySampler {
        let token_indices = vocabulary
            .segment_ids()
            .iter()
            .map(|id| adjacency.index_of(&TokenValue::Segment(*id)))
            .chain(iter::once(adjacency.index_of(&TokenValue::EndOfSequence)))
            .collect_vec();
        TrajectorySampler {
            oracle,
            vocabulary,
            adjacency,
            token_indices,
        }
    }

    pub fn vocabulary(&self) -> &GraphVocabulary {
        &self.vocabulary
    }

    pub fn adjacency(&self) -> &AdjacencyConstraint {
        &self.adjacency
    }

    /// samples `config.count` independent trajectories from an origin segment.
    ///
    /// the provided randomness source seeds one stream per trajectory in
    /// trajectory order, so a seeded source reproduces the same batch whether
    /// or not the batch is sampled in parallel.
    ///
    /// # Arguments
    ///
    /// * `origin` - road segment every trajectory departs from
    /// * `config` - sampling parameters
    /// * `rng` - randomness source
    /// * `cancel` - checked before every decoding step
    ///
    /// # Returns
    ///
    /// * one outcome per requested trajectory. fails as a whole only when the
    ///   origin is unknown or the parameters are invalid.
    pub fn generate<R: Rng>(
        &self,
        origin: &SegmentId,
        config: &GenerationConfig,
        rng: &mut R,
        cancel: &CancellationSignal,
    ) -> Result<GenerationBatch, TrajectoryError> {
        config.validate()?;
        let origin_token = self.vocabulary.encode(origin)?;
        let seeds = (0..config.count).map(|_| rng.random::<u64>()).collect_vec();

        let run = |(index, seed): (usize, u64)| {
            let mut trajectory_rng = StdRng::seed_from_u64(seed);
            let outcome = self.sample_trajectory(
                index,
                origin,
                origin_token,
                config,
                &mut trajectory_rng,
                cancel,
            );
            if let Err(e) = &outcome {
                log::warn!("trajectory {index} from origin {origin} failed: {e}");
            }
            outcome
        };
        let outcomes = if config.parallelize {
            seeds.into_par_iter().enumerate().map(run).collect::<Vec<_>>()
        } else {
            seeds.into_iter().enumerate().map(run).collect::<Vec<_>>()
        };

        let batch = GenerationBatch::new(*origin, outcomes);
        let summary = batch.summary();
        log::info!(
            "generated {} trajectories from origin {origin}: {} completed, {} truncated, {} cancelled, {} failed",
            batch.len(),
            summary.completed,
            summary.truncated,
            summary.cancelled,
            summary.failed
        );
        Ok(batch)
    }

    /// runs the decoding loop for a single trajectory
    fn sample_trajectory<R: Rng>(
        &self,
        index: usize,
        origin: &SegmentId,
        origin_token: Token,
        config: &GenerationConfig,
        rng: &mut R,
        cancel: &CancellationSignal,
    ) -> Result<Trajectory, TrajectoryError> {
        let mut context: Vec<Token> = vec![self.vocabulary.eos_token(), origin_token];
        let mut segments: Vec<SegmentId> = Vec::new();

        for step in 0..config.max_length {
            if cancel.is_cancelled() {
                log::debug!("trajectory {index} cancelled at step {step}");
                return Ok(Trajectory::new(*origin, segments, Termination::Cancelled));
            }
            let token = self.next_token(index, step, &context, config, rng)?;
            context.push(token);
            match self.vocabulary.decode(token)? {
                TokenValue::EndOfSequence => {
                    log::debug!("trajectory {index} reached end of sequence at step {step}");
                    return Ok(Trajectory::new(
                        *origin,
                        segments,
                        Termination::EndOfSequence,
                    ));
                }
                TokenValue::Segment(id) => segments.push(id),
            }
        }
        Ok(Trajectory::new(*origin, segments, Termination::Truncated))
    }

    /// scores the context and draws the next token
    fn next_token<R: Rng>(
        &self,
        trajectory: usize,
        step: usize,
        context: &[Token],
        config: &GenerationConfig,
        rng: &mut R,
    ) -> Result<Token, TrajectoryError> {
        let mut logits =
            self.oracle
                .score(context)
                .map_err(|e| TrajectoryError::OracleFailure {
                    trajectory,
                    step,
                    message: e.to_string(),
                })?;
        logits_ops::validate_logits(&logits, self.vocabulary.size()).map_err(|message| {
            TrajectoryError::MalformedLogits {
                trajectory,
                step,
                message,
            }
        })?;

        logits_ops::apply_temperature(&mut logits, config.temperature);
        if config.masking == MaskingPolicy::PostFilter {
            if let Some(current) = context.last().and_then(|t| self.token_indices.get(*t)) {
                logits_ops::apply_mask(&mut logits, |candidate| {
                    self.token_indices
                        .get(candidate)
                        .map(|next| self.adjacency.is_reachable(*current, *next))
                        .unwrap_or(false)
                });
            }
        }
        if let Some(k) = config.top_k {
            logits_ops::retain_top_k(&mut logits, k);
        }

        let empty_support = |message: String| TrajectoryError::EmptySupport {
            trajectory,
            step,
            message,
        };
        let probabilities = logits_ops::softmax(&logits)
            .ok_or_else(|| empty_support(String::from("every token was masked")))?;
        logits_ops::draw(&probabilities, rng).map_err(empty_support)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        adjacency::{AdjacencyRepresentation, SegmentEdge},
        oracle::{OracleError, SequentialOracle, SerializedOracle},
    };
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicUsize, Ordering},
    };

    /// equal logits for every token
    struct UniformOracle {
        size: usize,
    }

    impl Oracle for UniformOracle {
        fn score(&self, _context: &[Token]) -> Result<Vec<f64>, OracleError> {
            Ok(vec![0.0; self.size])
        }
    }

    /// puts all probability mass on one scripted successor of the last token
    struct ChainOracle {
        size: usize,
        next: HashMap<Token, Token>,
    }

    impl Oracle for ChainOracle {
        fn score(&self, context: &[Token]) -> Result<Vec<f64>, OracleError> {
            let mut logits = vec![f64::NEG_INFINITY; self.size];
            let last = context.last().copied().unwrap_or_default();
            let next = self.next.get(&last).copied().unwrap_or(self.size - 1);
            logits[next] = 0.0;
            Ok(logits)
        }
    }

    /// fixed logits regardless of the context
    struct FixedOracle {
        logits: Vec<f64>,
    }

    impl Oracle for FixedOracle {
        fn score(&self, _context: &[Token]) -> Result<Vec<f64>, OracleError> {
            Ok(self.logits.clone())
        }
    }

    /// fails on the first call only, then defers to the inner oracle
    struct FailFirstOracle<O> {
        calls: AtomicUsize,
        inner: O,
    }

    impl<O: Oracle> Oracle for FailFirstOracle<O> {
        fn score(&self, context: &[Token]) -> Result<Vec<f64>, OracleError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(OracleError::ScoringFailed(String::from("model offline")))
            } else {
                self.inner.score(context)
            }
        }
    }

    fn edges(pairs: &[(u64, u64)]) -> Vec<SegmentEdge> {
        pairs
            .iter()
            .map(|(o, d)| (SegmentId(*o), SegmentId(*d)))
            .collect()
    }

    /// a three-segment cycle 0 -> 1 -> 2 -> 0
    fn cycle_sampler(oracle: Arc<dyn Oracle>) -> TrajectorySampler {
        let vocabulary = GraphVocabulary::build((0..3).map(SegmentId)).expect("non-empty");
        let adjacency = AdjacencyConstraint::build(
            &edges(&[(0, 1), (1, 2), (2, 0)]),
            &AdjacencyRepresentation::Dense,
        )
        .expect("non-empty");
        TrajectorySampler::new(oracle, Arc::new(vocabulary), Arc::new(adjacency))
    }

    fn sequential(count: usize, max_length: usize) -> GenerationConfig {
        GenerationConfig {
            count,
            max_length,
            parallelize: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_max_length_yields_empty_trajectories() {
        let _ = env_logger::builder().is_test(true).try_init();
        let sampler = cycle_sampler(Arc::new(UniformOracle { size: 4 }));
        let mut rng = StdRng::seed_from_u64(0);
        let batch = sampler
            .generate(
                &SegmentId(0),
                &sequential(7, 0),
                &mut rng,
                &CancellationSignal::new(),
            )
            .expect("valid request");
        assert_eq!(batch.len(), 7);
        for t in batch.trajectories() {
            assert!(t.is_empty());
            assert!(t.is_truncated());
        }
        assert_eq!(batch.summary().truncated, 7);
    }

    #[test]
    fn test_end_of_sequence_is_not_emitted() {
        // 0 -> 1 -> 2 -> EOS
        let oracle = ChainOracle {
            size: 4,
            next: HashMap::from([(0, 1), (1, 2), (2, 3)]),
        };
        let sampler = cycle_sampler(Arc::new(oracle));
        let mut rng = StdRng::seed_from_u64(1);
        let batch = sampler
            .generate(
                &SegmentId(0),
                &sequential(3, 10),
                &mut rng,
                &CancellationSignal::new(),
            )
            .expect("valid request");
        for t in batch.trajectories() {
            assert_eq!(t.segments, vec![SegmentId(1), SegmentId(2)]);
            assert_eq!(t.termination, Termination::EndOfSequence);
        }
        assert_eq!(batch.summary().completed, 3);
    }

    #[test]
    fn test_post_filter_only_follows_edges() {
        let sampler = cycle_sampler(Arc::new(UniformOracle { size: 4 }));
        let mut rng = StdRng::seed_from_u64(42);
        let batch = sampler
            .generate(
                &SegmentId(0),
                &sequential(50, 30),
                &mut rng,
                &CancellationSignal::new(),
            )
            .expect("valid request");
        let legal = [(0, 1), (1, 2), (2, 0)];
        for t in batch.trajectories() {
            let path = t.path().map(|id| id.0).collect_vec();
            for (o, d) in path.iter().tuple_windows() {
                assert!(legal.contains(&(*o, *d)), "illegal transition {o} -> {d}");
            }
        }
    }

    #[test]
    fn test_post_filter_with_sparse_ids() {
        let vocabulary =
            GraphVocabulary::build(vec![SegmentId(10), SegmentId(20), SegmentId(30)])
                .expect("non-empty");
        let adjacency = AdjacencyConstraint::build(
            &edges(&[(10, 20), (20, 30)]),
            &AdjacencyRepresentation::Sparse,
        )
        .expect("non-empty");
        let sampler = TrajectorySampler::new(
            Arc::new(UniformOracle { size: 4 }),
            Arc::new(vocabulary),
            Arc::new(adjacency),
        );
        let mut rng = StdRng::seed_from_u64(3);
        let batch = sampler
            .generate(
                &SegmentId(10),
                &sequential(40, 10),
                &mut rng,
                &CancellationSignal::new(),
            )
            .expect("valid request");
        for t in batch.trajectories() {
            assert!(t.len() <= 2);
            let expected = [SegmentId(20), SegmentId(30)];
            assert_eq!(t.segments.as_slice(), &expected[..t.len()]);
            assert_eq!(t.termination, Termination::EndOfSequence);
        }
    }

    #[test]
    fn test_top_k_one_is_greedy() {
        // prefers 2, then 1, then 0; EOS is least likely
        let oracle = FixedOracle {
            logits: vec![0.0, 1.0, 2.0, -1.0],
        };
        let sampler = cycle_sampler(Arc::new(oracle));
        let config = GenerationConfig {
            top_k: Some(1),
            ..sequential(2, 5)
        };
        let mut rng = StdRng::seed_from_u64(9);
        let batch = sampler
            .generate(&SegmentId(0), &config, &mut rng, &CancellationSignal::new())
            .expect("valid request");
        for t in batch.trajectories() {
            assert_eq!(
                t.segments,
                vec![
                    SegmentId(1),
                    SegmentId(2),
                    SegmentId(0),
                    SegmentId(1),
                    SegmentId(2)
                ]
            );
            assert!(t.is_truncated());
        }
    }

    #[test]
    fn test_same_seed_reproduces_batch_in_parallel() {
        let sampler = cycle_sampler(Arc::new(UniformOracle { size: 4 }));
        let seq_conf = sequential(25, 20);
        let par_conf = GenerationConfig {
            parallelize: true,
            ..seq_conf.clone()
        };
        let cancel = CancellationSignal::new();
        let a = sampler
            .generate(&SegmentId(1), &seq_conf, &mut StdRng::seed_from_u64(11), &cancel)
            .expect("valid request");
        let b = sampler
            .generate(&SegmentId(1), &par_conf, &mut StdRng::seed_from_u64(11), &cancel)
            .expect("valid request");
        assert_eq!(a.outcomes(), b.outcomes());
    }

    #[test]
    fn test_oracle_failure_only_aborts_one_trajectory() {
        let oracle = FailFirstOracle {
            calls: AtomicUsize::new(0),
            inner: ChainOracle {
                size: 4,
                next: HashMap::from([(0, 1), (1, 3)]),
            },
        };
        let sampler = cycle_sampler(Arc::new(oracle));
        let batch = sampler
            .generate(
                &SegmentId(0),
                &sequential(4, 10),
                &mut StdRng::seed_from_u64(5),
                &CancellationSignal::new(),
            )
            .expect("valid request");
        let failures = batch.failures().collect_vec();
        assert_eq!(failures.len(), 1);
        let (idx, error) = failures[0];
        assert_eq!(idx, 0);
        assert_eq!(
            error,
            &TrajectoryError::OracleFailure {
                trajectory: 0,
                step: 0,
                message: String::from("scoring model failed: model offline")
            }
        );
        assert!(error.is_generation_error());
        assert_eq!(batch.trajectories().count(), 3);
        for t in batch.trajectories() {
            assert_eq!(t.segments, vec![SegmentId(1)]);
        }
    }

    #[test]
    fn test_malformed_logits() {
        let short = cycle_sampler(Arc::new(FixedOracle {
            logits: vec![0.0, 0.0],
        }));
        let nan = cycle_sampler(Arc::new(FixedOracle {
            logits: vec![0.0, f64::NAN, 0.0, 0.0],
        }));
        for sampler in [short, nan] {
            let batch = sampler
                .generate(
                    &SegmentId(0),
                    &sequential(2, 5),
                    &mut StdRng::seed_from_u64(0),
                    &CancellationSignal::new(),
                )
                .expect("valid request");
            assert_eq!(batch.summary().failed, 2);
            for (_, e) in batch.failures() {
                assert!(matches!(e, TrajectoryError::MalformedLogits { step: 0, .. }));
            }
        }
    }

    #[test]
    fn test_fully_masked_distribution_is_an_error() {
        // only the unreachable token 2 has a finite logit when departing 0
        let sampler = cycle_sampler(Arc::new(FixedOracle {
            logits: vec![
                f64::NEG_INFINITY,
                f64::NEG_INFINITY,
                0.0,
                f64::NEG_INFINITY,
            ],
        }));
        let batch = sampler
            .generate(
                &SegmentId(0),
                &sequential(1, 5),
                &mut StdRng::seed_from_u64(0),
                &CancellationSignal::new(),
            )
            .expect("valid request");
        assert!(matches!(
            batch.outcomes()[0],
            Err(TrajectoryError::EmptySupport { trajectory: 0, step: 0, .. })
        ));
    }

    #[test]
    fn test_cancelled_before_start() {
        let sampler = cycle_sampler(Arc::new(UniformOracle { size: 4 }));
        let cancel = CancellationSignal::new();
        cancel.cancel();
        let batch = sampler
            .generate(
                &SegmentId(0),
                &sequential(3, 10),
                &mut StdRng::seed_from_u64(0),
                &cancel,
            )
            .expect("valid request");
        assert_eq!(batch.summary().cancelled, 3);
        assert!(batch.trajectories().all(|t| t.is_empty()));
    }

    /// requests cancellation once it has been called `cancel_after` times
    struct CancellingOracle {
        cancel: CancellationSignal,
        calls: AtomicUsize,
        cancel_after: usize,
        inner: ChainOracle,
    }

    impl Oracle for CancellingOracle {
        fn score(&self, context: &[Token]) -> Result<Vec<f64>, OracleError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) + 1 >= self.cancel_after {
                self.cancel.cancel();
            }
            self.inner.score(context)
        }
    }

    /// single-threaded model that counts its invocations
    struct CountingOracle {
        size: usize,
        calls: usize,
    }

    impl SequentialOracle for CountingOracle {
        fn score(&mut self, _context: &[Token]) -> Result<Vec<f64>, OracleError> {
            self.calls += 1;
            Ok(vec![0.0; self.size])
        }
    }

    #[test]
    fn test_delegated_masking_trusts_the_oracle() {
        // only token 2 is likely, which is not a successor of 0 nor of itself
        let sampler = cycle_sampler(Arc::new(FixedOracle {
            logits: vec![
                f64::NEG_INFINITY,
                f64::NEG_INFINITY,
                0.0,
                f64::NEG_INFINITY,
            ],
        }));
        let config = GenerationConfig {
            masking: MaskingPolicy::Delegated,
            ..sequential(2, 3)
        };
        let batch = sampler
            .generate(
                &SegmentId(0),
                &config,
                &mut StdRng::seed_from_u64(0),
                &CancellationSignal::new(),
            )
            .expect("valid request");
        for t in batch.trajectories() {
            assert_eq!(t.segments, vec![SegmentId(2), SegmentId(2), SegmentId(2)]);
            assert!(t.is_truncated());
        }
        assert_eq!(batch.summary().truncated, 2);
    }

    #[test]
    fn test_cancelled_mid_trajectory_keeps_partial_path() {
        let cancel = CancellationSignal::new();
        let oracle = CancellingOracle {
            cancel: cancel.clone(),
            calls: AtomicUsize::new(0),
            cancel_after: 2,
            inner: ChainOracle {
                size: 4,
                next: HashMap::from([(0, 1), (1, 2), (2, 0)]),
            },
        };
        let sampler = cycle_sampler(Arc::new(oracle));
        let batch = sampler
            .generate(
                &SegmentId(0),
                &sequential(1, 10),
                &mut StdRng::seed_from_u64(0),
                &cancel,
            )
            .expect("valid request");
        let trajectory = batch.trajectories().next().expect("one trajectory");
        assert_eq!(trajectory.segments, vec![SegmentId(1), SegmentId(2)]);
        assert!(trajectory.is_cancelled());
        assert_eq!(batch.summary().cancelled, 1);
    }

    #[test]
    fn test_serialized_oracle_in_parallel_batch() {
        let shared = Arc::new(SerializedOracle::new(CountingOracle { size: 4, calls: 0 }));
        let sampler = cycle_sampler(shared.clone());
        let config = GenerationConfig {
            parallelize: true,
            ..sequential(16, 12)
        };
        let batch = sampler
            .generate(
                &SegmentId(2),
                &config,
                &mut StdRng::seed_from_u64(21),
                &CancellationSignal::new(),
            )
            .expect("valid request");
        assert_eq!(batch.len(), 16);
        assert_eq!(batch.summary().failed, 0);

        // one oracle call per sampled segment, plus one for each drawn end-of-sequence
        let expected_calls: usize = batch
            .trajectories()
            .map(|t| t.len() + usize::from(t.termination == Termination::EndOfSequence))
            .sum();
        drop(sampler);
        let oracle = Arc::try_unwrap(shared)
            .ok()
            .expect("sampler released its handle");
        let inner = oracle.into_inner().expect("lock is healthy");
        assert_eq!(inner.calls, expected_calls);
    }

    #[test]
    fn test_tiny_temperature_samples_greedily() {
        let sampler = cycle_sampler(Arc::new(FixedOracle {
            logits: vec![0.0, 2.0, 1.0, 1.0],
        }));
        let config = GenerationConfig {
            temperature: 1e-310,
            ..sequential(3, 1)
        };
        let batch = sampler
            .generate(
                &SegmentId(0),
                &config,
                &mut StdRng::seed_from_u64(0),
                &CancellationSignal::new(),
            )
            .expect("valid request");
        assert_eq!(batch.summary().failed, 0);
        for t in batch.trajectories() {
            assert_eq!(t.segments, vec![SegmentId(1)]);
        }
    }

    #[test]
    fn test_invalid_requests() {
        let sampler = cycle_sampler(Arc::new(UniformOracle { size: 4 }));
        let cancel = CancellationSignal::new();
        let unknown = sampler.generate(
            &SegmentId(99),
            &sequential(1, 1),
            &mut StdRng::seed_from_u64(0),
            &cancel,
        );
        assert!(matches!(
            unknown,
            Err(TrajectoryError::UnknownSegment(SegmentId(99)))
        ));
        let cold = GenerationConfig {
            temperature: -1.0,
            ..sequential(1, 1)
        };
        let invalid = sampler.generate(
            &SegmentId(0),
            &cold,
            &mut StdRng::seed_from_u64(0),
            &cancel,
        );
        assert!(matches!(invalid, Err(TrajectoryError::InvalidInput(_))));
    }
}
