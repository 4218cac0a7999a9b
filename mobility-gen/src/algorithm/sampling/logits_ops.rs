//! transformations applied to oracle logits before a token is drawn
use crate::model::vocabulary::Token;
use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    Rng,
};

/// confirms there is one logit per vocabulary token and that no logit is NaN
/// or positive infinity. negative infinity is accepted as a masked token.
pub fn validate_logits(logits: &[f64], vocabulary_size: usize) -> Result<(), String> {
    if logits.len() != vocabulary_size {
        return Err(format!(
            "expected {vocabulary_size} logits, found {}",
            logits.len()
        ));
    }
    match logits
        .iter()
        .enumerate()
        .find(|(_, l)| l.is_nan() || **l == f64::INFINITY)
    {
        Some((token, l)) => Err(format!("logit for token {token} is {l}")),
        None => Ok(()),
    }
}

/// divides logits by the temperature after shifting them so the largest
/// finite logit is zero. the shift leaves the softmax unchanged and keeps
/// small temperatures from overflowing logits to positive infinity.
pub fn apply_temperature(logits: &mut [f64], temperature: f64) {
    let max = max_finite(logits);
    let shift = if max.is_finite() { max } else { 0.0 };
    for l in logits.iter_mut() {
        *l = (*l - shift) / temperature;
    }
}

fn max_finite(logits: &[f64]) -> f64 {
    logits
        .iter()
        .copied()
        .filter(|l| l.is_finite())
        .fold(f64::NEG_INFINITY, f64::max)
}

/// sets the logit of every token rejected by `is_allowed` to negative infinity
pub fn apply_mask<F>(logits: &mut [f64], is_allowed: F)
where
    F: Fn(Token) -> bool,
{
    for (token, l) in logits.iter_mut().enumerate() {
        if !is_allowed(token) {
            *l = f64::NEG_INFINITY;
        }
    }
}

/// keeps the `k` highest logits and sets the rest to negative infinity. logits
/// tied with the k-th highest value are kept, so more than `k` tokens may remain.
/// relative order among the kept logits is unchanged.
pub fn retain_top_k(logits: &mut [f64], k: usize) {
    if k >= logits.len() {
        return;
    }
    if k == 0 {
        logits.fill(f64::NEG_INFINITY);
        return;
    }
    let mut sorted = logits.to_vec();
    sorted.sort_unstable_by(|a, b| b.total_cmp(a));
    let threshold = sorted[k - 1];
    for l in logits.iter_mut() {
        if *l < threshold {
            *l = f64::NEG_INFINITY;
        }
    }
}

/// normalizes logits into a probability distribution. masked (negative infinity)
/// logits receive zero probability.
///
/// # Returns
///
/// * the distribution, or None if every logit is masked
pub fn softmax(logits: &[f64]) -> Option<Vec<f64>> {
    let max = max_finite(logits);
    if !max.is_finite() {
        return None;
    }
    let exps = logits.iter().map(|l| (l - max).exp()).collect::<Vec<_>>();
    let sum: f64 = exps.iter().sum();
    Some(exps.into_iter().map(|e| e / sum).collect())
}

/// draws a token from a probability distribution using the provided randomness
pub fn draw<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> Result<Token, String> {
    let distribution = WeightedIndex::new(probabilities)
        .map_err(|e| format!("invalid sampling distribution: {e}"))?;
    Ok(distribution.sample(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_validate_logits() {
        assert!(validate_logits(&[0.0, f64::NEG_INFINITY, 3.0], 3).is_ok());
        assert!(validate_logits(&[0.0, 1.0], 3).is_err());
        assert!(validate_logits(&[0.0, f64::NAN, 1.0], 3).is_err());
        assert!(validate_logits(&[0.0, f64::INFINITY, 1.0], 3).is_err());
    }

    #[test]
    fn test_temperature_scales() {
        let mut logits = vec![2.0, -4.0, f64::NEG_INFINITY];
        apply_temperature(&mut logits, 2.0);
        assert_eq!(logits, vec![0.0, -3.0, f64::NEG_INFINITY]);
    }

    #[test]
    fn test_tiny_temperature_is_greedy() {
        let mut logits = vec![0.0, 2.0, 1.0, 1.0];
        apply_temperature(&mut logits, 1e-310);
        assert!(logits.iter().all(|l| *l != f64::INFINITY));
        let probs = softmax(&logits).expect("has support");
        assert_eq!(probs, vec![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_temperature_with_everything_masked() {
        let mut logits = vec![f64::NEG_INFINITY; 3];
        apply_temperature(&mut logits, 0.5);
        assert_eq!(softmax(&logits), None);
    }

    #[test]
    fn test_top_k_keeps_highest() {
        let mut logits = vec![0.5, 3.0, -1.0, 2.0];
        retain_top_k(&mut logits, 2);
        assert_eq!(logits, vec![f64::NEG_INFINITY, 3.0, f64::NEG_INFINITY, 2.0]);
    }

    #[test]
    fn test_top_k_keeps_ties_and_ignores_large_k() {
        let mut logits = vec![1.0, 1.0, 0.0];
        retain_top_k(&mut logits, 1);
        assert_eq!(logits, vec![1.0, 1.0, f64::NEG_INFINITY]);

        let mut unchanged = vec![1.0, 2.0];
        retain_top_k(&mut unchanged, 5);
        assert_eq!(unchanged, vec![1.0, 2.0]);
    }

    #[test]
    fn test_mask() {
        let mut logits = vec![1.0, 1.0, 1.0, 1.0];
        apply_mask(&mut logits, |t| t % 2 == 0);
        assert_eq!(
            logits,
            vec![1.0, f64::NEG_INFINITY, 1.0, f64::NEG_INFINITY]
        );
    }

    #[test]
    fn test_softmax() {
        let probs = softmax(&[0.0, 0.0, f64::NEG_INFINITY, 0.0]).expect("has support");
        assert_eq!(probs[2], 0.0);
        assert!((probs[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);

        // large logits do not overflow
        let stable = softmax(&[1000.0, 1000.0]).expect("has support");
        assert!((stable[0] - 0.5).abs() < 1e-12);

        assert_eq!(softmax(&[f64::NEG_INFINITY, f64::NEG_INFINITY]), None);
    }

    #[test]
    fn test_draw_degenerate_distribution() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(draw(&[0.0, 1.0, 0.0], &mut rng), Ok(1));
        }
        assert!(draw(&[0.0, 0.0], &mut rng).is_err());
    }
}
