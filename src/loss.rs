//! Output-layer math: softmax and cross-entropy.
//!
//! Both functions operate on plain slices; the network adapts its column
//! matrices at the call site. Length agreement between predictions and
//! targets is a caller contract checked with `debug_assert_eq!`.

/// Probabilities are floored at this value before taking logarithms, so a
/// confidently wrong prediction yields a large finite loss instead of `inf`.
const PROB_FLOOR: f64 = 1e-15;

/// Numerically stable softmax.
///
/// The maximum logit is subtracted before exponentiation, which leaves the
/// result unchanged mathematically but keeps `exp` from overflowing. The
/// output sums to 1 (up to rounding) and preserves the input ordering.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Cross-entropy `-Σ target_k · ln(prob_k)` over one distribution.
///
/// Terms with `target_k <= 0` are skipped outright, so a zero target paired
/// with a zero probability contributes nothing rather than `0 · ln 0`.
pub fn cross_entropy(probs: &[f64], target: &[f64]) -> f64 {
    debug_assert_eq!(probs.len(), target.len());
    probs
        .iter()
        .zip(target)
        .filter(|(_, &t)| t > 0.0)
        .map(|(&p, &t)| -t * p.max(PROB_FLOOR).ln())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_is_a_distribution() {
        let p = softmax(&[1.0, 2.0, 3.0]);
        let sum: f64 = p.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(p.windows(2).all(|w| w[0] < w[1]));
        assert!(p.iter().all(|&v| v > 0.0 && v < 1.0));
    }

    #[test]
    fn softmax_of_equal_logits_is_uniform() {
        let p = softmax(&[0.0, 0.0, 0.0]);
        assert_eq!(p, vec![1.0 / 3.0; 3]);
    }

    #[test]
    fn softmax_is_shift_invariant() {
        // A constant shift cancels mathematically, but rounding of the
        // shifted differences can still move the last few ulps.
        let a = softmax(&[0.2, -1.3, 4.0]);
        let b = softmax(&[1000.2, 998.7, 1004.0]);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn softmax_shift_by_a_power_of_two_is_bit_identical() {
        // Every logit here and its max-subtracted difference is a dyadic
        // rational, so both evaluations produce identical bits.
        let a = softmax(&[0.25, -1.5, 4.0]);
        let b = softmax(&[1024.25, 1022.5, 1028.0]);
        assert_eq!(a, b);
    }

    #[test]
    fn softmax_survives_extreme_logits() {
        let p = softmax(&[1.0e308, 0.0, -1.0e308]);
        assert!(p.iter().all(|v| v.is_finite()));
        assert!((p[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cross_entropy_of_one_hot_is_negative_log_prob() {
        let probs = [0.1, 0.7, 0.2];
        let target = [0.0, 1.0, 0.0];
        assert!((cross_entropy(&probs, &target) - (-0.7_f64.ln())).abs() < 1e-15);
    }

    #[test]
    fn cross_entropy_floors_zero_probabilities() {
        let probs = [0.0, 1.0];
        let target = [1.0, 0.0];
        let loss = cross_entropy(&probs, &target);
        assert!(loss.is_finite());
        assert!((loss - (-PROB_FLOOR.ln())).abs() < 1e-12);
    }

    #[test]
    fn cross_entropy_skips_zero_targets() {
        // p = 0 where t = 0 must not poison the sum with 0 * ln(0).
        let probs = [1.0, 0.0, 0.0];
        let target = [1.0, 0.0, 0.0];
        assert_eq!(cross_entropy(&probs, &target), 0.0);
    }

    #[test]
    fn cross_entropy_accepts_soft_targets() {
        let probs = [0.25, 0.75];
        let target = [0.5, 0.5];
        let expected = -(0.5 * 0.25_f64.ln() + 0.5 * 0.75_f64.ln());
        assert!((cross_entropy(&probs, &target) - expected).abs() < 1e-15);
    }
}
