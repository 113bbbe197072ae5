// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Argmax Decision Rule
// ─────────────────────────────────────────────────────────────────────
//! Reduces a fully populated score vector to one class index.
//!
//! The scan starts with `best = 0` and moves only on a strictly greater
//! score, so the first occurrence of the maximum wins. Comparisons use
//! plain IEEE-754 `>`, so a NaN score never takes the lead. A NaN held
//! at index 0 by initialization is displaced by the first non-NaN score;
//! an all-NaN vector yields index 0.
//!
//! Do not replace the loop with `Iterator::max_by` or `f64::total_cmp`:
//! both pick the *last* of equal maxima and order NaN above every
//! number, which changes the result on ties and on NaN inputs.

use decision_types::{DecisionError, DecisionResult};

/// Index of the first maximal score in a non-empty slice.
///
/// Returns `ConfigurationMismatch` for an empty slice rather than an
/// out-of-range index.
#[inline]
pub fn decide(scores: &[f64]) -> DecisionResult<usize> {
    if scores.is_empty() {
        return Err(DecisionError::ConfigurationMismatch(
            "class_count must be >= 1, got an empty score vector".to_string(),
        ));
    }
    Ok(first_max(scores))
}

/// Statically sized form of [`decide`]. `C == 0` fails to compile.
#[inline]
pub fn decide_array<const C: usize>(scores: &[f64; C]) -> usize {
    const { assert!(C >= 1, "class count must be at least 1") };
    first_max(scores)
}

#[inline(always)]
#[allow(clippy::needless_range_loop)]
fn first_max(scores: &[f64]) -> usize {
    let mut best = 0;
    for i in 1..scores.len() {
        if scores[i] > scores[best] || (scores[best].is_nan() && !scores[i].is_nan()) {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f64 = f64::NAN;
    const INF: f64 = f64::INFINITY;

    #[test]
    fn test_tie_first_of_maxima() {
        assert_eq!(decide(&[0.2, 0.9, 0.9]).unwrap(), 1);
    }

    #[test]
    fn test_max_at_front() {
        assert_eq!(decide(&[0.9, 0.2, 0.1]).unwrap(), 0);
    }

    #[test]
    fn test_negative_scores_tie() {
        assert_eq!(decide(&[-5.0, -1.0, -1.0, -3.0]).unwrap(), 1);
    }

    #[test]
    fn test_single_class() {
        assert_eq!(decide(&[42.0]).unwrap(), 0);
        assert_eq!(decide(&[NAN]).unwrap(), 0);
        assert_eq!(decide(&[INF]).unwrap(), 0);
        assert_eq!(decide(&[-INF]).unwrap(), 0);
    }

    #[test]
    fn test_nan_displaced_by_first_finite() {
        assert_eq!(decide(&[NAN, 0.5, NAN]).unwrap(), 1);
    }

    #[test]
    fn test_leading_nan_displaced_by_any_number() {
        assert_eq!(decide(&[NAN, -INF, 3.0]).unwrap(), 2);
        assert_eq!(decide(&[NAN, NAN, -INF]).unwrap(), 2);
        assert_eq!(decide(&[NAN, -1.0, -1.0]).unwrap(), 1);
        assert_eq!(decide_array(&[NAN, -2.0, NAN, -3.0]), 1);
    }

    #[test]
    fn test_all_nan_any_length() {
        for len in 1..=16 {
            let scores = vec![NAN; len];
            assert_eq!(decide(&scores).unwrap(), 0, "len={len}");
        }
    }

    #[test]
    fn test_nan_never_wins() {
        assert_eq!(decide(&[0.1, NAN, 0.05]).unwrap(), 0);
        assert_eq!(decide(&[-1.0, NAN, NAN, -0.5]).unwrap(), 3);
    }

    #[test]
    fn test_infinities() {
        assert_eq!(decide(&[1.0, INF, 3.0]).unwrap(), 1);
        assert_eq!(decide(&[INF, INF]).unwrap(), 0);
        assert_eq!(decide(&[-INF, -INF, -1e308]).unwrap(), 2);
    }

    #[test]
    fn test_all_equal() {
        assert_eq!(decide(&[0.25; 4]).unwrap(), 0);
        assert_eq!(decide(&[0.0, -0.0, 0.0]).unwrap(), 0);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            decide(&[]),
            Err(DecisionError::ConfigurationMismatch(_))
        ));
    }

    #[test]
    fn test_unique_max_found_everywhere() {
        for c in 1..=12 {
            for k in 0..c {
                let mut scores: Vec<f64> = (0..c).map(|i| (i as f64) * 0.01).collect();
                scores[k] = 10.0;
                assert_eq!(decide(&scores).unwrap(), k, "c={c} k={k}");
            }
        }
    }

    #[test]
    fn test_multiple_maxima_pick_smallest_index() {
        for c in 2..=10 {
            for a in 0..c {
                for b in (a + 1)..c {
                    let mut scores = vec![-1.0; c];
                    scores[a] = 3.0;
                    scores[b] = 3.0;
                    assert_eq!(decide(&scores).unwrap(), a, "c={c} a={a} b={b}");
                }
            }
        }
    }

    #[test]
    fn test_result_in_range_with_mixed_values() {
        let pool = [NAN, INF, -INF, 0.0, -0.0, 1.0, -1.0, f64::MIN_POSITIVE];
        // Every 3-element combination of the pool.
        for &a in &pool {
            for &b in &pool {
                for &c in &pool {
                    let idx = decide(&[a, b, c]).unwrap();
                    assert!(idx < 3);
                }
            }
        }
    }

    #[test]
    fn test_differs_from_max_by() {
        let scores: [f64; 3] = [0.2, 0.9, 0.9];
        let via_max_by = scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(via_max_by, 2);
        assert_eq!(decide(&scores).unwrap(), 1);
    }

    #[test]
    fn test_decide_array() {
        assert_eq!(decide_array(&[0.2, 0.9, 0.9]), 1);
        assert_eq!(decide_array(&[42.0]), 0);
        assert_eq!(decide_array(&[NAN, NAN, NAN, NAN]), 0);
        assert_eq!(decide_array(&[NAN, 0.5, NAN]), 1);
    }
}
