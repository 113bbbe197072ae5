// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Scoring Port
// ─────────────────────────────────────────────────────────────────────
//! The boundary between the decision layer and a pretrained model.
//!
//! Any classifier that can turn a feature buffer into one score per
//! class plugs in behind [`ScoringPort`]: a tree ensemble, a linear
//! model, a lookup table, or a callback into a host runtime. The
//! decision rule never sees the model's internals.

use parking_lot::Mutex;

use decision_types::{DecisionError, DecisionResult};

/// Trait for scoring backends.
///
/// Contract:
/// - `features` has exactly `feature_count()` entries and is read-only.
/// - On `Ok(())` every one of the `class_count()` slots in `scores` has
///   been written; higher means more confident. Uniform scores encode
///   "no preference".
/// - When no judgment is possible the backend returns
///   [`DecisionError::ModelUnavailable`] instead of a partial vector.
/// - Same input, same output. No blocking I/O, and no reference to
///   either buffer outlives the call.
pub trait ScoringPort: Send + Sync {
    fn feature_count(&self) -> usize;

    fn class_count(&self) -> usize;

    fn score(&self, features: &[f64], scores: &mut [f64]) -> DecisionResult<()>;
}

type ScoreFn = Box<dyn Fn(&[f64], &mut [f64]) -> DecisionResult<()> + Send + Sync>;

/// Scoring backend that delegates to a closure.
///
/// Used by the PyO3 layer to call back into a Python model, and for
/// wiring generated model code (e.g. m2cgen output) into the kernel.
pub struct ExternalModel {
    feature_count: usize,
    class_count: usize,
    score_fn: ScoreFn,
}

impl ExternalModel {
    pub fn new(
        feature_count: usize,
        class_count: usize,
        score_fn: impl Fn(&[f64], &mut [f64]) -> DecisionResult<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            feature_count,
            class_count,
            score_fn: Box::new(score_fn),
        }
    }

    /// Wrap an infallible scoring function of the classic
    /// `score(input, output)` shape.
    ///
    /// The closure must write every slot of `output`. `Classifier`
    /// pre-fills its call-local storage with NaN, so a skipped slot can
    /// never win the argmax, but caller-provided storage keeps whatever
    /// it held before.
    pub fn infallible(
        feature_count: usize,
        class_count: usize,
        score_fn: impl Fn(&[f64], &mut [f64]) + Send + Sync + 'static,
    ) -> Self {
        Self::new(feature_count, class_count, move |x, out| {
            score_fn(x, out);
            Ok(())
        })
    }
}

impl ScoringPort for ExternalModel {
    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn class_count(&self) -> usize {
        self.class_count
    }

    fn score(&self, features: &[f64], scores: &mut [f64]) -> DecisionResult<()> {
        (self.score_fn)(features, scores)
    }
}

/// A backend that needs `&mut self` to score, e.g. one that keeps
/// scratch buffers or an internal RNG.
pub trait StatefulModel: Send {
    fn feature_count(&self) -> usize;

    fn class_count(&self) -> usize;

    fn score_mut(&mut self, features: &[f64], scores: &mut [f64]) -> DecisionResult<()>;
}

/// Serializes access to a [`StatefulModel`] so it can sit behind the
/// shared, reentrant [`ScoringPort`] interface.
///
/// Concurrent inferences queue on a `parking_lot::Mutex`; the model
/// state is never observed mid-update.
pub struct Synchronized<M> {
    feature_count: usize,
    class_count: usize,
    inner: Mutex<M>,
}

impl<M: StatefulModel> Synchronized<M> {
    pub fn new(model: M) -> Self {
        Self {
            feature_count: model.feature_count(),
            class_count: model.class_count(),
            inner: Mutex::new(model),
        }
    }

    pub fn into_inner(self) -> M {
        self.inner.into_inner()
    }
}

impl<M: StatefulModel> ScoringPort for Synchronized<M> {
    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn class_count(&self) -> usize {
        self.class_count
    }

    fn score(&self, features: &[f64], scores: &mut [f64]) -> DecisionResult<()> {
        self.inner.lock().score_mut(features, scores)
    }
}

/// Reject a model whose declared dimensions are unusable.
pub(crate) fn check_dimensions(feature_count: usize, class_count: usize) -> DecisionResult<()> {
    if feature_count == 0 || class_count == 0 {
        return Err(DecisionError::ModelUnavailable(format!(
            "model dimensions must be non-zero, got {feature_count} features x {class_count} classes"
        )));
    }
    Ok(())
}

/// Reject buffers that do not match a backend's own dimensions, before
/// any slot is read or written.
pub(crate) fn check_buffers(
    feature_count: usize,
    class_count: usize,
    features: &[f64],
    scores: &[f64],
) -> DecisionResult<()> {
    if features.len() != feature_count {
        return Err(DecisionError::MalformedInput {
            expected: feature_count,
            actual: features.len(),
        });
    }
    if scores.len() != class_count {
        return Err(DecisionError::ConfigurationMismatch(format!(
            "score storage holds {} slots, model produces {class_count} classes",
            scores.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_external_model_delegates() {
        let model = ExternalModel::infallible(2, 3, |x, out| {
            out[0] = x[0];
            out[1] = x[1];
            out[2] = x[0] + x[1];
        });
        let mut scores = [0.0; 3];
        model.score(&[1.0, 2.0], &mut scores).unwrap();
        assert_eq!(scores, [1.0, 2.0, 3.0]);
        assert_eq!(model.feature_count(), 2);
        assert_eq!(model.class_count(), 3);
    }

    #[test]
    fn test_external_model_failure_propagates() {
        let model = ExternalModel::new(1, 2, |_, _| {
            Err(DecisionError::ModelUnavailable("weights not loaded".into()))
        });
        let mut scores = [0.0; 2];
        let err = model.score(&[0.0], &mut scores).unwrap_err();
        assert!(matches!(err, DecisionError::ModelUnavailable(_)));
    }

    /// Counts its own invocations; needs `&mut self`.
    struct CountingModel {
        calls: u64,
    }

    impl StatefulModel for CountingModel {
        fn feature_count(&self) -> usize {
            1
        }

        fn class_count(&self) -> usize {
            2
        }

        fn score_mut(&mut self, features: &[f64], scores: &mut [f64]) -> DecisionResult<()> {
            self.calls += 1;
            scores[0] = features[0];
            scores[1] = -features[0];
            Ok(())
        }
    }

    #[test]
    fn test_synchronized_across_threads() {
        let port = Arc::new(Synchronized::new(CountingModel { calls: 0 }));
        assert_eq!(port.feature_count(), 1);
        assert_eq!(port.class_count(), 2);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let port = Arc::clone(&port);
                std::thread::spawn(move || {
                    for i in 0..250 {
                        let x = (t * 1000 + i) as f64;
                        let mut scores = [0.0; 2];
                        port.score(&[x], &mut scores).unwrap();
                        assert_eq!(scores, [x, -x]);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let port = Arc::try_unwrap(port).ok().unwrap();
        assert_eq!(port.into_inner().calls, 1000);
    }

    #[test]
    fn test_check_buffers() {
        assert!(check_buffers(2, 3, &[0.0; 2], &[0.0; 3]).is_ok());
        assert_eq!(
            check_buffers(2, 3, &[0.0; 1], &[0.0; 3]).unwrap_err(),
            DecisionError::MalformedInput {
                expected: 2,
                actual: 1
            }
        );
        assert!(matches!(
            check_buffers(2, 3, &[0.0; 2], &[0.0; 4]),
            Err(DecisionError::ConfigurationMismatch(_))
        ));
    }

    #[test]
    fn test_check_dimensions() {
        assert!(check_dimensions(1, 1).is_ok());
        assert!(check_dimensions(0, 3).is_err());
        assert!(check_dimensions(3, 0).is_err());
    }
}
