// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Classifier Pipeline
// ─────────────────────────────────────────────────────────────────────
//! Feature buffer → scoring port → decision rule, in one synchronous
//! call chain. The classifier holds only immutable configuration and a
//! shared model handle; score storage is always call-local or owned by
//! the caller.

use std::sync::Arc;

use decision_types::{count_non_finite, DecisionError, DecisionResult, KernelConfig, Prediction};

use crate::port::ScoringPort;
use crate::rule::decide;

/// Decision layer bound to one scoring backend.
pub struct Classifier {
    config: KernelConfig,
    model: Arc<dyn ScoringPort>,
}

impl Classifier {
    /// Validate the configuration and check that the model was built
    /// for the same feature and class counts.
    pub fn new(config: KernelConfig, model: Arc<dyn ScoringPort>) -> DecisionResult<Self> {
        config.validate()?;
        config.ensure_matches(model.feature_count(), model.class_count())?;
        Ok(Self { config, model })
    }

    /// Populate caller-provided score storage from a feature buffer.
    ///
    /// The feature length is checked before the model runs. A backend
    /// that panics is reported as `ModelUnavailable`; the contents of
    /// `scores` are unspecified whenever an error is returned.
    pub fn score_into(&self, features: &[f64], scores: &mut [f64]) -> DecisionResult<()> {
        if features.len() != self.config.feature_count {
            return Err(DecisionError::MalformedInput {
                expected: self.config.feature_count,
                actual: features.len(),
            });
        }
        if scores.len() != self.config.class_count {
            return Err(DecisionError::ConfigurationMismatch(format!(
                "score storage holds {} slots, config has {} classes",
                scores.len(),
                self.config.class_count
            )));
        }

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.model.score(features, scores)
        }));
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                log::error!("Scoring model failed: {e}");
                return Err(e);
            }
            Err(_) => {
                log::error!("Scoring model panicked — treating as unavailable");
                return Err(DecisionError::ModelUnavailable(
                    "scoring model panicked".to_string(),
                ));
            }
        }

        if self.config.warn_on_non_finite {
            let bad = count_non_finite(scores);
            if bad > 0 {
                log::warn!(
                    "{bad} of {} scores are non-finite; NaN never wins the argmax",
                    scores.len()
                );
            }
        }
        Ok(())
    }

    /// Score and decide without allocating. Returns the class index.
    pub fn decide_into(&self, features: &[f64], scores: &mut [f64]) -> DecisionResult<usize> {
        self.score_into(features, scores)?;
        decide(scores)
    }

    /// Full inference with a call-local score vector.
    ///
    /// Storage starts as NaN, so a slot a backend failed to write can
    /// never be selected over a written one.
    pub fn classify(&self, features: &[f64]) -> DecisionResult<Prediction> {
        let mut scores = vec![f64::NAN; self.config.class_count];
        let class_index = self.decide_into(features, &mut scores)?;
        let score = scores[class_index];

        let prediction = match self.config.label(class_index) {
            Some(label) => Prediction::with_label(class_index, score, label),
            None => Prediction::new(class_index, score),
        };
        log::debug!(
            "Predicted class: {} (score {score:.4})",
            prediction.display_name()
        );
        Ok(prediction)
    }

    /// Read-only access to config.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }
}
