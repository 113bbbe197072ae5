// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{DecisionError, DecisionResult};

/// Build-time dimensions and options for the Decision Kernel.
///
/// `feature_count` and `class_count` must agree across the caller, the
/// scoring model, and the decision rule. They are fixed for the life of
/// a `Classifier`; there is no mechanism to change them after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Length of every feature buffer (`F`).
    /// Default: 13.
    pub feature_count: usize,

    /// Length of every score vector, one slot per class (`C`).
    /// Default: 3.
    pub class_count: usize,

    /// Optional class names, index-aligned with the score vector.
    pub labels: Option<Vec<String>>,

    /// Log a warning when a score vector holds NaN or infinity.
    /// Default: true.
    pub warn_on_non_finite: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            feature_count: 13,
            class_count: 3,
            labels: None,
            warn_on_non_finite: true,
        }
    }
}

impl KernelConfig {
    pub fn new(feature_count: usize, class_count: usize) -> Self {
        Self {
            feature_count,
            class_count,
            ..Default::default()
        }
    }

    /// Attach class labels. Checked by [`KernelConfig::validate`].
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> DecisionResult<()> {
        if self.feature_count < 1 {
            return Err(DecisionError::ConfigurationMismatch(format!(
                "feature_count must be >= 1, got {}",
                self.feature_count
            )));
        }
        if self.class_count < 1 {
            return Err(DecisionError::ConfigurationMismatch(format!(
                "class_count must be >= 1, got {}",
                self.class_count
            )));
        }
        if let Some(labels) = &self.labels {
            if labels.len() != self.class_count {
                return Err(DecisionError::ConfigurationMismatch(format!(
                    "{} labels given for {} classes",
                    labels.len(),
                    self.class_count
                )));
            }
        }
        Ok(())
    }

    /// Check that another component was built for the same dimensions.
    pub fn ensure_matches(&self, feature_count: usize, class_count: usize) -> DecisionResult<()> {
        if feature_count != self.feature_count {
            return Err(DecisionError::ConfigurationMismatch(format!(
                "model expects {feature_count} features, config has {}",
                self.feature_count
            )));
        }
        if class_count != self.class_count {
            return Err(DecisionError::ConfigurationMismatch(format!(
                "model produces {class_count} classes, config has {}",
                self.class_count
            )));
        }
        Ok(())
    }

    /// Label for a class index, if labels are configured.
    pub fn label(&self, class_index: usize) -> Option<&str> {
        self.labels
            .as_ref()
            .and_then(|l| l.get(class_index))
            .map(String::as_str)
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> DecisionResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            DecisionError::ConfigurationMismatch(format!("JSON parse error: {e}"))
        })
    }
}
