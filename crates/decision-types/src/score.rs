// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Prediction Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

/// Number of NaN or infinite entries in a score vector.
#[inline]
pub fn count_non_finite(scores: &[f64]) -> usize {
    scores.iter().filter(|s| !s.is_finite()).count()
}

/// Outcome of one inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Selected class, always in `[0, class_count)`.
    pub class_index: usize,
    /// Score of the selected class. NaN when every score was NaN and
    /// index 0 was kept by initialization.
    pub score: f64,
    /// Configured class name, if any.
    pub label: Option<String>,
}

impl Prediction {
    pub fn new(class_index: usize, score: f64) -> Self {
        Self {
            class_index,
            score,
            label: None,
        }
    }

    pub fn with_label(class_index: usize, score: f64, label: impl Into<String>) -> Self {
        Self {
            class_index,
            score,
            label: Some(label.into()),
        }
    }

    /// Label if configured, otherwise the class index as text.
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.class_index.to_string(),
        }
    }
}
