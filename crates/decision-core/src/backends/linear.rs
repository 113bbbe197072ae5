// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Linear Classifier Backend
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use decision_types::{DecisionError, DecisionResult};

use super::parse_json;
use crate::port::{check_buffers, check_dimensions, ScoringPort};

/// One-vs-rest linear classifier: `score[c] = w[c] · x + b[c]`.
///
/// Deserialization goes through [`LinearModel::new`], so a loaded model
/// is always validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawLinearModel")]
pub struct LinearModel {
    /// Weight rows, `class_count × feature_count`.
    weights: Vec<Vec<f64>>,
    /// Per-class intercept.
    bias: Vec<f64>,
}

#[derive(Deserialize)]
struct RawLinearModel {
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl TryFrom<RawLinearModel> for LinearModel {
    type Error = DecisionError;

    fn try_from(raw: RawLinearModel) -> DecisionResult<Self> {
        Self::new(raw.weights, raw.bias)
    }
}

impl LinearModel {
    pub fn new(weights: Vec<Vec<f64>>, bias: Vec<f64>) -> DecisionResult<Self> {
        let model = Self { weights, bias };
        model.validate()?;
        Ok(model)
    }

    /// Load from a JSON object `{"weights": [[..], ..], "bias": [..]}`.
    pub fn from_json(json: &str) -> DecisionResult<Self> {
        parse_json("linear model", json)
    }

    fn validate(&self) -> DecisionResult<()> {
        let features = self.weights.first().map_or(0, Vec::len);
        check_dimensions(features, self.weights.len())?;
        if let Some((c, row)) = self
            .weights
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != features)
        {
            return Err(DecisionError::ModelUnavailable(format!(
                "weight row {c} has {} entries, expected {features}",
                row.len()
            )));
        }
        if self.bias.len() != self.weights.len() {
            return Err(DecisionError::ModelUnavailable(format!(
                "{} bias terms for {} classes",
                self.bias.len(),
                self.weights.len()
            )));
        }
        Ok(())
    }
}

impl ScoringPort for LinearModel {
    fn feature_count(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    fn class_count(&self) -> usize {
        self.weights.len()
    }

    fn score(&self, features: &[f64], scores: &mut [f64]) -> DecisionResult<()> {
        check_buffers(self.feature_count(), self.class_count(), features, scores)?;
        for ((slot, row), b) in scores.iter_mut().zip(&self.weights).zip(&self.bias) {
            let dot: f64 = row.iter().zip(features).map(|(w, x)| w * x).sum();
            *slot = dot + b;
        }
        Ok(())
    }
}
