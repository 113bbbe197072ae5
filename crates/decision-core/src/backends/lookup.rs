// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Lookup Table Backend
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use decision_types::{DecisionError, DecisionResult};

use super::parse_json;
use crate::port::{check_buffers, check_dimensions, ScoringPort};

/// Bins one feature by ascending edges and returns the stored score row.
///
/// Bin `i` covers `edges[i-1] <= x < edges[i]`; values below the first
/// edge land in bin 0, values at or above the last edge in the final
/// bin. A NaN feature has no bin and yields `ModelUnavailable`.
/// Deserialization goes through [`LookupTable::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawLookupTable")]
pub struct LookupTable {
    feature_count: usize,
    feature_index: usize,
    edges: Vec<f64>,
    /// `edges.len() + 1` rows of `class_count` scores.
    rows: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawLookupTable {
    feature_count: usize,
    feature_index: usize,
    edges: Vec<f64>,
    rows: Vec<Vec<f64>>,
}

impl TryFrom<RawLookupTable> for LookupTable {
    type Error = DecisionError;

    fn try_from(raw: RawLookupTable) -> DecisionResult<Self> {
        Self::new(raw.feature_count, raw.feature_index, raw.edges, raw.rows)
    }
}

impl LookupTable {
    pub fn new(
        feature_count: usize,
        feature_index: usize,
        edges: Vec<f64>,
        rows: Vec<Vec<f64>>,
    ) -> DecisionResult<Self> {
        let table = Self {
            feature_count,
            feature_index,
            edges,
            rows,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn from_json(json: &str) -> DecisionResult<Self> {
        parse_json("lookup table", json)
    }

    fn validate(&self) -> DecisionResult<()> {
        let classes = self.rows.first().map_or(0, Vec::len);
        check_dimensions(self.feature_count, classes)?;
        if self.feature_index >= self.feature_count {
            return Err(DecisionError::ModelUnavailable(format!(
                "lookup feature {} out of range for {} features",
                self.feature_index, self.feature_count
            )));
        }
        if self.edges.iter().any(|e| !e.is_finite())
            || self.edges.windows(2).any(|w| w[0] >= w[1])
        {
            return Err(DecisionError::ModelUnavailable(
                "bin edges must be finite and strictly ascending".to_string(),
            ));
        }
        if self.rows.len() != self.edges.len() + 1 {
            return Err(DecisionError::ModelUnavailable(format!(
                "{} rows for {} bins",
                self.rows.len(),
                self.edges.len() + 1
            )));
        }
        if self.rows.iter().any(|r| r.len() != classes) {
            return Err(DecisionError::ModelUnavailable(
                "score rows differ in length".to_string(),
            ));
        }
        Ok(())
    }

    fn bin(&self, x: f64) -> usize {
        self.edges.partition_point(|&e| e <= x)
    }
}

impl ScoringPort for LookupTable {
    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn class_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    fn score(&self, features: &[f64], scores: &mut [f64]) -> DecisionResult<()> {
        check_buffers(self.feature_count, self.class_count(), features, scores)?;
        let x = features[self.feature_index];
        if x.is_nan() {
            return Err(DecisionError::ModelUnavailable(format!(
                "feature {} is NaN, no bin applies",
                self.feature_index
            )));
        }
        scores.copy_from_slice(&self.rows[self.bin(x)]);
        Ok(())
    }
}
