// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Decision-Tree Ensemble Backend
// ─────────────────────────────────────────────────────────────────────
//! Random-forest style ensemble stored as flat node arrays, the layout
//! scikit-learn and m2cgen export. Scores are the mean of the leaf
//! vectors reached in each tree.

use serde::{Deserialize, Serialize};

use decision_types::{DecisionError, DecisionResult};

use super::parse_json;
use crate::port::{check_buffers, check_dimensions, ScoringPort};

/// A node in one tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, otherwise `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class values, one per class.
    Leaf { values: Vec<f64> },
}

/// Deserialization goes through [`TreeEnsemble::new`], so a loaded
/// ensemble has passed the child-ordering check that bounds traversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawTreeEnsemble")]
pub struct TreeEnsemble {
    feature_count: usize,
    class_count: usize,
    trees: Vec<Vec<TreeNode>>,
}

#[derive(Deserialize)]
struct RawTreeEnsemble {
    feature_count: usize,
    class_count: usize,
    trees: Vec<Vec<TreeNode>>,
}

impl TryFrom<RawTreeEnsemble> for TreeEnsemble {
    type Error = DecisionError;

    fn try_from(raw: RawTreeEnsemble) -> DecisionResult<Self> {
        Self::new(raw.feature_count, raw.class_count, raw.trees)
    }
}

impl TreeEnsemble {
    pub fn new(
        feature_count: usize,
        class_count: usize,
        trees: Vec<Vec<TreeNode>>,
    ) -> DecisionResult<Self> {
        let model = Self {
            feature_count,
            class_count,
            trees,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn from_json(json: &str) -> DecisionResult<Self> {
        parse_json("tree ensemble", json)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Children must come after their parent, which rules out cycles
    /// and bounds every traversal by the tree's node count.
    fn validate(&self) -> DecisionResult<()> {
        check_dimensions(self.feature_count, self.class_count)?;
        if self.trees.is_empty() {
            return Err(DecisionError::ModelUnavailable(
                "tree ensemble has no trees".to_string(),
            ));
        }
        for (t, nodes) in self.trees.iter().enumerate() {
            if nodes.is_empty() {
                return Err(DecisionError::ModelUnavailable(format!(
                    "tree {t} has no nodes"
                )));
            }
            for (n, node) in nodes.iter().enumerate() {
                match node {
                    TreeNode::Split {
                        feature,
                        left,
                        right,
                        ..
                    } => {
                        if *feature >= self.feature_count {
                            return Err(DecisionError::ModelUnavailable(format!(
                                "tree {t} node {n} splits on feature {feature}, model has {}",
                                self.feature_count
                            )));
                        }
                        for child in [*left, *right] {
                            if child <= n || child >= nodes.len() {
                                return Err(DecisionError::ModelUnavailable(format!(
                                    "tree {t} node {n} has invalid child {child}"
                                )));
                            }
                        }
                    }
                    TreeNode::Leaf { values } => {
                        if values.len() != self.class_count {
                            return Err(DecisionError::ModelUnavailable(format!(
                                "tree {t} leaf {n} has {} values, expected {}",
                                values.len(),
                                self.class_count
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn leaf<'a>(nodes: &'a [TreeNode], features: &[f64]) -> &'a [f64] {
        let mut idx = 0;
        loop {
            match &nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    // NaN features fall to the right branch, as in sklearn.
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { values } => return values,
            }
        }
    }
}

impl ScoringPort for TreeEnsemble {
    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn class_count(&self) -> usize {
        self.class_count
    }

    fn score(&self, features: &[f64], scores: &mut [f64]) -> DecisionResult<()> {
        check_buffers(self.feature_count, self.class_count, features, scores)?;
        scores.fill(0.0);
        for nodes in &self.trees {
            for (acc, v) in scores.iter_mut().zip(Self::leaf(nodes, features)) {
                *acc += v;
            }
        }
        let n = self.trees.len() as f64;
        for s in scores.iter_mut() {
            *s /= n;
        }
        Ok(())
    }
}
