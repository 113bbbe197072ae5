// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Reference Model Backends
// ─────────────────────────────────────────────────────────────────────
//! Self-contained scoring backends that load from JSON exports.
//!
//! Each backend validates its structure on load and reports defects as
//! `ModelUnavailable`, so a malformed export never reaches the hot path.

pub mod forest;
pub mod linear;
pub mod lookup;

pub use forest::{TreeEnsemble, TreeNode};
pub use linear::LinearModel;
pub use lookup::LookupTable;

use decision_types::{DecisionError, DecisionResult};

pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(kind: &str, json: &str) -> DecisionResult<T> {
    serde_json::from_str(json)
        .map_err(|e| DecisionError::ModelUnavailable(format!("{kind} JSON parse error: {e}")))
}
