// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Error Taxonomy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Decision Kernel failures.
///
/// Every variant is caller-visible. None of them is recovered inside
/// the kernel: a failure here means a configuration or model defect,
/// never a transient condition, so there is nothing to retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecisionError {
    /// Feature count or class count disagree between components,
    /// or a dimension is zero.
    #[error("configuration mismatch: {0}")]
    ConfigurationMismatch(String),

    /// The scoring model could not produce a judgment.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Feature buffer length does not match the configured feature count.
    #[error("malformed input: expected {expected} features, got {actual}")]
    MalformedInput { expected: usize, actual: usize },
}

pub type DecisionResult<T> = Result<T, DecisionError>;
