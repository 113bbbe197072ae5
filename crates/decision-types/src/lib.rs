// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Configuration, error taxonomy, and prediction result for the
//! Decision Kernel — the argmax decision layer of an embedded
//! multi-class classifier front-end.

pub mod config;
pub mod error;
pub mod score;

pub use config::KernelConfig;
pub use error::{DecisionError, DecisionResult};
pub use score::{count_non_finite, Prediction};
