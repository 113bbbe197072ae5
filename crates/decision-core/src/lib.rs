// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Scoring-to-decision pipeline for an embedded multi-class classifier
//! front-end: feature buffer in, predicted class index out.
//!
//! # Safety Invariants
//!
//! 1. **Dimensions are fixed at construction**: a `Classifier` refuses a
//!    model whose feature or class count disagrees with its
//!    `KernelConfig`, and refuses `class_count == 0`. A wrong-length
//!    feature buffer is rejected before the model is invoked.
//!
//! 2. **First maximum wins**: the decision rule moves only on a strictly
//!    greater score, so ties resolve to the lowest index and NaN never
//!    takes the lead. The result is always in `[0, class_count)`.
//!
//! 3. **Model failure is never masked**: a backend error or panic reaches
//!    the caller as `ModelUnavailable`, never as a plausible-looking
//!    score vector.
//!
//! 4. **Reentrant by construction**: the pipeline holds no mutable state.
//!    Score storage is call-local or caller-owned; stateful backends go
//!    behind `Synchronized`.

pub mod backends;
pub mod pipeline;
pub mod port;
pub mod rule;

pub use backends::{LinearModel, LookupTable, TreeEnsemble, TreeNode};
pub use pipeline::Classifier;
pub use port::{ExternalModel, ScoringPort, StatefulModel, Synchronized};
pub use rule::{decide, decide_array};
