// ─────────────────────────────────────────────────────────────────────
// Decision Kernel — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the Rust Decision Kernel.
//!
//! Exposes `KernelConfig`, `Prediction`, `RustClassifier`, and the bare
//! `argmax` decision rule to Python via PyO3.
//!
//! # FFI Safety
//!
//! - GIL acquired via `Python::with_gil` before every Python callback.
//! - A Python exception or wrong-length result from the model callback
//!   is `ModelUnavailable` → `RuntimeError`. Nothing is defaulted.
//! - Configuration and input errors → `ValueError`.
//! - All config validated before storage (`KernelConfig::validate()`).
//!
//! Install: `pip install -e crates/decision-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from decision_kernel import KernelConfig, RustClassifier, argmax
//!
//! cfg = KernelConfig(feature_count=4, class_count=3)
//! clf = RustClassifier(cfg, lambda x: [0.2, 0.9, 0.9])
//! clf.classify([0.0, 0.0, 0.0, 0.0]).class_index  # 1
//! argmax([0.9, 0.2, 0.1])  # 0
//! ```

use std::sync::Arc;

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use decision_core::{decide, Classifier, ExternalModel, LinearModel, ScoringPort};
use decision_types::{DecisionError, KernelConfig, Prediction};

fn to_py_err(err: DecisionError) -> PyErr {
    match err {
        DecisionError::ModelUnavailable(_) => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

// ─── PyKernelConfig ─────────────────────────────────────────────────

/// Python-visible configuration for the Decision Kernel.
#[pyclass(name = "KernelConfig")]
#[derive(Clone)]
struct PyKernelConfig {
    inner: KernelConfig,
}

#[pymethods]
impl PyKernelConfig {
    #[new]
    #[pyo3(signature = (
        feature_count = 13,
        class_count = 3,
        labels = None,
        warn_on_non_finite = true,
    ))]
    fn new(
        feature_count: usize,
        class_count: usize,
        labels: Option<Vec<String>>,
        warn_on_non_finite: bool,
    ) -> PyResult<Self> {
        let config = KernelConfig {
            feature_count,
            class_count,
            labels,
            warn_on_non_finite,
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = KernelConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    #[getter]
    fn feature_count(&self) -> usize {
        self.inner.feature_count
    }

    #[getter]
    fn class_count(&self) -> usize {
        self.inner.class_count
    }

    #[getter]
    fn labels(&self) -> Option<Vec<String>> {
        self.inner.labels.clone()
    }

    fn __repr__(&self) -> String {
        format!(
            "KernelConfig(feature_count={}, class_count={}, labels={:?})",
            self.inner.feature_count, self.inner.class_count, self.inner.labels
        )
    }
}

// ─── PyPrediction ───────────────────────────────────────────────────

/// Python-visible prediction result.
#[pyclass(name = "Prediction")]
#[derive(Clone)]
struct PyPrediction {
    inner: Prediction,
}

#[pymethods]
impl PyPrediction {
    #[getter]
    fn class_index(&self) -> usize {
        self.inner.class_index
    }

    #[getter]
    fn score(&self) -> f64 {
        self.inner.score
    }

    #[getter]
    fn label(&self) -> Option<String> {
        self.inner.label.clone()
    }

    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("class_index", self.inner.class_index)?;
        dict.set_item("score", self.inner.score)?;
        dict.set_item("label", self.inner.label.clone())?;
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "Prediction(class_index={}, score={:.4}, label={:?})",
            self.inner.class_index, self.inner.score, self.inner.label
        )
    }
}

// ─── argmax ─────────────────────────────────────────────────────────

/// First index of the maximum score; NaN never wins.
#[pyfunction]
fn argmax(scores: Vec<f64>) -> PyResult<usize> {
    decide(&scores).map_err(to_py_err)
}

// ─── RustClassifier ─────────────────────────────────────────────────

/// Wrap a Python `Callable[[list[float]], list[float]]` as a scoring port.
fn python_model(feature_count: usize, class_count: usize, callback: PyObject) -> ExternalModel {
    ExternalModel::new(feature_count, class_count, move |features, scores| {
        Python::with_gil(|py| {
            let result = callback
                .call1(py, (features.to_vec(),))
                .map_err(|e| DecisionError::ModelUnavailable(format!("score callback raised: {e}")))?;
            let values: Vec<f64> = result.extract(py).map_err(|e| {
                DecisionError::ModelUnavailable(format!("score callback returned non-floats: {e}"))
            })?;
            if values.len() != scores.len() {
                return Err(DecisionError::ModelUnavailable(format!(
                    "score callback returned {} scores, expected {}",
                    values.len(),
                    scores.len()
                )));
            }
            scores.copy_from_slice(&values);
            Ok(())
        })
    })
}

/// Decision kernel bound to a scoring model.
///
/// The model is either a Python callable crossing the FFI boundary per
/// inference, or a Rust backend loaded from JSON.
#[pyclass(name = "RustClassifier")]
struct PyClassifier {
    inner: Classifier,
}

#[pymethods]
impl PyClassifier {
    /// Create a classifier around a Python score callback.
    ///
    /// Args:
    ///     config: Optional KernelConfig (uses defaults if None).
    ///     score_callback: Callable[[list[float]], list[float]] returning
    ///                     exactly `class_count` scores.
    #[new]
    #[pyo3(signature = (config = None, score_callback = None))]
    fn new(config: Option<PyKernelConfig>, score_callback: Option<PyObject>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();
        let callback = score_callback
            .ok_or_else(|| PyValueError::new_err("score_callback is required"))?;
        let model: Arc<dyn ScoringPort> =
            Arc::new(python_model(cfg.feature_count, cfg.class_count, callback));
        let inner = Classifier::new(cfg, model).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Create a classifier on the Rust linear backend.
    #[staticmethod]
    #[pyo3(signature = (model_json, config = None))]
    fn from_linear_json(model_json: &str, config: Option<PyKernelConfig>) -> PyResult<Self> {
        let model = LinearModel::from_json(model_json).map_err(to_py_err)?;
        let cfg = match config {
            Some(c) => c.inner,
            None => KernelConfig::new(model.feature_count(), model.class_count()),
        };
        let inner = Classifier::new(cfg, Arc::new(model)).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Run the model and return the full score vector.
    fn score(&self, features: Vec<f64>) -> PyResult<Vec<f64>> {
        let mut scores = vec![0.0; self.inner.config().class_count];
        self.inner
            .score_into(&features, &mut scores)
            .map_err(to_py_err)?;
        Ok(scores)
    }

    /// Run the model and reduce the scores to a prediction.
    fn classify(&self, features: Vec<f64>) -> PyResult<PyPrediction> {
        let inner = self.inner.classify(&features).map_err(to_py_err)?;
        Ok(PyPrediction { inner })
    }

    #[getter]
    fn feature_count(&self) -> usize {
        self.inner.config().feature_count
    }

    #[getter]
    fn class_count(&self) -> usize {
        self.inner.config().class_count
    }
}

#[pymodule]
fn decision_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyKernelConfig>()?;
    m.add_class::<PyPrediction>()?;
    m.add_class::<PyClassifier>()?;
    m.add_function(wrap_pyfunction!(argmax, m)?)?;
    Ok(())
}
