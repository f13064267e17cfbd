//! index_decomposition — Log-Mean Divisia index decomposition with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the decomposition to Python via the `_index_decomposition`
//! extension module. The crate attributes the change in an aggregate
//! indicator (e.g. total emissions of an economy) between a base state and
//! later states (e.g. years) to a scale effect, a technology (intensity)
//! effect, and a composition (structure) effect across sub-units (e.g.
//! sectors).
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`decomposition`) as the public crate
//!   surface.
//! - Define the `#[pyclass]` wrapper and the `#[pymodule]` initializer for
//!   the `_index_decomposition` Python extension when the `python-bindings`
//!   feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in `decomposition`; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - The Python class accepts pandas DataFrames laid out with one row per
//!   sub-unit and one column per state, the first data column being the
//!   base state.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are propagated as
//!   [`DecompositionError`](decomposition::DecompositionError) internally
//!   and converted to `PyErr` at the PyO3 boundary: `TypeError` for
//!   non-tabular input, `ValueError` for configuration errors,
//!   `ZeroDivisionError` for data outside the LMDI domain, and
//!   `NotImplementedError` for recognized but unimplemented methods.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code depends on `decomposition` directly and can ignore
//!   the PyO3 items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by integration tests under `tests/`.
//! - The PyO3 bindings are exercised from Python.

pub mod decomposition;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    decomposition::{
        driver::IndexDecomposition, numerics::ZERO_LOG_FLOOR, options::DecompositionOptions,
    },
    utils::{extract_state_table, results_to_dataframe},
};

/// IndexDecomposition — Python-facing wrapper for the LMDI decomposition.
///
/// Purpose
/// -------
/// Build an [`IndexDecomposition`] from two pandas DataFrames and return
/// its results as a pandas DataFrame.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `IndexDecomposition(df_size, df_indicator, id_column=None, method="LMDI", zero_log_floor=None)`:
/// - `df_size`, `df_indicator`: pandas DataFrames, rows = sub-units,
///   columns = states (ordered, base first).
/// - `id_column`: optional name of the sub-unit identifier column to drop
///   from both frames.
/// - `method`: decomposition method identifier; only `"LMDI"` computes.
/// - `zero_log_floor`: optional replacement for the default `1e-4`
///   substitute of `ln(0)`. It only takes effect when a ratio underflows
///   to zero, so ordinary data decompose identically for any floor.
///
/// Fields
/// ------
/// - `inner`: [`IndexDecomposition`]
///   Fully validated decomposition.
///
/// Notes
/// -----
/// - Construction fails eagerly on every configuration error; only data
///   outside the LMDI domain can make `get_results()` raise.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "index_decomposition.decomposition", name = "IndexDecomposition")]
pub struct PyIndexDecomposition {
    inner: IndexDecomposition,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyIndexDecomposition {
    #[new]
    #[pyo3(
        text_signature = "(df_size, df_indicator, /, id_column=None, method='LMDI', zero_log_floor=None)",
        signature = (df_size, df_indicator, id_column = None, method = "LMDI", zero_log_floor = None)
    )]
    pub fn new<'py>(
        py: Python<'py>, df_size: &Bound<'py, PyAny>, df_indicator: &Bound<'py, PyAny>,
        id_column: Option<&str>, method: &str, zero_log_floor: Option<f64>,
    ) -> PyResult<PyIndexDecomposition> {
        let mut options = DecompositionOptions::from_method_name(method)?;
        if let Some(floor) = zero_log_floor {
            options = options.with_zero_log_floor(floor)?;
        }

        let size = extract_state_table(py, df_size, id_column)?;
        let indicator = extract_state_table(py, df_indicator, id_column)?;
        let inner = IndexDecomposition::new(size, indicator, options)?;
        Ok(PyIndexDecomposition { inner })
    }

    /// Effects of every state relative to the first, as a pandas DataFrame
    /// with columns `state`, `total_effect`, `scale_effect`,
    /// `technology_effect`, `composition_effect`.
    pub fn get_results<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        let table = self.inner.results()?;
        results_to_dataframe(py, &table)
    }

    /// Ordered state labels; the first is the base state.
    #[getter]
    pub fn states(&self) -> Vec<String> {
        self.inner.states().to_vec()
    }

    /// Sub-unit identifiers taken from `id_column`, if one was given.
    #[getter]
    pub fn sub_units(&self) -> Option<Vec<String>> {
        self.inner.size().sub_units().map(|ids| ids.to_vec())
    }

    /// Canonical identifier of the configured method.
    #[getter]
    pub fn method(&self) -> &'static str {
        self.inner.options().method().as_str()
    }

    /// Substitute argument used for `ln(0)`.
    #[getter]
    pub fn zero_log_floor(&self) -> f64 {
        self.inner.options().zero_log_floor()
    }
}

/// _index_decomposition — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_index_decomposition` Python module and register its
/// `decomposition` submodule used by the public `index_decomposition`
/// package.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _index_decomposition<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let decomposition_mod = PyModule::new(_py, "decomposition")?;
    decomposition(_py, m, &decomposition_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("index_decomposition.decomposition", decomposition_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn decomposition<'py>(
    _py: Python, index_decomposition: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyIndexDecomposition>()?;
    m.add("ZERO_LOG_FLOOR", ZERO_LOG_FLOOR)?;
    index_decomposition.add_submodule(m)?;
    Ok(())
}
