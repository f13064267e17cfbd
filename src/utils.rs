#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny, types::PyDict};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec / Array1 → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use crate::decomposition::{
    errors::DecompositionError,
    results::{DecompositionTable, EFFECT_COLUMNS},
    table::{Column, StateTable},
};

/// Read a 1-D float64 column from a numpy array, a pandas Series, or a
/// Python sequence, copying only when the input is not already contiguous
/// float64.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    // pandas columns of integer dtype are cast rather than rejected.
    let kwargs = PyDict::new(py);
    kwargs.set_item("dtype", "float64")?;
    if let Ok(obj) = raw_data.call_method("to_numpy", (), Some(&kwargs)) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Convert a pandas DataFrame (rows = sub-units, columns = states) into a
/// [`StateTable`], stripping `id_column` when given.
///
/// Column labels are converted with `str()`. The identifier column may hold
/// any values; every other column must convert to `float64`.
///
/// # Errors
/// - `TypeError` if `raw_frame` has no `columns` attribute (not a
///   DataFrame) or a data column is not numeric.
/// - `ValueError` for table validation failures (missing identifier column,
///   non-finite values, duplicate labels, empty frame).
#[cfg(feature = "python-bindings")]
pub fn extract_state_table<'py>(
    py: Python<'py>, raw_frame: &Bound<'py, PyAny>, id_column: Option<&str>,
) -> PyResult<StateTable> {
    let labels = raw_frame.getattr("columns").map_err(|_| {
        PyTypeError::new_err("The provided data is not of type pandas dataframe. Please check.")
    })?;
    let labels: Vec<Bound<'py, PyAny>> = labels.call_method0("tolist")?.extract()?;

    let mut columns = Vec::with_capacity(labels.len());
    for label in labels {
        let name = label.str()?.to_string();
        let series = raw_frame.get_item(&label)?;

        if id_column == Some(name.as_str()) {
            let values: Vec<Bound<'py, PyAny>> = series.call_method0("tolist")?.extract()?;
            let ids = values
                .iter()
                .map(|v| v.str().map(|s| s.to_string()))
                .collect::<PyResult<Vec<String>>>()?;
            columns.push(Column::labels(name, ids));
            continue;
        }

        let values = extract_f64_array(py, &series)
            .map_err(|_| DecompositionError::NonNumericColumn { name: name.clone() })?;
        columns.push(Column::numeric(name, values.as_array().to_vec()));
    }

    Ok(StateTable::from_columns(columns, id_column)?)
}

/// Build a pandas DataFrame with columns `state` and [`EFFECT_COLUMNS`].
#[cfg(feature = "python-bindings")]
pub fn results_to_dataframe<'py>(
    py: Python<'py>, table: &DecompositionTable,
) -> PyResult<Bound<'py, PyAny>> {
    let data = PyDict::new(py);
    data.set_item("state", table.states())?;

    let values = table.to_array();
    for (j, name) in EFFECT_COLUMNS.iter().enumerate() {
        data.set_item(*name, values.column(j).to_owned().into_pyarray(py))?;
    }

    py.import("pandas")?.getattr("DataFrame")?.call1((data,))
}
