//! decomposition::validation — shared input guards for the LMDI engine.
//!
//! Purpose
//! -------
//! Centralize the precondition checks that must hold before any logarithm
//! or logarithmic mean is evaluated, so the engine never relies on NaN
//! propagation to detect bad data.
//!
//! Key behaviors
//! -------------
//! - Check that the four per-state series (size / indicator, target / base)
//!   are non-empty and share one length.
//! - Check that every size value is finite and strictly positive and every
//!   indicator value is finite and non-negative.
//! - Report the first violation as a structured [`DecompositionError`] with
//!   the sub-unit index and offending value.
//!
//! Invariants & assumptions
//! ------------------------
//! - Zero indicator values are allowed here. Whether they are usable depends
//!   on the other state and is decided by the logarithmic mean.
//! - Table-level checks (labels, ragged columns, NaNs in tables) live in
//!   `decomposition::table`; this module only sees numeric views.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch and a success path.
use crate::decomposition::errors::{DecompositionError, DecompositionResult};
use ndarray::ArrayView1;

/// Validate the four series passed to the LMDI engine.
///
/// Parameters
/// ----------
/// - `size`, `size_base`: `ArrayView1<f64>`
///   Size series for the target and base state. Every value must be finite
///   and strictly positive.
/// - `indicator`, `indicator_base`: `ArrayView1<f64>`
///   Indicator series for the target and base state. Every value must be
///   finite and non-negative.
///
/// Returns
/// -------
/// `DecompositionResult<()>`
///   `Ok(())` when all preconditions hold.
///
/// Errors
/// ------
/// - `EmptySeries` when the target size series is empty.
/// - `SeriesLengthMismatch { expected, actual }` when any series differs in
///   length from the target size series.
/// - `NonFiniteData { column, index, value }` for NaN or ±∞ entries.
/// - `NonPositiveSize { index, value }` for size values ≤ 0.
/// - `NegativeIndicator { index, value }` for indicator values < 0.
///
/// Panics
/// ------
/// - Never panics.
pub fn validate_series(
    size: ArrayView1<f64>, size_base: ArrayView1<f64>, indicator: ArrayView1<f64>,
    indicator_base: ArrayView1<f64>,
) -> DecompositionResult<()> {
    let n = size.len();
    if n == 0 {
        return Err(DecompositionError::EmptySeries);
    }
    for other in [size_base.view(), indicator.view(), indicator_base.view()] {
        if other.len() != n {
            return Err(DecompositionError::SeriesLengthMismatch { expected: n, actual: other.len() });
        }
    }

    for (name, series) in [("size", size.view()), ("size (base)", size_base.view())] {
        for (index, &value) in series.iter().enumerate() {
            check_finite(name, index, value)?;
            if value <= 0.0 {
                return Err(DecompositionError::NonPositiveSize { index, value });
            }
        }
    }

    for (name, series) in
        [("indicator", indicator.view()), ("indicator (base)", indicator_base.view())]
    {
        for (index, &value) in series.iter().enumerate() {
            check_finite(name, index, value)?;
            if value < 0.0 {
                return Err(DecompositionError::NegativeIndicator { index, value });
            }
        }
    }

    Ok(())
}

#[inline]
pub(crate) fn check_finite(column: &str, index: usize, value: f64) -> DecompositionResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DecompositionError::NonFiniteData { column: column.to_string(), index, value })
    }
}
