//! Logarithmic helpers for LMDI weighting.
//!
//! Provides the two scalar primitives the LMDI engine is built on, with
//! explicit domain checks in place of relying on NaN propagation.
//!
//! # Provided items
//! - [`ZERO_LOG_FLOOR`]: substitute argument used when a ratio is exactly
//!   zero (default 1e-4).
//! - [`log_mean(x, y)`]: logarithmic mean `(y − x) / (ln y − ln x)`, equal
//!   to `x` when `x == y`.
//! - [`modified_log(v, floor)`]: natural logarithm with `ln(floor)` in place
//!   of `−∞` at `v == 0`.
//!
//! # Rationale
//! The logarithmic mean is what makes the Divisia decomposition exact: for
//! positive shares, Σ L(wᵢᵀ, wᵢ⁰) · ln(xᵢᵀ/xᵢ⁰) telescopes without residual.
//! Zero and negative arguments are outside that regime and are reported as
//! [`DecompositionError`] values.
use crate::decomposition::errors::{DecompositionError, DecompositionResult};

/// Substitute argument for `ln(0)`.
///
/// A zero ratio would send one log term to −∞ and collapse the effect to
/// exactly zero. Substituting `ln(1e-4)` keeps the weighted sum finite. The
/// constant has no derivation beyond numerical convenience; callers that
/// need a different floor pass one through
/// [`DecompositionOptions`](crate::decomposition::options::DecompositionOptions).
///
/// Inside the LMDI engine a zero ratio on validated data only results from
/// underflow, so the floor does not affect ordinary decompositions.
pub const ZERO_LOG_FLOOR: f64 = 1e-4;

/// Logarithmic mean of two values.
///
/// `L(x, y) = x` when `x == y`, otherwise `(y − x) / (ln y − ln x)`.
///
/// # Parameters
/// - `x`, `y`: values to average; must be strictly positive unless equal.
///
/// # Returns
/// - `L(x, y)`, which lies between `min(x, y)` and `max(x, y)` and is
///   symmetric in its arguments.
///
/// # Errors
/// - `LogMeanUndefined { x, y }` when `x != y` and either value is ≤ 0 (or
///   NaN), since one of the logarithms is undefined.
pub fn log_mean(x: f64, y: f64) -> DecompositionResult<f64> {
    if x == y {
        return Ok(x);
    }
    if !(x > 0.0 && y > 0.0) {
        return Err(DecompositionError::LogMeanUndefined { x, y });
    }
    // ln(hi/lo) as ln_1p of the relative gap stays accurate for close arguments;
    // ordering the pair keeps the result bit-for-bit symmetric.
    let (lo, hi) = if x < y { (x, y) } else { (y, x) };
    let gap = hi - lo;
    let relative_gap = gap / lo;
    // Widely separated arguments overflow the relative gap; the plain log
    // difference has no cancellation there.
    let log_ratio =
        if relative_gap.is_finite() { relative_gap.ln_1p() } else { hi.ln() - lo.ln() };
    if log_ratio == 0.0 {
        return Ok(0.5 * (lo + hi));
    }
    Ok(gap / log_ratio)
}

/// Natural logarithm with a finite substitute at zero.
///
/// # Parameters
/// - `value`: argument; must be ≥ 0.
/// - `zero_floor`: substitute argument used when `value == 0`; typically
///   [`ZERO_LOG_FLOOR`].
///
/// # Returns
/// - `ln(value)` for `value > 0`, `ln(zero_floor)` for `value == 0`.
///
/// # Errors
/// - `NegativeLogArgument { value }` when `value < 0` or NaN.
pub fn modified_log(value: f64, zero_floor: f64) -> DecompositionResult<f64> {
    if value == 0.0 {
        return Ok(zero_floor.ln());
    }
    if !(value > 0.0) {
        return Err(DecompositionError::NegativeLogArgument { value });
    }
    Ok(value.ln())
}
