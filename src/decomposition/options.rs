//! Decomposition options — method choice and numeric fallbacks.
//!
//! Purpose
//! -------
//! Bundle the construction-time configuration of an
//! [`IndexDecomposition`](crate::decomposition::driver::IndexDecomposition):
//! which decomposition method to run and which substitute to use for
//! `ln(0)` inside the LMDI log sums.
//!
//! Invariants & assumptions
//! ------------------------
//! - `zero_log_floor` is finite and strictly positive, enforced by the
//!   constructors.
//! - The method is not checked for implementation status here; the driver
//!   does that so the error surfaces where the decomposition is built.
use crate::decomposition::{
    errors::{DecompositionError, DecompositionResult},
    method::DecompositionMethod,
    numerics::ZERO_LOG_FLOOR,
};
use serde::Serialize;

/// DecompositionOptions — validated configuration for the driver.
///
/// Fields
/// ------
/// - `method`: [`DecompositionMethod`]
///   Decomposition method; only [`DecompositionMethod::Lmdi`] computes.
/// - `zero_log_floor`: `f64`
///   Argument substituted for a zero ratio in the weighted log sums.
///   Defaults to [`ZERO_LOG_FLOOR`].
///
/// Notes
/// -----
/// - Sizes are validated strictly positive and a sub-unit with zero
///   indicator in both states carries no weight, so on validated data a
///   zero ratio arises only from floating-point underflow (e.g. an
///   intensity below the smallest subnormal). For ordinary data the floor
///   never changes the effects.
///
/// Invariants
/// ----------
/// - `zero_log_floor` is finite and > 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecompositionOptions {
    method: DecompositionMethod,
    zero_log_floor: f64,
}

impl DecompositionOptions {
    /// Build options from a method and an explicit zero-log floor.
    ///
    /// # Errors
    /// - `InvalidZeroLogFloor { value }` if the floor is not finite and > 0.
    pub fn new(method: DecompositionMethod, zero_log_floor: f64) -> DecompositionResult<Self> {
        validate_zero_log_floor(zero_log_floor)?;
        Ok(DecompositionOptions { method, zero_log_floor })
    }

    /// Options for `method` with the default zero-log floor.
    pub fn with_method(method: DecompositionMethod) -> Self {
        DecompositionOptions { method, zero_log_floor: ZERO_LOG_FLOOR }
    }

    /// Parse a method identifier such as `"LMDI"`.
    ///
    /// # Errors
    /// - `UnknownMethod { name }` if the identifier is not recognized.
    pub fn from_method_name(name: &str) -> DecompositionResult<Self> {
        Ok(Self::with_method(name.parse()?))
    }

    /// Replace the zero-log floor.
    ///
    /// # Errors
    /// - `InvalidZeroLogFloor { value }` if the floor is not finite and > 0.
    pub fn with_zero_log_floor(self, zero_log_floor: f64) -> DecompositionResult<Self> {
        Self::new(self.method, zero_log_floor)
    }

    pub fn method(&self) -> DecompositionMethod {
        self.method
    }

    pub fn zero_log_floor(&self) -> f64 {
        self.zero_log_floor
    }
}

impl Default for DecompositionOptions {
    fn default() -> Self {
        Self::with_method(DecompositionMethod::Lmdi)
    }
}

fn validate_zero_log_floor(value: f64) -> DecompositionResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DecompositionError::InvalidZeroLogFloor { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the defaults: LMDI with the documented zero-log floor.
    //
    // Given
    // -----
    // - `DecompositionOptions::default()`.
    //
    // Expect
    // ------
    // - method = Lmdi, zero_log_floor = 1e-4.
    fn default_options_use_lmdi_and_documented_floor() {
        let opts = DecompositionOptions::default();
        assert_eq!(opts.method(), DecompositionMethod::Lmdi);
        assert_eq!(opts.zero_log_floor(), 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid floors are rejected and valid ones stored.
    //
    // Given
    // -----
    // - Floors 0.0, -1.0, NaN, +∞ (invalid) and 1e-8 (valid).
    //
    // Expect
    // ------
    // - `InvalidZeroLogFloor` for each invalid floor; the valid one is kept.
    fn with_zero_log_floor_validates_value() {
        let base = DecompositionOptions::default();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            match base.with_zero_log_floor(bad) {
                Err(DecompositionError::InvalidZeroLogFloor { .. }) => (),
                other => panic!("expected InvalidZeroLogFloor for {bad}, got {other:?}"),
            }
        }
        let opts = base.with_zero_log_floor(1e-8).unwrap();
        assert_eq!(opts.zero_log_floor(), 1e-8);
    }

    #[test]
    fn from_method_name_parses_or_rejects() {
        let opts = DecompositionOptions::from_method_name("laspeyres").unwrap();
        assert_eq!(opts.method(), DecompositionMethod::Laspeyres);
        assert!(matches!(
            DecompositionOptions::from_method_name("bogus"),
            Err(DecompositionError::UnknownMethod { .. })
        ));
    }
}
