//! decomposition::errors — error taxonomy for index decomposition.
//!
//! Purpose
//! -------
//! Provide the single error enum and result alias used by every routine in
//! the decomposition subtree, together with a conversion layer to Python
//! exceptions for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`DecompositionResult`] and [`DecompositionError`] as the
//!   canonical result and error types for table construction, driver
//!   configuration, and the LMDI engine.
//! - Classify variants into configuration errors (raised eagerly at
//!   construction) and domain errors (raised while computing a state) via
//!   [`DecompositionError::is_configuration_error`] and
//!   [`DecompositionError::is_domain_error`].
//! - Implement `From<DecompositionError> for PyErr`, mapping configuration
//!   errors to `ValueError` / `TypeError`, domain errors to
//!   `ZeroDivisionError`, and unimplemented methods to
//!   `NotImplementedError`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Domain errors always carry the offending value(s) so callers can see
//!   which data point made the logarithm or logarithmic mean undefined.
//! - A domain error raised for a specific state is wrapped by the driver in
//!   [`DecompositionError::StateFailed`]; the wrapped error keeps its
//!   classification.
//! - The degenerate zero-weight case is *not* an error and never appears
//!   here; it is a documented branch of the engine.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of the data ("size values must be
//!   strictly positive") rather than internal details.
//! - Sub-unit indices are 0-based.
//!
//! Testing notes
//! -------------
//! - Unit tests verify `Display` payload embedding, the configuration /
//!   domain classification, and that `StateFailed` preserves its source.
//! - The PyO3 conversion is exercised by Python-level tests.

use crate::decomposition::method::DecompositionMethod;

#[cfg(feature = "python-bindings")]
use pyo3::{
    PyErr,
    exceptions::{PyNotImplementedError, PyTypeError, PyValueError, PyZeroDivisionError},
};

pub type DecompositionResult<T> = Result<T, DecompositionError>;

/// DecompositionError — failures of index decomposition.
///
/// Purpose
/// -------
/// Represent every validation and computation failure that can occur while
/// building the input tables, configuring the driver, or running the LMDI
/// engine for a state.
///
/// Variants
/// --------
/// Configuration (raised at construction):
/// - `UnknownMethod { name }`: the method identifier is not recognized.
/// - `MethodNotImplemented { method }`: recognized but not implemented.
/// - `InvalidZeroLogFloor { value }`: the zero-log substitute is not finite
///   and strictly positive.
/// - `EmptyTable`: a table has no state columns or no sub-unit rows.
/// - `MissingIdColumn { name }`: the named identifier column is absent.
/// - `NonNumericColumn { name }`: a data column holds labels, not numbers.
/// - `RaggedColumn { name, expected, actual }`: columns differ in length.
/// - `LabelCountMismatch { labels, columns }`: state labels and data columns
///   disagree in number.
/// - `DuplicateState { label }`: a state label occurs twice.
/// - `StateCountMismatch` / `StateMismatch`: the two tables disagree on
///   their states or their ordering.
/// - `SubUnitCountMismatch` / `SubUnitIdMismatch`: the two tables disagree
///   on their sub-units.
/// - `NonFiniteData { column, index, value }`: a NaN or ±∞ table entry.
/// - `UnknownState { label }`: a lookup by state label failed.
///
/// Domain (raised at computation time):
/// - `EmptySeries`, `SeriesLengthMismatch { expected, actual }`
/// - `NonPositiveSize { index, value }`, `NegativeIndicator { index, value }`
/// - `LogMeanUndefined { x, y }`: logarithmic mean of differing arguments
///   where at least one is ≤ 0.
/// - `NegativeLogArgument { value }`: logarithm of a negative number.
/// - `SubUnitFailed { index, source }`: a logarithm-domain error raised for
///   sub-unit `index`.
/// - `StateFailed { state, source }`: one of the above, raised while
///   decomposing `state`.
#[derive(Debug, Clone, PartialEq)]
pub enum DecompositionError {
    // ---- Method / options configuration ----
    UnknownMethod { name: String },
    MethodNotImplemented { method: DecompositionMethod },
    InvalidZeroLogFloor { value: f64 },

    // ---- Table construction ----
    EmptyTable,
    MissingIdColumn { name: String },
    NonNumericColumn { name: String },
    RaggedColumn { name: String, expected: usize, actual: usize },
    LabelCountMismatch { labels: usize, columns: usize },
    DuplicateState { label: String },
    NonFiniteData { column: String, index: usize, value: f64 },
    UnknownState { label: String },

    // ---- Table alignment ----
    StateCountMismatch { size: usize, indicator: usize },
    StateMismatch { index: usize, size: String, indicator: String },
    SubUnitCountMismatch { size: usize, indicator: usize },
    SubUnitIdMismatch { index: usize, size: String, indicator: String },

    // ---- Engine preconditions ----
    EmptySeries,
    SeriesLengthMismatch { expected: usize, actual: usize },
    NonPositiveSize { index: usize, value: f64 },
    NegativeIndicator { index: usize, value: f64 },

    // ---- Logarithm domain ----
    LogMeanUndefined { x: f64, y: f64 },
    NegativeLogArgument { value: f64 },

    // ---- Per-sub-unit / per-state context ----
    SubUnitFailed { index: usize, source: Box<DecompositionError> },
    StateFailed { state: String, source: Box<DecompositionError> },
}

impl DecompositionError {
    /// True for errors raised while configuring or constructing inputs.
    pub fn is_configuration_error(&self) -> bool {
        !self.is_domain_error()
    }

    /// True for errors raised by the data itself during computation.
    pub fn is_domain_error(&self) -> bool {
        match self {
            DecompositionError::EmptySeries
            | DecompositionError::SeriesLengthMismatch { .. }
            | DecompositionError::NonPositiveSize { .. }
            | DecompositionError::NegativeIndicator { .. }
            | DecompositionError::LogMeanUndefined { .. }
            | DecompositionError::NegativeLogArgument { .. } => true,
            DecompositionError::SubUnitFailed { source, .. }
            | DecompositionError::StateFailed { source, .. } => source.is_domain_error(),
            _ => false,
        }
    }

    /// Attach the 0-based sub-unit index at which this error was raised.
    pub(crate) fn in_sub_unit(self, index: usize) -> Self {
        DecompositionError::SubUnitFailed { index, source: Box::new(self) }
    }

    /// Attach the state label under which this error was raised.
    pub(crate) fn in_state(self, state: &str) -> Self {
        DecompositionError::StateFailed { state: state.to_string(), source: Box::new(self) }
    }
}

impl std::error::Error for DecompositionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecompositionError::SubUnitFailed { source, .. }
            | DecompositionError::StateFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl std::fmt::Display for DecompositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Method / options configuration ----
            DecompositionError::UnknownMethod { name } => write!(
                f,
                "The method {name} is not allowed. Please choose LMDI (Log Mean Divisia Index)."
            ),
            DecompositionError::MethodNotImplemented { method } => {
                write!(f, "The method {method} is recognized but not yet implemented.")
            }
            DecompositionError::InvalidZeroLogFloor { value } => {
                write!(f, "Zero-log floor must be finite and > 0; got: {value}")
            }

            // ---- Table construction ----
            DecompositionError::EmptyTable => {
                write!(f, "Table must contain at least one state column and one sub-unit row.")
            }
            DecompositionError::MissingIdColumn { name } => {
                write!(f, "Identifier column '{name}' not found in table.")
            }
            DecompositionError::NonNumericColumn { name } => {
                write!(f, "Column '{name}' is not numeric. The provided data is not tabular numeric data.")
            }
            DecompositionError::RaggedColumn { name, expected, actual } => write!(
                f,
                "Column '{name}' has {actual} rows; expected {expected} like the other columns."
            ),
            DecompositionError::LabelCountMismatch { labels, columns } => {
                write!(f, "Got {labels} state labels for {columns} data columns.")
            }
            DecompositionError::DuplicateState { label } => {
                write!(f, "State label '{label}' occurs more than once.")
            }
            DecompositionError::NonFiniteData { column, index, value } => {
                write!(f, "Value at row {index} of column '{column}' is non-finite: {value}")
            }
            DecompositionError::UnknownState { label } => {
                write!(f, "State '{label}' is not present in the input tables.")
            }

            // ---- Table alignment ----
            DecompositionError::StateCountMismatch { size, indicator } => write!(
                f,
                "Size table has {size} states but indicator table has {indicator}."
            ),
            DecompositionError::StateMismatch { index, size, indicator } => write!(
                f,
                "State {index} differs between tables: size has '{size}', indicator has '{indicator}'."
            ),
            DecompositionError::SubUnitCountMismatch { size, indicator } => write!(
                f,
                "Size table has {size} sub-units but indicator table has {indicator}."
            ),
            DecompositionError::SubUnitIdMismatch { index, size, indicator } => write!(
                f,
                "Sub-unit {index} differs between tables: size has '{size}', indicator has '{indicator}'."
            ),

            // ---- Engine preconditions ----
            DecompositionError::EmptySeries => write!(f, "Sub-unit series is empty."),
            DecompositionError::SeriesLengthMismatch { expected, actual } => write!(
                f,
                "Sub-unit series length mismatch: expected {expected}, got {actual}."
            ),
            DecompositionError::NonPositiveSize { index, value } => write!(
                f,
                "Size value at sub-unit {index} must be strictly positive; got: {value}"
            ),
            DecompositionError::NegativeIndicator { index, value } => write!(
                f,
                "Indicator value at sub-unit {index} must be non-negative; got: {value}"
            ),

            // ---- Logarithm domain ----
            DecompositionError::LogMeanUndefined { x, y } => write!(
                f,
                "Logarithmic mean undefined for ({x}, {y}): at least one data point is zero or negative. \
                 Please use the Laspeyres or Arithmetic Mean Divisia method."
            ),
            DecompositionError::NegativeLogArgument { value } => write!(
                f,
                "Logarithm undefined for negative value {value}. \
                 Please use the Laspeyres or Arithmetic Mean Divisia method."
            ),

            // ---- Per-sub-unit / per-state context ----
            DecompositionError::SubUnitFailed { index, source } => {
                write!(f, "Sub-unit {index}: {source}")
            }
            DecompositionError::StateFailed { state, source } => {
                write!(f, "Decomposition failed for state '{state}': {source}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<DecompositionError> for PyErr {
    fn from(err: DecompositionError) -> PyErr {
        let msg = err.to_string();
        match err {
            DecompositionError::NonNumericColumn { .. } => PyTypeError::new_err(msg),
            DecompositionError::MethodNotImplemented { .. } => PyNotImplementedError::new_err(msg),
            ref e if e.is_domain_error() => PyZeroDivisionError::new_err(msg),
            _ => PyValueError::new_err(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Embedding of payload values in `Display` messages.
    // - Configuration vs domain classification, including wrapped errors.
    // - `StateFailed` exposing its wrapped error through `Error::source`.
    //
    // They intentionally DO NOT cover:
    // - The `From<DecompositionError> for PyErr` conversion, which needs the
    //   Python C API and is exercised by Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that the log-mean domain error reports both arguments and
    // points the caller to the alternative methods.
    //
    // Given
    // -----
    // - `LogMeanUndefined { x: 0.0, y: 0.25 }`.
    //
    // Expect
    // ------
    // - The message contains "0.25" and "Laspeyres".
    fn log_mean_undefined_display_includes_arguments_and_guidance() {
        // Arrange
        let err = DecompositionError::LogMeanUndefined { x: 0.0, y: 0.25 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("0.25"), "Display should include the argument.\nGot: {msg}");
        assert!(msg.contains("Laspeyres"), "Display should suggest an alternative.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure the unknown-method error echoes the rejected identifier.
    //
    // Given
    // -----
    // - `UnknownMethod { name: "Shapley" }`.
    //
    // Expect
    // ------
    // - The message contains "Shapley".
    fn unknown_method_display_includes_name() {
        // Arrange
        let err = DecompositionError::UnknownMethod { name: "Shapley".to_string() };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("Shapley"), "Display should include the method name.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Check the configuration / domain split of the error taxonomy.
    //
    // Given
    // -----
    // - A configuration error (`UnknownMethod`) and two domain errors
    //   (`NegativeLogArgument`, `NonPositiveSize`).
    //
    // Expect
    // ------
    // - Exactly one of the two predicates holds for each value.
    fn classification_separates_configuration_and_domain_errors() {
        // Arrange
        let config = DecompositionError::UnknownMethod { name: "x".to_string() };
        let log = DecompositionError::NegativeLogArgument { value: -1.0 };
        let size = DecompositionError::NonPositiveSize { index: 2, value: 0.0 };

        // Act & Assert
        assert!(config.is_configuration_error() && !config.is_domain_error());
        assert!(log.is_domain_error() && !log.is_configuration_error());
        assert!(size.is_domain_error() && !size.is_configuration_error());
    }

    #[test]
    // Purpose
    // -------
    // Verify that wrapping a domain error in `StateFailed` keeps its
    // classification, message, and source chain.
    //
    // Given
    // -----
    // - `NegativeLogArgument { value: -2.0 }` wrapped for state "_2019".
    //
    // Expect
    // ------
    // - The wrapper is a domain error, names the state, and its source
    //   displays the inner message.
    fn state_failed_preserves_source() {
        // Arrange
        let inner = DecompositionError::NegativeLogArgument { value: -2.0 };
        let inner_msg = inner.to_string();

        // Act
        let wrapped = inner.in_state("_2019");

        // Assert
        assert!(wrapped.is_domain_error());
        let msg = wrapped.to_string();
        assert!(msg.contains("_2019"), "Display should include the state.\nGot: {msg}");
        let source = std::error::Error::source(&wrapped).map(|s| s.to_string());
        assert_eq!(source, Some(inner_msg));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a logarithm-domain error scoped to a sub-unit and then a state
    // reports both locations and stays a domain error.
    //
    // Given
    // -----
    // - `LogMeanUndefined { x: 0.4, y: 0.0 }` at sub-unit 3 of state "_2020".
    //
    // Expect
    // ------
    // - The message names the state and "Sub-unit 3"; the source chain
    //   reaches the sub-unit wrapper.
    fn sub_unit_failed_reports_index_inside_state() {
        // Arrange
        let inner = DecompositionError::LogMeanUndefined { x: 0.4, y: 0.0 };

        // Act
        let wrapped = inner.in_sub_unit(3).in_state("_2020");

        // Assert
        assert!(wrapped.is_domain_error());
        let msg = wrapped.to_string();
        assert!(msg.contains("_2020") && msg.contains("Sub-unit 3"), "Got: {msg}");
        match std::error::Error::source(&wrapped).map(|s| s.to_string()) {
            Some(source) => assert!(source.starts_with("Sub-unit 3"), "Got: {source}"),
            None => panic!("StateFailed should expose its source"),
        }
    }
}
