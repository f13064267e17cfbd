//! Decomposition method identifiers.
//!
//! Index decomposition analysis knows several weighting schemes. Only the
//! Log-Mean Divisia Index is implemented; the Laspeyres index and the
//! Arithmetic-Mean Divisia index are recognized so configuration can name
//! them, and the driver rejects them with
//! [`DecompositionError::MethodNotImplemented`].
use crate::decomposition::errors::DecompositionError;
use serde::Serialize;
use std::str::FromStr;

/// Decomposition method family.
///
/// - `Lmdi`: Log-Mean Divisia Index (Ang & Zhang, 2000). Exact and
///   residual-free.
/// - `Laspeyres`: Laspeyres index decomposition. Not implemented.
/// - `ArithmeticMeanDivisia`: Arithmetic-Mean Divisia index. Not
///   implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DecompositionMethod {
    #[default]
    Lmdi,
    Laspeyres,
    ArithmeticMeanDivisia,
}

impl DecompositionMethod {
    /// Whether the driver can compute effects with this method.
    pub fn is_implemented(&self) -> bool {
        matches!(self, DecompositionMethod::Lmdi)
    }

    /// Canonical identifier, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            DecompositionMethod::Lmdi => "LMDI",
            DecompositionMethod::Laspeyres => "Laspeyres",
            DecompositionMethod::ArithmeticMeanDivisia => "AMDI",
        }
    }
}

impl std::fmt::Display for DecompositionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecompositionMethod {
    type Err = DecompositionError;

    /// Parse a method identifier, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    /// - `UnknownMethod { name }` when the identifier is not recognized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lmdi" | "log mean divisia" | "log-mean divisia" => Ok(DecompositionMethod::Lmdi),
            "laspeyres" => Ok(DecompositionMethod::Laspeyres),
            "amdi" | "arithmetic mean divisia" | "arithmetic-mean divisia" => {
                Ok(DecompositionMethod::ArithmeticMeanDivisia)
            }
            _ => Err(DecompositionError::UnknownMethod { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that canonical and alternative spellings parse, case-insensitively.
    //
    // Given
    // -----
    // - Identifiers "LMDI", " lmdi ", "Laspeyres", "Arithmetic Mean Divisia".
    //
    // Expect
    // ------
    // - Each maps to the expected variant.
    fn from_str_accepts_recognized_identifiers() {
        assert_eq!("LMDI".parse::<DecompositionMethod>(), Ok(DecompositionMethod::Lmdi));
        assert_eq!(" lmdi ".parse::<DecompositionMethod>(), Ok(DecompositionMethod::Lmdi));
        assert_eq!("Laspeyres".parse::<DecompositionMethod>(), Ok(DecompositionMethod::Laspeyres));
        assert_eq!(
            "Arithmetic Mean Divisia".parse::<DecompositionMethod>(),
            Ok(DecompositionMethod::ArithmeticMeanDivisia)
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure unrecognized identifiers are rejected with the caller's text.
    //
    // Given
    // -----
    // - Identifier "Shapley".
    //
    // Expect
    // ------
    // - `Err(UnknownMethod { name: "Shapley" })`.
    fn from_str_rejects_unknown_identifier() {
        match "Shapley".parse::<DecompositionMethod>() {
            Err(DecompositionError::UnknownMethod { name }) => assert_eq!(name, "Shapley"),
            other => panic!("expected UnknownMethod error, got {other:?}"),
        }
    }

    #[test]
    fn only_lmdi_is_implemented() {
        assert!(DecompositionMethod::Lmdi.is_implemented());
        assert!(!DecompositionMethod::Laspeyres.is_implemented());
        assert!(!DecompositionMethod::ArithmeticMeanDivisia.is_implemented());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for method in [
            DecompositionMethod::Lmdi,
            DecompositionMethod::Laspeyres,
            DecompositionMethod::ArithmeticMeanDivisia,
        ] {
            assert_eq!(method.to_string().parse::<DecompositionMethod>(), Ok(method));
        }
    }
}
