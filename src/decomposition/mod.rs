//! decomposition — Log-Mean Divisia index decomposition.
//!
//! Purpose
//! -------
//! Collect the index decomposition routines and their shared
//! infrastructure: input tables, method and option types, the LMDI engine,
//! the multi-state driver, and result tables.
//!
//! Key behaviors
//! -------------
//! - Decompose the change of an aggregate indicator between a base state
//!   and every other state into scale, technology, and composition effects
//!   via [`IndexDecomposition`].
//! - Expose the single-comparison engine [`lmdi_effects`] and the scalar
//!   primitives [`log_mean`] and [`modified_log`] for callers that manage
//!   their own data layout.
//! - Report failures through [`DecompositionError`] /
//!   [`DecompositionResult`], split into configuration errors (raised at
//!   construction) and domain errors (raised per state).
//!
//! Invariants & assumptions
//! ------------------------
//! - Input tables hold finite values, one row per sub-unit and one column
//!   per state; the first column is the base state.
//! - Sizes are strictly positive, indicators non-negative; zero indicator
//!   shares are usable only when zero in both compared states.
//! - Routines never panic on user-facing invalid inputs.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use index_decomposition::decomposition::prelude::*;
//!   # use ndarray::array;
//!   # fn main() -> DecompositionResult<()> {
//!   # let states = vec!["_2018".to_string(), "_2019".to_string()];
//!   # let size = StateTable::new(states.clone(), array![[1.0, 1.2], [3.0, 3.3]])?;
//!   # let indicator = StateTable::new(states, array![[2.0, 2.4], [6.0, 6.6]])?;
//!
//!   let decomposition = IndexDecomposition::new(size, indicator, DecompositionOptions::default())?;
//!   let table: DecompositionTable = decomposition.results()?;
//!   # assert_eq!(table.len(), 2);
//!   # Ok(())
//!   # }
//!   ```
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests for its own branches.
//! - `tests/` holds the multi-year pipeline test and randomized property
//!   tests for the logarithmic mean and the decomposition identities.

pub mod driver;
pub mod errors;
pub mod lmdi;
pub mod method;
pub mod numerics;
pub mod options;
pub mod results;
pub mod table;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::driver::IndexDecomposition;
pub use self::errors::{DecompositionError, DecompositionResult};
pub use self::lmdi::{EffectFactors, lmdi_effects};
pub use self::method::DecompositionMethod;
pub use self::numerics::{ZERO_LOG_FLOOR, log_mean, modified_log};
pub use self::options::DecompositionOptions;
pub use self::results::{DecompositionTable, EFFECT_COLUMNS, EffectRow};
pub use self::table::{Column, ColumnData, StateTable};
pub use self::validation::validate_series;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use index_decomposition::decomposition::prelude::*;
//
// to import the main decomposition surface in a single line.

pub mod prelude {
    pub use super::driver::IndexDecomposition;
    pub use super::errors::{DecompositionError, DecompositionResult};
    pub use super::lmdi::EffectFactors;
    pub use super::method::DecompositionMethod;
    pub use super::options::DecompositionOptions;
    pub use super::results::{DecompositionTable, EffectRow};
    pub use super::table::{Column, StateTable};
}
