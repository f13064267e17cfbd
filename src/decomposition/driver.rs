//! decomposition::driver — multi-state index decomposition.
//!
//! Purpose
//! -------
//! Orchestrate the LMDI engine over an ordered collection of states. The
//! first state is the fixed base; every state (the base included) is
//! compared against it and yields one row of the output table.
//!
//! Key behaviors
//! -------------
//! - [`IndexDecomposition::new`] validates eagerly that the size and
//!   indicator tables describe the same states in the same order and the
//!   same sub-units, and that the configured method is implemented.
//! - [`IndexDecomposition::from_columns`] mirrors a data-frame style entry:
//!   named columns, an optional identifier column to strip, and a method
//!   identifier parsed from text.
//! - [`IndexDecomposition::results`] recomputes every state on each call
//!   and returns a [`DecompositionTable`]; nothing is cached.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are owned and never mutated after construction.
//! - Output row count and order equal the input state count and order.
//! - A domain error in any state aborts the whole call; no partial table is
//!   returned. The error is wrapped in `StateFailed` with the state label.
//! - The degenerate zero-weight fallback is not an error; it is logged at
//!   `warn` level and the zero row is kept.
//!
//! Conventions
//! -----------
//! - Logging goes through `tracing`; the library installs no subscriber.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction-time validation (state and sub-unit
//!   alignment, identifier mismatch, unimplemented methods), table shape
//!   and ordering, unity of the base row, single-state lookup, and error
//!   wrapping for a failing state.
//! - `tests/integration_decomposition_pipeline.rs` runs the full pipeline
//!   on a multi-sector, multi-year data set.
use crate::decomposition::{
    errors::{DecompositionError, DecompositionResult},
    lmdi::{EffectFactors, lmdi_effects},
    method::DecompositionMethod,
    options::DecompositionOptions,
    results::{DecompositionTable, EffectRow},
    table::{Column, StateTable},
};
use tracing::{debug, trace, warn};

/// IndexDecomposition — decomposition of an indicator over ordered states.
///
/// Purpose
/// -------
/// Own the two input tables (size and indicator) and the options, and
/// compute scale, technology, and composition effects of every state
/// relative to the first.
///
/// Fields
/// ------
/// - `size`: [`StateTable`]
///   Size (activity) per sub-unit and state.
/// - `indicator`: [`StateTable`]
///   Indicator per sub-unit and state.
/// - `options`: [`DecompositionOptions`]
///   Method and zero-log floor.
///
/// Invariants
/// ----------
/// - `size.states() == indicator.states()` element-wise.
/// - `size.n_sub_units() == indicator.n_sub_units()`.
/// - If both tables carry sub-unit identifiers, they are equal.
/// - `options.method()` is implemented.
///
/// Notes
/// -----
/// - Fields are private; read-only accessors expose the inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDecomposition {
    size: StateTable,
    indicator: StateTable,
    options: DecompositionOptions,
}

impl IndexDecomposition {
    /// Build a decomposition from two validated tables.
    ///
    /// Parameters
    /// ----------
    /// - `size`: [`StateTable`]
    ///   Size table; its first state is the base.
    /// - `indicator`: [`StateTable`]
    ///   Indicator table with the same states and sub-units.
    /// - `options`: [`DecompositionOptions`]
    ///   Method and zero-log floor.
    ///
    /// Returns
    /// -------
    /// `DecompositionResult<IndexDecomposition>`
    ///
    /// Errors
    /// ------
    /// - `MethodNotImplemented { method }` for Laspeyres or Arithmetic-Mean
    ///   Divisia.
    /// - `StateCountMismatch` / `StateMismatch` when the state labels differ
    ///   in number or order.
    /// - `SubUnitCountMismatch` when the row counts differ.
    /// - `SubUnitIdMismatch` when both tables carry identifiers and they
    ///   differ.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use index_decomposition::decomposition::{
    /// #     driver::IndexDecomposition, options::DecompositionOptions, table::StateTable,
    /// # };
    /// let states = vec!["_2018".to_string(), "_2019".to_string()];
    /// let size = StateTable::new(states.clone(), array![[1.0, 1.2], [3.0, 3.6]]).unwrap();
    /// let indicator = StateTable::new(states, array![[2.0, 2.4], [6.0, 7.2]]).unwrap();
    ///
    /// let decomposition =
    ///     IndexDecomposition::new(size, indicator, DecompositionOptions::default()).unwrap();
    /// let table = decomposition.results().unwrap();
    ///
    /// assert_eq!(table.len(), 2);
    /// assert!((table.rows()[1].scale_effect - 1.2).abs() < 1e-12);
    /// ```
    pub fn new(
        size: StateTable, indicator: StateTable, options: DecompositionOptions,
    ) -> DecompositionResult<Self> {
        let method = options.method();
        if !method.is_implemented() {
            return Err(DecompositionError::MethodNotImplemented { method });
        }
        validate_alignment(&size, &indicator)?;

        trace!(
            base = size.base_state(),
            states = size.n_states(),
            sub_units = size.n_sub_units(),
            method = %method,
            "index decomposition configured"
        );
        Ok(IndexDecomposition { size, indicator, options })
    }

    /// Build a decomposition from named columns and a method identifier.
    ///
    /// Parameters
    /// ----------
    /// - `size_columns`, `indicator_columns`: `Vec<Column>`
    ///   Tabular inputs, state columns in order.
    /// - `id_column`: `Option<&str>`
    ///   Identifier column to strip from both inputs.
    /// - `method`: `&str`
    ///   Method identifier, e.g. `"LMDI"`.
    ///
    /// Errors
    /// ------
    /// - `UnknownMethod { name }` for an unrecognized identifier. The method
    ///   is checked before the tables.
    /// - Any error of [`StateTable::from_columns`] or
    ///   [`IndexDecomposition::new`].
    pub fn from_columns(
        size_columns: Vec<Column>, indicator_columns: Vec<Column>, id_column: Option<&str>,
        method: &str,
    ) -> DecompositionResult<Self> {
        let options = DecompositionOptions::from_method_name(method)?;
        let size = StateTable::from_columns(size_columns, id_column)?;
        let indicator = StateTable::from_columns(indicator_columns, id_column)?;
        Self::new(size, indicator, options)
    }

    pub fn size(&self) -> &StateTable {
        &self.size
    }

    pub fn indicator(&self) -> &StateTable {
        &self.indicator
    }

    pub fn options(&self) -> &DecompositionOptions {
        &self.options
    }

    pub fn states(&self) -> &[String] {
        self.size.states()
    }

    /// Compute effects for every state relative to the base state.
    ///
    /// Returns
    /// -------
    /// `DecompositionResult<DecompositionTable>`
    ///   One row per state, in input order. Row 0 (the base) is unity.
    ///
    /// Errors
    /// ------
    /// - `StateFailed { state, source }` wrapping the first domain error
    ///   raised by the engine; no rows are returned in that case.
    pub fn results(&self) -> DecompositionResult<DecompositionTable> {
        let rows = (0..self.size.n_states())
            .map(|index| self.row(index))
            .collect::<DecompositionResult<Vec<_>>>()?;
        Ok(DecompositionTable::new(rows))
    }

    /// Compute effects for a single state.
    ///
    /// Errors
    /// ------
    /// - `UnknownState { label }` if no state carries `label`.
    /// - `StateFailed { state, source }` for domain errors.
    pub fn effects_for_state(&self, label: &str) -> DecompositionResult<EffectRow> {
        let index = self
            .size
            .state_index(label)
            .ok_or_else(|| DecompositionError::UnknownState { label: label.to_string() })?;
        self.row(index)
    }

    fn row(&self, index: usize) -> DecompositionResult<EffectRow> {
        let state = &self.size.states()[index];
        let effects = self.compute(index).map_err(|err| {
            warn!(state = %state, error = %err, "decomposition failed for state");
            err.in_state(state)
        })?;

        if effects.is_degenerate() {
            warn!(state = %state, "log-mean weights sum to zero; effects set to 0");
        } else {
            debug!(
                state = %state,
                total = effects.total(),
                scale = effects.scale(),
                technology = effects.technology(),
                composition = effects.composition(),
                "state decomposed"
            );
        }
        Ok(EffectRow::new(state.as_str(), effects))
    }

    fn compute(&self, index: usize) -> DecompositionResult<EffectFactors> {
        match self.options.method() {
            DecompositionMethod::Lmdi => lmdi_effects(
                self.size.series(index),
                self.size.series(0),
                self.indicator.series(index),
                self.indicator.series(0),
                self.options.zero_log_floor(),
            ),
            method => Err(DecompositionError::MethodNotImplemented { method }),
        }
    }
}

/// Check that two tables describe the same states and sub-units.
fn validate_alignment(size: &StateTable, indicator: &StateTable) -> DecompositionResult<()> {
    if size.n_states() != indicator.n_states() {
        return Err(DecompositionError::StateCountMismatch {
            size: size.n_states(),
            indicator: indicator.n_states(),
        });
    }
    for (index, (s, i)) in size.states().iter().zip(indicator.states()).enumerate() {
        if s != i {
            return Err(DecompositionError::StateMismatch {
                index,
                size: s.clone(),
                indicator: i.clone(),
            });
        }
    }

    if size.n_sub_units() != indicator.n_sub_units() {
        return Err(DecompositionError::SubUnitCountMismatch {
            size: size.n_sub_units(),
            indicator: indicator.n_sub_units(),
        });
    }
    if let (Some(size_ids), Some(indicator_ids)) = (size.sub_units(), indicator.sub_units()) {
        for (index, (s, i)) in size_ids.iter().zip(indicator_ids).enumerate() {
            if s != i {
                return Err(DecompositionError::SubUnitIdMismatch {
                    index,
                    size: s.clone(),
                    indicator: i.clone(),
                });
            }
        }
    }
    Ok(())
}
