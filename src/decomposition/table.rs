//! State tables — validated sub-unit × state numeric inputs.
//!
//! Purpose
//! -------
//! Provide the tabular input of the decomposition: one table for the size
//! measure and one for the indicator measure, each holding one row per
//! sub-unit and one column per state. This module centralizes table-level
//! validation so the driver and engine can rely on clean, finite data.
//!
//! Key behaviors
//! -------------
//! - [`StateTable::new`] validates an `ndarray::Array2<f64>` together with
//!   its ordered state labels.
//! - [`StateTable::from_columns`] builds a table from heterogeneous named
//!   [`Column`]s, stripping an optional identifier column and keeping its
//!   values as sub-unit identifiers.
//! - Per-state series are exposed as `ArrayView1<f64>` column views.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least one state column and one sub-unit row.
//! - State labels are unique and their count equals the number of columns.
//! - Every value is finite. Sign checks belong to the engine, since whether
//!   a zero is usable depends on the other state.
//! - The first state column is the base state of the decomposition. Column
//!   order is a caller contract and is never re-sorted.
//! - No row may be a precomputed total of the others; this cannot be
//!   detected and is the caller's responsibility.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy paths of both constructors and every error
//!   branch (empty, label mismatch, duplicates, non-finite values, missing
//!   or non-numeric identifier handling, ragged columns).
use crate::decomposition::{
    errors::{DecompositionError, DecompositionResult},
    validation::check_finite,
};
use ndarray::{Array2, ArrayView1, ArrayView2};
use std::collections::HashSet;

/// Values of one named input column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Labels(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Labels(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named column of a heterogeneous input table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Column { name: name.into(), data: ColumnData::Numeric(values) }
    }

    pub fn labels<S: Into<String>>(name: impl Into<String>, labels: Vec<S>) -> Self {
        Column {
            name: name.into(),
            data: ColumnData::Labels(labels.into_iter().map(Into::into).collect()),
        }
    }
}

/// `StateTable` — validated per-sub-unit, per-state numeric values.
///
/// Fields
/// ------
/// - `states`: `Vec<String>`
///   Ordered state labels, one per column. The first is the base state.
/// - `sub_units`: `Option<Vec<String>>`
///   Optional sub-unit identifiers, one per row, taken from a stripped
///   identifier column.
/// - `values`: `Array2<f64>`
///   Numeric data with rows = sub-units and columns = states.
///
/// Invariants
/// ----------
/// - `values.ncols() == states.len() >= 1` and `values.nrows() >= 1`.
/// - State labels are unique; all values are finite.
/// - If present, `sub_units.len() == values.nrows()`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTable {
    states: Vec<String>,
    sub_units: Option<Vec<String>>,
    values: Array2<f64>,
}

impl StateTable {
    /// Construct a validated table from state labels and a value matrix.
    ///
    /// Parameters
    /// ----------
    /// - `states`: `Vec<String>`
    ///   Ordered state labels; the first is the base state.
    /// - `values`: `Array2<f64>`
    ///   `n_sub_units × n_states` matrix of finite values.
    ///
    /// Returns
    /// -------
    /// `DecompositionResult<StateTable>`
    ///
    /// Errors
    /// ------
    /// - `LabelCountMismatch { labels, columns }` if `states.len()` differs
    ///   from `values.ncols()`.
    /// - `EmptyTable` if there are no columns or no rows.
    /// - `DuplicateState { label }` for a repeated label.
    /// - `NonFiniteData { column, index, value }` for the first NaN / ±∞
    ///   entry, scanning column by column.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use index_decomposition::decomposition::table::StateTable;
    /// let table = StateTable::new(
    ///     vec!["_2018".into(), "_2019".into()],
    ///     array![[1.0, 1.2], [3.0, 3.3]],
    /// )
    /// .unwrap();
    /// assert_eq!(table.n_sub_units(), 2);
    /// assert_eq!(table.states()[0], "_2018");
    /// ```
    pub fn new(states: Vec<String>, values: Array2<f64>) -> DecompositionResult<Self> {
        if states.len() != values.ncols() {
            return Err(DecompositionError::LabelCountMismatch {
                labels: states.len(),
                columns: values.ncols(),
            });
        }
        if values.ncols() == 0 || values.nrows() == 0 {
            return Err(DecompositionError::EmptyTable);
        }

        let mut seen = HashSet::with_capacity(states.len());
        for label in &states {
            if !seen.insert(label.as_str()) {
                return Err(DecompositionError::DuplicateState { label: label.clone() });
            }
        }

        for (label, column) in states.iter().zip(values.columns()) {
            for (index, &value) in column.iter().enumerate() {
                check_finite(label, index, value)?;
            }
        }

        Ok(StateTable { states, sub_units: None, values })
    }

    /// Construct a table from named columns, stripping an identifier column.
    ///
    /// Parameters
    /// ----------
    /// - `columns`: `Vec<Column>`
    ///   Input columns in state order. Apart from the identifier column,
    ///   every column must be numeric and all columns must share a length.
    /// - `id_column`: `Option<&str>`
    ///   Name of the identifier column to remove. Its values (labels, or
    ///   numbers rendered as text) become the sub-unit identifiers.
    ///
    /// Errors
    /// ------
    /// - `MissingIdColumn { name }` if `id_column` names no column.
    /// - `NonNumericColumn { name }` if a remaining column holds labels.
    /// - `RaggedColumn { name, expected, actual }` if column lengths differ.
    /// - Any error of [`StateTable::new`].
    pub fn from_columns(
        mut columns: Vec<Column>, id_column: Option<&str>,
    ) -> DecompositionResult<Self> {
        let ids = match id_column {
            Some(name) => {
                let position = columns
                    .iter()
                    .position(|c| c.name == name)
                    .ok_or_else(|| DecompositionError::MissingIdColumn { name: name.to_string() })?;
                let id = columns.remove(position);
                Some(match id.data {
                    ColumnData::Labels(labels) => labels,
                    ColumnData::Numeric(values) => values.iter().map(|v| v.to_string()).collect(),
                })
            }
            None => None,
        };

        let n_rows = match (&ids, columns.first()) {
            (Some(ids), _) => ids.len(),
            (None, Some(first)) => first.data.len(),
            (None, None) => 0,
        };

        let mut states = Vec::with_capacity(columns.len());
        let mut numeric = Vec::with_capacity(columns.len());
        for column in columns {
            let values = match column.data {
                ColumnData::Numeric(values) => values,
                ColumnData::Labels(_) => {
                    return Err(DecompositionError::NonNumericColumn { name: column.name });
                }
            };
            if values.len() != n_rows {
                return Err(DecompositionError::RaggedColumn {
                    name: column.name,
                    expected: n_rows,
                    actual: values.len(),
                });
            }
            states.push(column.name);
            numeric.push(values);
        }

        let values = Array2::from_shape_fn((n_rows, numeric.len()), |(i, j)| numeric[j][i]);
        let table = StateTable::new(states, values)?;
        match ids {
            Some(ids) => table.with_sub_units(ids),
            None => Ok(table),
        }
    }

    /// Attach sub-unit identifiers, one per row.
    ///
    /// # Errors
    /// - `RaggedColumn` if the number of identifiers differs from the
    ///   number of rows.
    pub fn with_sub_units(mut self, ids: Vec<String>) -> DecompositionResult<Self> {
        if ids.len() != self.values.nrows() {
            return Err(DecompositionError::RaggedColumn {
                name: "sub-unit identifiers".to_string(),
                expected: self.values.nrows(),
                actual: ids.len(),
            });
        }
        self.sub_units = Some(ids);
        Ok(self)
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn sub_units(&self) -> Option<&[String]> {
        self.sub_units.as_deref()
    }

    pub fn n_states(&self) -> usize {
        self.values.ncols()
    }

    pub fn n_sub_units(&self) -> usize {
        self.values.nrows()
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Label of the base (first) state.
    pub fn base_state(&self) -> &str {
        &self.states[0]
    }

    /// Position of `label` in the state ordering.
    pub fn state_index(&self, label: &str) -> Option<usize> {
        self.states.iter().position(|s| s == label)
    }

    /// Sub-unit series of the state at `index`.
    ///
    /// # Panics
    /// - If `index >= self.n_states()`.
    pub fn series(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.column(index)
    }

    /// Sub-unit series of the state labelled `label`.
    ///
    /// # Errors
    /// - `UnknownState { label }` if no state carries that label.
    pub fn series_for(&self, label: &str) -> DecompositionResult<ArrayView1<'_, f64>> {
        self.state_index(label)
            .map(|index| self.series(index))
            .ok_or_else(|| DecompositionError::UnknownState { label: label.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `StateTable::new` on valid data and each of its error branches.
    // - `StateTable::from_columns` identifier stripping, numeric identifier
    //   rendering, non-numeric and ragged column rejection.
    // - Series lookup by index and label.
    // -------------------------------------------------------------------------

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    // Purpose
    // -------
    // Verify that a well-formed matrix is accepted and exposes its columns
    // as per-state series.
    //
    // Given
    // -----
    // - Two sub-units over three states.
    //
    // Expect
    // ------
    // - Shape accessors match; `series(1)` is the second column.
    fn new_valid_table_exposes_state_series() {
        // Arrange
        let values = array![[1.0, 1.2, 1.3], [3.0, 3.3, 2.9]];

        // Act
        let table = StateTable::new(labels(&["a", "b", "c"]), values).unwrap();

        // Assert
        assert_eq!(table.n_states(), 3);
        assert_eq!(table.n_sub_units(), 2);
        assert_eq!(table.base_state(), "a");
        assert_eq!(table.series(1).to_vec(), vec![1.2, 3.3]);
        assert_eq!(table.series_for("c").unwrap().to_vec(), vec![1.3, 2.9]);
        assert!(table.sub_units().is_none());
    }

    #[test]
    fn new_label_count_mismatch_returns_error() {
        let result = StateTable::new(labels(&["a"]), array![[1.0, 2.0]]);
        assert_eq!(result, Err(DecompositionError::LabelCountMismatch { labels: 1, columns: 2 }));
    }

    #[test]
    fn new_empty_table_returns_error() {
        let result = StateTable::new(Vec::new(), Array2::<f64>::zeros((2, 0)));
        assert_eq!(result, Err(DecompositionError::EmptyTable));
        let result = StateTable::new(labels(&["a"]), Array2::<f64>::zeros((0, 1)));
        assert_eq!(result, Err(DecompositionError::EmptyTable));
    }

    #[test]
    fn new_duplicate_state_returns_error() {
        let result = StateTable::new(labels(&["a", "a"]), array![[1.0, 2.0]]);
        assert_eq!(result, Err(DecompositionError::DuplicateState { label: "a".to_string() }));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-finite entry is reported with its column and row.
    //
    // Given
    // -----
    // - +∞ at row 1 of column "b".
    //
    // Expect
    // ------
    // - `NonFiniteData { column: "b", index: 1, value: +∞ }`.
    fn new_non_finite_value_returns_error() {
        let result = StateTable::new(labels(&["a", "b"]), array![[1.0, 2.0], [3.0, f64::INFINITY]]);
        assert_eq!(
            result,
            Err(DecompositionError::NonFiniteData {
                column: "b".to_string(),
                index: 1,
                value: f64::INFINITY
            })
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that the identifier column is stripped and kept as sub-unit
    // identifiers, leaving the remaining columns as states in order.
    //
    // Given
    // -----
    // - Columns sector (labels), _2018, _2019 with id_column = "sector".
    //
    // Expect
    // ------
    // - States ["_2018", "_2019"], sub-units ["A", "B"], values in place.
    fn from_columns_strips_identifier_column() {
        // Arrange
        let columns = vec![
            Column::labels("sector", vec!["A", "B"]),
            Column::numeric("_2018", vec![1.0, 3.0]),
            Column::numeric("_2019", vec![1.2, 3.3]),
        ];

        // Act
        let table = StateTable::from_columns(columns, Some("sector")).unwrap();

        // Assert
        assert_eq!(table.states(), &labels(&["_2018", "_2019"])[..]);
        assert_eq!(table.sub_units(), Some(&labels(&["A", "B"])[..]));
        assert_eq!(table.values(), array![[1.0, 1.2], [3.0, 3.3]]);
    }

    #[test]
    fn from_columns_numeric_identifier_is_rendered_as_text() {
        let columns = vec![
            Column::numeric("code", vec![10.0, 20.0]),
            Column::numeric("_2018", vec![1.0, 3.0]),
        ];
        let table = StateTable::from_columns(columns, Some("code")).unwrap();
        assert_eq!(table.sub_units(), Some(&labels(&["10", "20"])[..]));
        assert_eq!(table.n_states(), 1);
    }

    #[test]
    fn from_columns_missing_identifier_returns_error() {
        let columns = vec![Column::numeric("_2018", vec![1.0, 3.0])];
        let result = StateTable::from_columns(columns, Some("sector"));
        assert_eq!(result, Err(DecompositionError::MissingIdColumn { name: "sector".to_string() }));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a label column left in place (no id_column given) is rejected
    // as non-numeric input.
    //
    // Given
    // -----
    // - Columns sector (labels) and _2018, with id_column = None.
    //
    // Expect
    // ------
    // - `NonNumericColumn { name: "sector" }`.
    fn from_columns_label_column_without_id_returns_non_numeric() {
        let columns =
            vec![Column::labels("sector", vec!["A", "B"]), Column::numeric("_2018", vec![1.0, 3.0])];
        let result = StateTable::from_columns(columns, None);
        assert_eq!(result, Err(DecompositionError::NonNumericColumn { name: "sector".to_string() }));
    }

    #[test]
    fn from_columns_ragged_column_returns_error() {
        let columns = vec![
            Column::numeric("_2018", vec![1.0, 3.0]),
            Column::numeric("_2019", vec![1.2]),
        ];
        let result = StateTable::from_columns(columns, None);
        assert_eq!(
            result,
            Err(DecompositionError::RaggedColumn {
                name: "_2019".to_string(),
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn series_for_unknown_label_returns_error() {
        let table = StateTable::new(labels(&["a"]), array![[1.0]]).unwrap();
        assert_eq!(
            table.series_for("z").map(|s| s.to_vec()),
            Err(DecompositionError::UnknownState { label: "z".to_string() })
        );
    }
}
