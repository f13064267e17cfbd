//! Decomposition results — one row of effects per state.
//!
//! The output table mirrors the input state ordering: row `k` holds the
//! effects of state `k` relative to the base state (row 0, always unity).
//! Rows serialize with the column names `state`, `total_effect`,
//! `scale_effect`, `technology_effect`, and `composition_effect`.
use crate::decomposition::lmdi::EffectFactors;
use ndarray::Array2;
use serde::Serialize;

/// Column names of the output table, in [`DecompositionTable::to_array`]
/// order (after the `state` label column).
pub const EFFECT_COLUMNS: [&str; 4] =
    ["total_effect", "scale_effect", "technology_effect", "composition_effect"];

/// Effects of one state relative to the base state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectRow {
    pub state: String,
    pub total_effect: f64,
    pub scale_effect: f64,
    pub technology_effect: f64,
    pub composition_effect: f64,
}

impl EffectRow {
    pub fn new(state: impl Into<String>, effects: EffectFactors) -> Self {
        EffectRow {
            state: state.into(),
            total_effect: effects.total(),
            scale_effect: effects.scale(),
            technology_effect: effects.technology(),
            composition_effect: effects.composition(),
        }
    }

    pub fn effects(&self) -> EffectFactors {
        EffectFactors::from_drivers(
            self.scale_effect,
            self.technology_effect,
            self.composition_effect,
        )
    }
}

/// Output table of a decomposition, one [`EffectRow`] per input state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecompositionTable {
    rows: Vec<EffectRow>,
}

impl DecompositionTable {
    pub fn new(rows: Vec<EffectRow>) -> Self {
        DecompositionTable { rows }
    }

    pub fn rows(&self) -> &[EffectRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EffectRow> {
        self.rows.iter()
    }

    /// State labels in row order.
    pub fn states(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.state.as_str()).collect()
    }

    /// Row for `state`, if present.
    pub fn get(&self, state: &str) -> Option<&EffectRow> {
        self.rows.iter().find(|r| r.state == state)
    }

    /// `n_states × 4` matrix with columns ordered as [`EFFECT_COLUMNS`].
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.rows.len(), EFFECT_COLUMNS.len()), |(i, j)| {
            let row = &self.rows[i];
            match j {
                0 => row.total_effect,
                1 => row.scale_effect,
                2 => row.technology_effect,
                _ => row.composition_effect,
            }
        })
    }
}

impl<'a> IntoIterator for &'a DecompositionTable {
    type Item = &'a EffectRow;
    type IntoIter = std::slice::Iter<'a, EffectRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
