//! decomposition::lmdi — Log-Mean Divisia Index effect computation.
//!
//! Purpose
//! -------
//! Implement the multiplicative LMDI decomposition of Ang & Zhang (2000,
//! Energy 25, 1149–1176) for one comparison: given size and indicator
//! series for a target state and a base state, attribute the change in the
//! aggregate indicator to a scale, a technology (intensity), and a
//! composition (structure) effect.
//!
//! Key behaviors
//! -------------
//! - Compute per-sub-unit intensities Iᵢ/Qᵢ, structural shares Qᵢ/ΣQ, and
//!   indicator shares ωᵢ = Iᵢ/ΣI for both states.
//! - Weight sub-units by the normalized logarithmic mean of their indicator
//!   shares, Wᵢ = L(ωᵢᵀ, ωᵢ⁰) / Σⱼ L(ωⱼᵀ, ωⱼ⁰).
//! - Aggregate each driver as a weighted geometric mean,
//!   D = exp(Σᵢ Wᵢ · ln rᵢ), and report total = scale · technology ·
//!   composition in an [`EffectFactors`] value.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs pass `validate_series`: equal non-zero lengths, finite values,
//!   sizes > 0, indicators ≥ 0.
//! - A state whose indicator total is zero has all shares ωᵢ = 0.
//! - If Σ L(ωᵢᵀ, ωᵢ⁰) == 0 the weights are undefined and every effect is
//!   defined as 0 ([`EffectFactors::DEGENERATE`]). This is a fallback, not a
//!   decomposition; the values are not meaningful as change factors.
//! - Sub-units with weight exactly 0 (zero indicator in both states) drop
//!   out of the log sums; their 0/0 intensity ratio is never evaluated.
//! - For strictly positive data the decomposition is exact:
//!   total = ΣIᵀ / ΣI⁰ up to rounding.
//!
//! Conventions
//! -----------
//! - "Target" is the state being compared, "base" the reference state.
//! - The log-mean is evaluated as L(target, base); the order does not
//!   matter numerically since L is symmetric.
//! - Zero ratios inside the log sums are replaced by a configurable floor
//!   (see `numerics::ZERO_LOG_FLOOR`).
//!
//! Testing notes
//! -------------
//! - Unit tests cover the unity identity (base vs itself), pure scale,
//!   pure intensity and pure structure scenarios, the exactness property,
//!   the degenerate fallback, zero-in-both-states sub-units, and domain
//!   errors for a zero share in one state only.
//! - Randomized identity / exactness checks live in
//!   `tests/lmdi_properties.rs`.
use crate::decomposition::{
    errors::DecompositionResult,
    numerics::{log_mean, modified_log},
    validation::validate_series,
};
use ndarray::{Array1, ArrayView1, Zip};
use serde::Serialize;

/// EffectFactors — multiplicative effects of one LMDI comparison.
///
/// Purpose
/// -------
/// Hold the four change factors of a target state relative to the base
/// state. A factor of 1.0 means "no change attributable to this driver".
///
/// Fields
/// ------
/// - `total`: `f64`
///   Product `scale · technology · composition`.
/// - `scale`: `f64`
///   Effect of overall size growth.
/// - `technology`: `f64`
///   Effect of changing indicator-per-size intensities.
/// - `composition`: `f64`
///   Effect of shifting size shares among sub-units.
///
/// Invariants
/// ----------
/// - `total == scale * technology * composition` as computed in `f64`.
/// - All four are 1.0 exactly when a state is compared with itself.
/// - All four are 0.0 exactly in the degenerate fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectFactors {
    total: f64,
    scale: f64,
    technology: f64,
    composition: f64,
}

impl EffectFactors {
    /// Effects of a state compared with itself.
    pub const UNITY: EffectFactors =
        EffectFactors { total: 1.0, scale: 1.0, technology: 1.0, composition: 1.0 };

    /// Fallback when the log-mean weights sum to zero.
    pub const DEGENERATE: EffectFactors =
        EffectFactors { total: 0.0, scale: 0.0, technology: 0.0, composition: 0.0 };

    /// Combine the three driver effects; `total` is their product.
    pub fn from_drivers(scale: f64, technology: f64, composition: f64) -> Self {
        EffectFactors { total: scale * technology * composition, scale, technology, composition }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn technology(&self) -> f64 {
        self.technology
    }

    pub fn composition(&self) -> f64 {
        self.composition
    }

    /// True for the zero-weight fallback.
    pub fn is_degenerate(&self) -> bool {
        *self == Self::DEGENERATE
    }
}

/// Compute LMDI effects of a target state against a base state.
///
/// Parameters
/// ----------
/// - `size`: `ArrayView1<f64>`
///   Size (activity) per sub-unit in the target state. Values > 0.
/// - `size_base`: `ArrayView1<f64>`
///   Size per sub-unit in the base state. Values > 0.
/// - `indicator`: `ArrayView1<f64>`
///   Indicator per sub-unit in the target state. Values ≥ 0.
/// - `indicator_base`: `ArrayView1<f64>`
///   Indicator per sub-unit in the base state. Values ≥ 0.
/// - `zero_log_floor`: `f64`
///   Argument substituted for a zero ratio in the log sums.
///
/// All four series are indexed by sub-unit in the same order.
///
/// Returns
/// -------
/// `DecompositionResult<EffectFactors>`
///   - `Ok(EffectFactors)` with
///     scale = exp(Σ Wᵢ ln(ΣQᵀ/ΣQ⁰)),
///     technology = exp(Σ Wᵢ ln(intensity changeᵢ)),
///     composition = exp(Σ Wᵢ ln(share changeᵢ)),
///     total = scale · technology · composition.
///   - `Ok(EffectFactors::DEGENERATE)` when Σ L(ωᵢᵀ, ωᵢ⁰) == 0.
///
/// Errors
/// ------
/// - Precondition errors from `validate_series` (`EmptySeries`,
///   `SeriesLengthMismatch`, `NonFiniteData`, `NonPositiveSize`,
///   `NegativeIndicator`).
/// - `SubUnitFailed { index, source: LogMeanUndefined { x, y } }` when
///   sub-unit `index` has a zero indicator share in exactly one of the two
///   states. The LMDI method does not apply to such data.
/// - `SubUnitFailed { index, source: NegativeLogArgument { value } }` if a
///   ratio in the log sums is negative; unreachable for validated inputs.
///
/// Panics
/// ------
/// - Never panics.
///
/// Notes
/// -----
/// - The scale term is the same for every sub-unit; it is still summed with
///   the per-sub-unit weights, so scale = (ΣQᵀ/ΣQ⁰)^(ΣWᵢ).
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use index_decomposition::decomposition::lmdi::lmdi_effects;
/// # use index_decomposition::decomposition::numerics::ZERO_LOG_FLOOR;
/// let size_base = array![1.0, 3.0];
/// let size = array![1.2, 3.6];
/// let indicator_base = array![2.0, 6.0];
/// let indicator = array![2.4, 7.2];
///
/// let effects = lmdi_effects(
///     size.view(), size_base.view(), indicator.view(), indicator_base.view(), ZERO_LOG_FLOOR,
/// )
/// .unwrap();
///
/// assert!((effects.scale() - 1.2).abs() < 1e-12);
/// assert!((effects.technology() - 1.0).abs() < 1e-12);
/// assert!((effects.composition() - 1.0).abs() < 1e-12);
/// ```
pub fn lmdi_effects(
    size: ArrayView1<f64>, size_base: ArrayView1<f64>, indicator: ArrayView1<f64>,
    indicator_base: ArrayView1<f64>, zero_log_floor: f64,
) -> DecompositionResult<EffectFactors> {
    validate_series(size, size_base, indicator, indicator_base)?;

    let omega = calc_shares(indicator);
    let omega_base = calc_shares(indicator_base);
    let log_means = calc_log_mean_weights(omega.view(), omega_base.view())?;
    let sum_log_means: f64 = log_means.sum();

    if sum_log_means == 0.0 {
        return Ok(EffectFactors::DEGENERATE);
    }
    let weights = log_means / sum_log_means;

    let size_total: f64 = size.sum();
    let size_base_total: f64 = size_base.sum();
    let size_ratio = Array1::from_elem(size.len(), size_total / size_base_total);

    let intensity_change = calc_change(
        calc_ratio(indicator, size).view(),
        calc_ratio(indicator_base, size_base).view(),
    );
    let struct_change = calc_change(calc_shares(size).view(), calc_shares(size_base).view());

    let scale = calc_weighted_log_sum(weights.view(), size_ratio.view(), zero_log_floor)?.exp();
    let technology =
        calc_weighted_log_sum(weights.view(), intensity_change.view(), zero_log_floor)?.exp();
    let composition =
        calc_weighted_log_sum(weights.view(), struct_change.view(), zero_log_floor)?.exp();

    Ok(EffectFactors::from_drivers(scale, technology, composition))
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Shares xᵢ / Σx; all zeros when Σx == 0.
#[inline]
fn calc_shares(values: ArrayView1<f64>) -> Array1<f64> {
    let total: f64 = values.sum();
    if total == 0.0 { Array1::zeros(values.len()) } else { values.mapv(|v| v / total) }
}

/// Element-wise ratio numeratorᵢ / denominatorᵢ.
#[inline]
fn calc_ratio(numerator: ArrayView1<f64>, denominator: ArrayView1<f64>) -> Array1<f64> {
    Zip::from(&numerator).and(&denominator).map_collect(|&n, &d| n / d)
}

/// Element-wise change targetᵢ / baseᵢ. May contain NaN where both are 0;
/// such entries carry zero weight and are skipped downstream.
#[inline]
fn calc_change(target: ArrayView1<f64>, base: ArrayView1<f64>) -> Array1<f64> {
    calc_ratio(target, base)
}

/// Log-mean weights L(ωᵢᵀ, ωᵢ⁰), failing on the first undefined pair.
#[inline]
fn calc_log_mean_weights(
    omega: ArrayView1<f64>, omega_base: ArrayView1<f64>,
) -> DecompositionResult<Array1<f64>> {
    omega
        .iter()
        .zip(omega_base.iter())
        .enumerate()
        .map(|(index, (&x, &y))| log_mean(x, y).map_err(|err| err.in_sub_unit(index)))
        .collect()
}

/// Σᵢ Wᵢ · modified_log(rᵢ), skipping sub-units with Wᵢ == 0.
#[inline]
fn calc_weighted_log_sum(
    weights: ArrayView1<f64>, ratios: ArrayView1<f64>, zero_log_floor: f64,
) -> DecompositionResult<f64> {
    let mut sum = 0.0;
    for (index, (&w, &r)) in weights.iter().zip(ratios.iter()).enumerate() {
        if w == 0.0 {
            continue;
        }
        sum += w * modified_log(r, zero_log_floor).map_err(|err| err.in_sub_unit(index))?;
    }
    Ok(sum)
}
