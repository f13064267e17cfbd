use index_decomposition::decomposition::{ZERO_LOG_FLOOR, lmdi_effects, log_mean};
use ndarray::Array1;
use proptest::prelude::*;

/// Positive values spread log-uniformly from subnormal to near `f64::MAX`.
fn any_magnitude() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-307.0f64..307.0).prop_map(|e| 10f64.powf(e)),
        (1u64..(1u64 << 52)).prop_map(f64::from_bits),
    ]
}

/// Four aligned, strictly positive series of 1–8 sub-units.
fn positive_series() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>)> {
    (1usize..8).prop_flat_map(|n| {
        (
            prop::collection::vec(0.01f64..1e3, n),
            prop::collection::vec(0.01f64..1e3, n),
            prop::collection::vec(0.01f64..1e3, n),
            prop::collection::vec(0.01f64..1e3, n),
        )
    })
}

proptest! {
    #[test]
    fn log_mean_is_symmetric(x in any_magnitude(), y in any_magnitude()) {
        let forward = log_mean(x, y).unwrap();
        let backward = log_mean(y, x).unwrap();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn log_mean_lies_between_arguments(x in any_magnitude(), y in any_magnitude()) {
        let l = log_mean(x, y).unwrap();
        let (lo, hi) = if x < y { (x, y) } else { (y, x) };
        let tol = 1e-9 * hi;
        prop_assert!(l >= lo - tol && l <= hi + tol, "L({}, {}) = {} outside bracket", x, y, l);
    }

    #[test]
    fn log_mean_rejects_non_positive_differing_arguments(x in -1e3f64..=0.0, y in 1e-3f64..1e3) {
        prop_assert!(log_mean(x, y).is_err());
        prop_assert!(log_mean(y, x).is_err());
    }

    #[test]
    fn effects_satisfy_identity_and_exactness((q, q0, i, i0) in positive_series()) {
        let (q, q0, i, i0) =
            (Array1::from(q), Array1::from(q0), Array1::from(i), Array1::from(i0));
        let effects =
            lmdi_effects(q.view(), q0.view(), i.view(), i0.view(), ZERO_LOG_FLOOR).unwrap();

        let product = effects.scale() * effects.technology() * effects.composition();
        prop_assert!((effects.total() - product).abs() <= 1e-9 * product.abs());

        let ratio = i.sum() / i0.sum();
        prop_assert!(
            (effects.total() - ratio).abs() <= 1e-8 * ratio,
            "total {} differs from indicator ratio {}", effects.total(), ratio
        );

        let size_ratio = q.sum() / q0.sum();
        prop_assert!((effects.scale() - size_ratio).abs() <= 1e-8 * size_ratio);
    }

    #[test]
    fn base_against_itself_is_unity((q, _q0, i, _i0) in positive_series()) {
        let (q, i) = (Array1::from(q), Array1::from(i));
        let effects = lmdi_effects(q.view(), q.view(), i.view(), i.view(), ZERO_LOG_FLOOR).unwrap();
        prop_assert_eq!(effects.total(), 1.0);
        prop_assert_eq!(effects.scale(), 1.0);
        prop_assert_eq!(effects.technology(), 1.0);
        prop_assert_eq!(effects.composition(), 1.0);
    }
}
