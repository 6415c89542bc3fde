//! Property tests for the uniform grid and its interpolation.

use fd_methods::Grid;
use proptest::prelude::*;

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..60, 2usize..400, 0.0f64..100.0, 1.0f64..1000.0, 0.01f64..10.0).prop_map(
        |(nt, ns, s_min, width, maturity)| {
            Grid::new(maturity, s_min, s_min + width, nt, ns).expect("valid grid parameters")
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn price_axis_is_strictly_increasing(grid in grid_strategy()) {
        let s = grid.prices();
        prop_assert_eq!(s.len(), grid.ns() + 1);
        prop_assert!(s.windows(2).all(|w| w[1] > w[0]));
        prop_assert_eq!(s[0], grid.s_min());
        prop_assert_eq!(s[grid.ns()], grid.s_max());
    }

    #[test]
    fn time_axis_spans_horizon(grid in grid_strategy()) {
        let t = grid.times();
        prop_assert_eq!(t.len(), grid.nt() + 1);
        prop_assert_eq!(t[0], 0.0);
        prop_assert_eq!(t[grid.nt()], grid.maturity());
        prop_assert!(t.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn interpolation_reproduces_nodes(grid in grid_strategy(), idx in 0usize..400) {
        let i = idx.min(grid.ns());
        let values: Vec<f64> = grid.prices().iter().map(|s| (s * 0.37).sin()).collect();
        let v = grid.interpolate(&values, grid.prices()[i]).unwrap();
        prop_assert!((v - values[i]).abs() < 1e-9);
    }

    #[test]
    fn interpolation_stays_within_bracket(grid in grid_strategy(), frac in 0.0f64..1.0) {
        let values: Vec<f64> = grid.prices().iter().map(|s| (s * 0.37).cos()).collect();
        let s0 = grid.s_min() + frac * (grid.s_max() - grid.s_min());
        let v = grid.interpolate(&values, s0).unwrap();
        let i = grid.locate(s0);
        let lo = values[i].min(values[i + 1]);
        let hi = values[i].max(values[i + 1]);
        prop_assert!(v >= lo - 1e-12 && v <= hi + 1e-12);
    }

    #[test]
    fn interpolation_clamps_outside_domain(grid in grid_strategy(), offset in 1e-6f64..1e3) {
        let values: Vec<f64> = (0..=grid.ns()).map(|i| i as f64).collect();
        let below = grid.interpolate(&values, grid.s_min() - offset).unwrap();
        let above = grid.interpolate(&values, grid.s_max() + offset).unwrap();
        prop_assert_eq!(below, values[0]);
        prop_assert_eq!(above, values[grid.ns()]);
    }
}
