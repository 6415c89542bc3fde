//! Behavioural tests for the explicit finite-difference solver.

use std::sync::Arc;

use fd_instruments::{Contract, FdContract};
use fd_methods::{
    stable_time_steps, ExplicitFdSolver, Grid, GridQuality, GridSizer, DEFAULT_SAFETY_FACTOR,
};
use fd_models::BlackScholesModel;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

fn model() -> Arc<BlackScholesModel> {
    Arc::new(BlackScholesModel::new(0.05, 0.20, 0.02).unwrap())
}

/// Grid on `[0, 200]` with `ns` steps and the largest stable `nt`.
fn stable_grid(model: &BlackScholesModel, ns: usize) -> Grid {
    let ds = 200.0 / ns as f64;
    let nt = stable_time_steps(1.0, model, 200.0, ds, DEFAULT_SAFETY_FACTOR).unwrap();
    Grid::new(1.0, 0.0, 200.0, nt, ns).unwrap()
}

// ─── Convergence ──────────────────────────────────────────────────────────────

#[test]
fn refinement_shrinks_successive_differences() {
    init_tracing();
    let m = model();
    let call = Contract::european_call(100.0, 1.0, m.clone()).unwrap();
    let solver = ExplicitFdSolver::new();

    let prices: Vec<f64> = [100, 200, 400]
        .iter()
        .map(|&ns| solver.price(&call, &m, &stable_grid(&m, ns), 100.0).unwrap().price)
        .collect();

    let d1 = (prices[1] - prices[0]).abs();
    let d2 = (prices[2] - prices[1]).abs();
    assert!(d1 < 0.1, "coarse refinement moved the price by {d1}");
    assert!(d2 < d1, "refinement did not converge: {d1} then {d2}");
}

#[test]
fn quality_tiers_agree() {
    let m = model();
    let put = Contract::european_put(100.0, 1.0, m.clone()).unwrap();
    let solver = ExplicitFdSolver::new();

    let coarse = GridSizer::with_quality(GridQuality::Coarse)
        .make_grid(&put, &m, 100.0)
        .unwrap();
    let balanced = GridSizer::with_quality(GridQuality::Balanced)
        .make_grid(&put, &m, 100.0)
        .unwrap();

    let p0 = solver.price(&put, &m, &coarse, 100.0).unwrap().price;
    let p1 = solver.price(&put, &m, &balanced, 100.0).unwrap().price;
    assert!((p0 - p1).abs() < 2e-2, "coarse {p0} vs balanced {p1}");
}

// ─── Unchecked numerical hazard ───────────────────────────────────────────────

#[test]
fn stability_violation_is_not_reported_but_diverges() {
    let m = model();
    let call = Contract::european_call(100.0, 1.0, m.clone()).unwrap();
    let solver = ExplicitFdSolver::new();

    let stable = solver.price(&call, &m, &stable_grid(&m, 100), 100.0).unwrap();
    // 20 steps where roughly 500 are needed.
    let unstable_grid = Grid::new(1.0, 0.0, 200.0, 20, 100).unwrap();
    let unstable = solver.price(&call, &m, &unstable_grid, 100.0).unwrap();

    assert!(
        !unstable.price.is_finite() || (unstable.price - stable.price).abs() > 1.0,
        "unstable grid gave {} vs stable {}",
        unstable.price,
        stable.price
    );
}

// ─── Early exercise ───────────────────────────────────────────────────────────

#[test]
fn american_put_dominates_european_on_every_node() {
    let m = model();
    let grid = stable_grid(&m, 200);
    let solver = ExplicitFdSolver::new();
    let euro = Contract::european_put(100.0, 1.0, m.clone()).unwrap();
    let amer = Contract::american_put(100.0, 1.0, m.clone()).unwrap();

    let e = solver.price(&euro, &m, &grid, 100.0).unwrap();
    let a = solver.price(&amer, &m, &grid, 100.0).unwrap();
    for (ve, va) in e.values.iter().zip(&a.values) {
        assert!(va + 1e-10 >= *ve);
    }
    // Deep in the money the American put is worth exactly its intrinsic value.
    let deep = grid.locate(40.0);
    assert!((a.values[deep] - amer.early_exercise_value(grid.prices()[deep])).abs() < 1e-12);
}

#[test]
fn american_call_without_dividends_matches_european() {
    let m = Arc::new(BlackScholesModel::without_dividends(0.05, 0.25).unwrap());
    let grid = stable_grid(&m, 200);
    let solver = ExplicitFdSolver::new();
    let euro = Contract::european_call(100.0, 1.0, m.clone()).unwrap();
    let amer = Contract::american_call(100.0, 1.0, m.clone()).unwrap();

    let e = solver.price(&euro, &m, &grid, 100.0).unwrap();
    let a = solver.price(&amer, &m, &grid, 100.0).unwrap();
    assert!((a.price - e.price).abs() < 1e-6, "{} vs {}", a.price, e.price);
}

// ─── Shared read-only inputs ──────────────────────────────────────────────────

#[test]
fn concurrent_solves_share_grid_model_and_contracts() {
    let m = model();
    let grid = stable_grid(&m, 100);
    let solver = ExplicitFdSolver::new();
    let contracts = vec![
        Contract::european_call(100.0, 1.0, m.clone()).unwrap(),
        Contract::european_put(100.0, 1.0, m.clone()).unwrap(),
        Contract::american_put(100.0, 1.0, m.clone()).unwrap(),
        Contract::straddle(100.0, 1.0, m.clone()).unwrap(),
    ];

    let sequential: Vec<f64> = contracts
        .iter()
        .map(|c| solver.price(c, &m, &grid, 100.0).unwrap().price)
        .collect();

    let parallel: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = contracts
            .iter()
            .map(|c| {
                let (grid, m) = (&grid, &m);
                scope.spawn(move || solver.price(c, m, grid, 100.0).unwrap().price)
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn solver_accepts_trait_objects() {
    let m = model();
    let grid = stable_grid(&m, 100);
    let contracts: Vec<Box<dyn FdContract>> = vec![
        Box::new(Contract::bull_call_spread(90.0, 110.0, 1.0, m.clone()).unwrap()),
        Box::new(Contract::bear_put_spread(90.0, 110.0, 1.0, m.clone()).unwrap()),
    ];
    for c in &contracts {
        let sol = ExplicitFdSolver::new().price(c.as_ref(), &m, &grid, 100.0).unwrap();
        assert!(sol.price > 0.0 && sol.price < 20.0);
    }
}
