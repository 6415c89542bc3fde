//! Explicit finite-difference solver for the Black-Scholes PDE.
//!
//! Starting from the terminal payoff, each earlier time layer is computed
//! directly from the later one with the three-point stencil of
//! [`TridiagonalOperator::explicit_black_scholes`]. At every layer the edge
//! nodes are overwritten with the contract's boundary values and, for
//! early-exercisable contracts, interior nodes are projected onto the
//! exercise value (`V ← max(V, exercise)`).
//!
//! The scheme is only conditionally stable. The solver does not check the
//! time step against the stability bound: a grid that violates it produces
//! oscillating or divergent values, not an error. Use
//! [`GridSizer`](crate::finite_differences::GridSizer) to build grids that
//! respect it.
//!
//! Delta and gamma are central differences on the solved `t = 0` curve
//! rather than bump-and-reprice, so their accuracy is tied to `dS`.

use crate::finite_differences::grid::Grid;
use crate::finite_differences::operator::TridiagonalOperator;
use fd_core::{ensure, ensure_consistent, errors::Result, Price, Real};
use fd_instruments::FdContract;
use fd_models::BlackScholesModel;
use tracing::{debug, trace};

/// Default spot-clamping margin, relative to `dS`.
const DEFAULT_SPOT_EPSILON: Real = 1e-10;

/// Output of one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct FdSolution {
    /// Contract value at `t = 0` on every price node (`Ns + 1` entries).
    pub values: Vec<Real>,
    /// Value at spot, linearly interpolated.
    pub price: Price,
    /// `∂V/∂S` at spot.
    pub delta: Real,
    /// `∂²V/∂S²` at spot.
    pub gamma: Real,
}

/// Forward-Euler in time, central differences in price.
///
/// Holds no working state: each call to [`price`](Self::price) allocates its
/// own pair of value buffers, so one solver may serve concurrent solves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplicitFdSolver {
    spot_epsilon: Real,
}

impl Default for ExplicitFdSolver {
    fn default() -> Self {
        Self {
            spot_epsilon: DEFAULT_SPOT_EPSILON,
        }
    }
}

impl ExplicitFdSolver {
    /// Create a solver with the default spot-clamping margin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the margin (as a fraction of `dS`) keeping spot strictly inside
    /// the price domain.
    pub fn with_spot_epsilon(mut self, spot_epsilon: Real) -> Self {
        self.spot_epsilon = spot_epsilon;
        self
    }

    /// Value `contract` under `model` on `grid` and read off price, delta and
    /// gamma at `spot`.
    ///
    /// `spot` is clamped strictly inside `(S_min, S_max)` first.
    ///
    /// # Errors
    /// * `InvalidArgument` if `Ns < 2`, `Nt < 1`, `dS ≤ 0`, `dt ≤ 0`,
    ///   `spot` is not finite, or the spot margin is outside `[0, 0.5)`.
    /// * `InternalConsistency` if the grid horizon differs from the
    ///   contract maturity, or if the grid's point sequences disagree with
    ///   its step counts. [`Grid::new`] always builds matching sequences, so
    ///   the latter is unreachable through the public API and kept as a
    ///   guard on the indexing below.
    pub fn price<C: FdContract + ?Sized>(
        &self,
        contract: &C,
        model: &BlackScholesModel,
        grid: &Grid,
        spot: Real,
    ) -> Result<FdSolution> {
        let ns = grid.ns();
        let nt = grid.nt();
        let ds = grid.ds();
        let dt = grid.dt();

        ensure!(ns >= 2, "Ns must be at least 2, got {ns}");
        ensure!(nt >= 1, "Nt must be at least 1, got {nt}");
        ensure!(ds > 0.0, "dS must be positive, got {ds}");
        ensure!(dt > 0.0, "dt must be positive, got {dt}");
        ensure!(spot.is_finite(), "spot must be finite, got {spot}");
        ensure!(
            self.spot_epsilon >= 0.0 && self.spot_epsilon < 0.5,
            "spot epsilon must lie in [0, 0.5), got {}",
            self.spot_epsilon
        );

        let maturity = contract.maturity();
        ensure_consistent!(
            (grid.maturity() - maturity).abs() <= 1e-12 * maturity.abs().max(1.0),
            "grid horizon {} does not match contract maturity {maturity}",
            grid.maturity()
        );

        let s = grid.prices();
        let t = grid.times();
        ensure_consistent!(
            s.len() == ns + 1,
            "price grid has {} points, expected Ns + 1 = {}",
            s.len(),
            ns + 1
        );
        ensure_consistent!(
            t.len() == nt + 1,
            "time grid has {} points, expected Nt + 1 = {}",
            t.len(),
            nt + 1
        );

        let early_exercise = contract.is_early_exercisable();
        debug!(nt, ns, dt, ds, early_exercise, "explicit FD solve");

        let op = TridiagonalOperator::explicit_black_scholes(s, model, dt, ds);
        let exercise: Option<Vec<Real>> =
            early_exercise.then(|| s.iter().map(|&x| contract.early_exercise_value(x)).collect());

        // Terminal condition
        let mut values: Vec<Real> = s.iter().map(|&x| contract.payoff(x)).collect();
        let mut next_values = vec![0.0; ns + 1];
        let (s_min, s_max) = (s[0], s[ns]);

        for n in (0..nt).rev() {
            next_values[0] = contract.left_boundary(t[n], s_min);
            next_values[ns] = contract.right_boundary(t[n], s_max);

            op.apply_interior(&values, &mut next_values);

            if let Some(exercise) = &exercise {
                for (v, &e) in next_values[1..ns].iter_mut().zip(&exercise[1..ns]) {
                    *v = v.max(e);
                }
            }

            std::mem::swap(&mut values, &mut next_values);
        }

        let eps = self.spot_epsilon * ds;
        let s0 = spot.clamp(s[0] + eps, s[ns] - eps);
        if s0 != spot {
            trace!(spot, clamped = s0, "spot clamped into price domain");
        }

        let price = grid.interpolate(&values, s0)?;

        let i = grid.locate(s0).clamp(1, ns - 1);
        let delta = (values[i + 1] - values[i - 1]) / (2.0 * ds);
        let gamma = (values[i + 1] - 2.0 * values[i] + values[i - 1]) / (ds * ds);

        debug!(price, delta, gamma, "explicit FD solve finished");

        Ok(FdSolution {
            values,
            price,
            delta,
            gamma,
        })
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
