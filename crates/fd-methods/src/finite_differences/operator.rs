//! Three-point explicit stencil.

use fd_core::Real;
use fd_models::BlackScholesModel;

/// A tridiagonal operator holding the explicit update weights.
///
/// Row `i` maps `(V[i−1], V[i], V[i+1])` at one time layer to `V[i]` at the
/// previous one. Rows `0` and `n − 1` are unused: edge nodes are set from
/// the contract's boundary conditions.
#[derive(Debug, Clone)]
pub struct TridiagonalOperator {
    /// Lower diagonal `A` (weight on `V[i−1]`).
    pub lower: Vec<Real>,
    /// Main diagonal `B` (weight on `V[i]`).
    pub diag: Vec<Real>,
    /// Upper diagonal `C` (weight on `V[i+1]`).
    pub upper: Vec<Real>,
}

impl TridiagonalOperator {
    /// Create a zero tridiagonal operator of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            lower: vec![0.0; n],
            diag: vec![0.0; n],
            upper: vec![0.0; n],
        }
    }

    /// Forward-Euler / central-difference weights for the Black-Scholes
    /// equation on the uniform price nodes `prices` with steps `dt`, `ds`.
    ///
    /// With `D = σ²S²` and `M = (r−q)S`:
    ///
    /// * `A = ½·dt·(D/dS² − M/dS)`
    /// * `B = 1 − dt·(D/dS² + r)`
    /// * `C = ½·dt·(D/dS² + M/dS)`
    ///
    /// The coefficients are time-independent, so the operator is built once
    /// per solve.
    pub fn explicit_black_scholes(
        prices: &[Real],
        model: &BlackScholesModel,
        dt: Real,
        ds: Real,
    ) -> Self {
        let n = prices.len();
        let mut op = Self::new(n);
        let sigma2 = model.sigma() * model.sigma();
        let carry = model.r() - model.q();
        let ds2 = ds * ds;

        for i in 1..n.saturating_sub(1) {
            let s = prices[i];
            let diffusion = sigma2 * s * s / ds2;
            let drift = carry * s / ds;
            op.lower[i] = 0.5 * dt * (diffusion - drift);
            op.diag[i] = 1.0 - dt * (diffusion + model.r());
            op.upper[i] = 0.5 * dt * (diffusion + drift);
        }
        op
    }

    /// Size (number of rows/columns).
    pub fn size(&self) -> usize {
        self.diag.len()
    }

    /// Apply the interior rows: `y[i] = A[i]·x[i−1] + B[i]·x[i] + C[i]·x[i+1]`
    /// for `i ∈ [1, n−2]`. `y[0]` and `y[n−1]` are left untouched.
    pub fn apply_interior(&self, x: &[Real], y: &mut [Real]) {
        let n = self.size();
        debug_assert_eq!(x.len(), n);
        debug_assert_eq!(y.len(), n);
        for i in 1..n.saturating_sub(1) {
            y[i] = self.lower[i] * x[i - 1] + self.diag[i] * x[i] + self.upper[i] * x[i + 1];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn apply_interior_leaves_edges() {
        let mut op = TridiagonalOperator::new(4);
        op.lower = vec![0.0, 1.0, 1.0, 0.0];
        op.diag = vec![0.0, -2.0, -2.0, 0.0];
        op.upper = vec![0.0, 1.0, 1.0, 0.0];
        let x = [1.0, 4.0, 9.0, 16.0];
        let mut y = [7.0, 0.0, 0.0, 8.0];
        op.apply_interior(&x, &mut y);
        assert_eq!(y, [7.0, 2.0, 2.0, 8.0]);
    }

    #[test]
    fn explicit_weights_sum_to_one_minus_r_dt() {
        let model = BlackScholesModel::new(0.05, 0.2, 0.02).unwrap();
        let prices: Vec<Real> = (0..=10).map(|i| i as Real * 10.0).collect();
        let dt = 1e-3;
        let op = TridiagonalOperator::explicit_black_scholes(&prices, &model, dt, 10.0);
        for i in 1..10 {
            let sum = op.lower[i] + op.diag[i] + op.upper[i];
            assert_abs_diff_eq!(sum, 1.0 - 0.05 * dt, epsilon = 1e-14);
        }
        // Edge rows stay empty.
        assert_eq!(op.diag[0], 0.0);
        assert_eq!(op.diag[10], 0.0);
    }

    #[test]
    fn explicit_weights_preserve_linear_functions() {
        // For V = S the stencil gives S·(1 − q·dt).
        let model = BlackScholesModel::new(0.05, 0.3, 0.02).unwrap();
        let prices: Vec<Real> = (0..=20).map(|i| i as Real * 5.0).collect();
        let dt = 1e-3;
        let op = TridiagonalOperator::explicit_black_scholes(&prices, &model, dt, 5.0);
        let mut y = vec![0.0; prices.len()];
        op.apply_interior(&prices, &mut y);
        for i in 1..20 {
            assert_abs_diff_eq!(y[i], prices[i] * (1.0 - 0.02 * dt), epsilon = 1e-10);
        }
    }
}
