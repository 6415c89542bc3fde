//! Uniform time × price grid.

use fd_core::{ensure, ensure_consistent, errors::Result, Real, Size, Time};

/// Largest number of price steps a [`Grid`] accepts.
pub const MAX_PRICE_STEPS: Size = 1_000_000;

/// Largest number of time steps a [`Grid`] accepts.
pub const MAX_TIME_STEPS: Size = 10_000_000;

/// Discretisation of `[0, T] × [S_min, S_max]` into `Nt` time steps and
/// `Ns` price steps, both uniformly spaced.
///
/// Immutable after construction; one grid is built per pricing request and
/// may be shared read-only between concurrent solves.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    maturity: Time,
    s_min: Real,
    s_max: Real,
    nt: Size,
    ns: Size,
    dt: Time,
    ds: Real,
    times: Vec<Time>,
    prices: Vec<Real>,
}

impl Grid {
    /// Build a grid with `nt` time steps over `[0, maturity]` and `ns` price
    /// steps over `[s_min, s_max]`.
    ///
    /// # Errors
    /// `InvalidArgument` if `nt < 1`, `ns < 2`, either count exceeds
    /// [`MAX_TIME_STEPS`] / [`MAX_PRICE_STEPS`], `s_max ≤ s_min`, or the
    /// horizon is negative or not finite.
    pub fn new(maturity: Time, s_min: Real, s_max: Real, nt: Size, ns: Size) -> Result<Self> {
        ensure!(nt >= 1 && ns >= 2, "Nt > 0 and Ns > 1 required, got Nt = {nt}, Ns = {ns}");
        ensure!(
            nt <= MAX_TIME_STEPS && ns <= MAX_PRICE_STEPS,
            "grid too large: Nt = {nt} (max {MAX_TIME_STEPS}), Ns = {ns} (max {MAX_PRICE_STEPS})"
        );
        ensure!(
            maturity >= 0.0 && maturity.is_finite(),
            "grid horizon must be finite and non-negative, got {maturity}"
        );
        ensure!(
            s_min.is_finite() && s_max.is_finite() && s_max > s_min,
            "S_max must exceed S_min, got [{s_min}, {s_max}]"
        );

        let dt = maturity / nt as Real;
        let ds = (s_max - s_min) / ns as Real;

        let mut times: Vec<Time> = (0..=nt).map(|n| n as Real * dt).collect();
        times[nt] = maturity;
        let mut prices: Vec<Real> = (0..=ns).map(|i| s_min + i as Real * ds).collect();
        prices[ns] = s_max;

        Ok(Self {
            maturity,
            s_min,
            s_max,
            nt,
            ns,
            dt,
            ds,
            times,
            prices,
        })
    }

    /// Horizon `T`.
    pub fn maturity(&self) -> Time {
        self.maturity
    }

    /// Lower edge of the price domain.
    pub fn s_min(&self) -> Real {
        self.s_min
    }

    /// Upper edge of the price domain.
    pub fn s_max(&self) -> Real {
        self.s_max
    }

    /// Number of time steps.
    pub fn nt(&self) -> Size {
        self.nt
    }

    /// Number of price steps.
    pub fn ns(&self) -> Size {
        self.ns
    }

    /// Time step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Price step.
    pub fn ds(&self) -> Real {
        self.ds
    }

    /// The `Nt + 1` time points, ascending from 0 to `T`.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// The `Ns + 1` price points, ascending from `S_min` to `S_max`.
    pub fn prices(&self) -> &[Real] {
        &self.prices
    }

    /// Largest node index `i` with `S[i] ≤ s`, clamped to `[0, Ns − 1]` so
    /// that `i + 1` is always a valid node.
    pub fn locate(&self, s: Real) -> Size {
        self.prices
            .partition_point(|&x| x <= s)
            .saturating_sub(1)
            .min(self.ns - 1)
    }

    /// Linear interpolation of a per-node value array at price `s0`.
    ///
    /// Reproduces `values[i]` exactly at `s0 = S[i]`; returns the first or
    /// last value when `s0` lies outside `[S_min, S_max]` (no extrapolation).
    ///
    /// # Errors
    /// `InternalConsistency` if `values` does not hold one entry per node.
    pub fn interpolate(&self, values: &[Real], s0: Real) -> Result<Real> {
        ensure_consistent!(
            values.len() == self.ns + 1,
            "value array has {} entries, grid has {} price nodes",
            values.len(),
            self.ns + 1
        );

        if s0 <= self.prices[0] {
            return Ok(values[0]);
        }
        if s0 >= self.prices[self.ns] {
            return Ok(values[self.ns]);
        }

        let i = self.locate(s0);
        let w = (s0 - self.prices[i]) / (self.prices[i + 1] - self.prices[i]);
        Ok((1.0 - w) * values[i] + w * values[i + 1])
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
