//! Grid-sizing heuristics.
//!
//! A grid for the explicit scheme needs three choices:
//!
//! 1. `S_max` far enough into the upper tail of the terminal distribution
//!    that boundary error does not reach the strike/spot region. It is set
//!    at a lognormal quantile `S₀·exp((r−q−½σ²)T + z·σ√T)`.
//! 2. `dS` fine enough to resolve the payoff kink at the strike, from either
//!    a quality tier (fixed `Ns`) or an explicit spacing relative to spot.
//! 3. `dt` within the stability bound of the explicit recursion. The
//!    diagonal weight `B = 1 − dt·(σ²S²/dS² + r)` is smallest at `S_max`;
//!    keeping it non-negative there gives
//!    `dt_max = 1 / (σ²·S_max²/dS² + |r|)`, and the step actually used is
//!    `safety · dt_max`. Beyond the bound the recursion oscillates and
//!    diverges; the solver does not detect this.
//!
//! A non-zero `S_min` is only accepted below the matching lower quantile,
//! where the contracts' small-`S` asymptotes hold.

use crate::finite_differences::grid::{Grid, MAX_PRICE_STEPS, MAX_TIME_STEPS};
use fd_core::{ensure, errors::Error, errors::Result, Real, Size, Time};
use fd_instruments::FdContract;
use fd_models::BlackScholesModel;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fraction of the stability bound used as the time step.
///
/// Shared by every sizing policy. At 0.8 the diagonal weight stays at or
/// above 0.2 on every node.
pub const DEFAULT_SAFETY_FACTOR: Real = 0.8;

/// Lognormal quantile used for `S_max` under relative-spacing sizing.
pub const RELATIVE_SPACING_QUANTILE: Real = 5.0;

/// Largest `Nt · Ns` (node updates per solve) the sizer will produce.
pub const MAX_SOLVE_WORK: Real = 1e10;

// ─── Policies ────────────────────────────────────────────────────────────────

/// Quality tier for grid sizing, ordered from coarse to fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GridQuality {
    /// z = 3, 250 price steps.
    Coarse,
    /// z = 4, 400 price steps.
    #[default]
    Balanced,
    /// z = 5, 800 price steps.
    Fine,
}

impl GridQuality {
    /// Lognormal quantile multiplier `z` placing `S_max`.
    pub fn quantile(self) -> Real {
        match self {
            GridQuality::Coarse => 3.0,
            GridQuality::Balanced => 4.0,
            GridQuality::Fine => 5.0,
        }
    }

    /// Number of price steps `Ns`.
    pub fn price_steps(self) -> Size {
        match self {
            GridQuality::Coarse => 250,
            GridQuality::Balanced => 400,
            GridQuality::Fine => 800,
        }
    }
}

impl TryFrom<u8> for GridQuality {
    type Error = Error;

    fn try_from(tier: u8) -> Result<Self> {
        match tier {
            0 => Ok(GridQuality::Coarse),
            1 => Ok(GridQuality::Balanced),
            2 => Ok(GridQuality::Fine),
            other => Err(Error::InvalidArgument(format!(
                "quality tier must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

/// How the price axis is resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GridSizing {
    /// Fixed `Ns` and quantile per tier.
    Quality(GridQuality),
    /// `dS = ρ·S₀`, `S_max` at [`RELATIVE_SPACING_QUANTILE`].
    RelativeSpacing(Real),
}

impl Default for GridSizing {
    fn default() -> Self {
        GridSizing::Quality(GridQuality::default())
    }
}

// ─── Sizer ───────────────────────────────────────────────────────────────────

/// Derives a [`Grid`] for a contract, model and spot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridSizer {
    /// Price-axis policy.
    pub sizing: GridSizing,
    /// Lower edge of the price domain.
    pub s_min: Real,
    /// Fraction of the stability bound used as the time step, in `(0, 1)`.
    pub safety: Real,
}

impl Default for GridSizer {
    fn default() -> Self {
        Self {
            sizing: GridSizing::default(),
            s_min: 0.0,
            safety: DEFAULT_SAFETY_FACTOR,
        }
    }
}

impl GridSizer {
    /// Create a sizer with the given policy and default `s_min` / safety.
    pub fn new(sizing: GridSizing) -> Self {
        Self {
            sizing,
            ..Self::default()
        }
    }

    /// Quality-tier sizing.
    pub fn with_quality(quality: GridQuality) -> Self {
        Self::new(GridSizing::Quality(quality))
    }

    /// Relative-spacing sizing with `dS = rho · spot`.
    pub fn with_relative_spacing(rho: Real) -> Self {
        Self::new(GridSizing::RelativeSpacing(rho))
    }

    /// Set the lower edge of the price domain.
    pub fn with_s_min(mut self, s_min: Real) -> Self {
        self.s_min = s_min;
        self
    }

    /// Set the stability safety factor.
    pub fn with_safety(mut self, safety: Real) -> Self {
        self.safety = safety;
        self
    }

    /// Build the grid for `contract` under `model` around `spot`.
    ///
    /// # Errors
    /// `InvalidArgument` for a non-positive spot, a relative spacing that is
    /// not strictly positive, a safety factor outside `(0, 1)`, a non-zero
    /// `s_min` above the lower quantile of `min(spot, strike)`, or a grid
    /// beyond [`MAX_PRICE_STEPS`], [`MAX_TIME_STEPS`] or [`MAX_SOLVE_WORK`].
    pub fn make_grid<C: FdContract + ?Sized>(
        &self,
        contract: &C,
        model: &BlackScholesModel,
        spot: Real,
    ) -> Result<Grid> {
        ensure!(
            spot > 0.0 && spot.is_finite(),
            "spot must be positive, got {spot}"
        );
        ensure!(
            self.safety > 0.0 && self.safety < 1.0,
            "safety factor must lie in (0, 1), got {}",
            self.safety
        );
        ensure!(
            self.s_min >= 0.0 && self.s_min.is_finite(),
            "S_min must be non-negative, got {}",
            self.s_min
        );

        let maturity = contract.maturity();
        let z = match self.sizing {
            GridSizing::Quality(quality) => quality.quantile(),
            GridSizing::RelativeSpacing(_) => RELATIVE_SPACING_QUANTILE,
        };
        let s_max = lognormal_upper_bound(spot, model, maturity, z);

        if self.s_min > 0.0 {
            let s_floor = lognormal_lower_bound(spot.min(contract.strike()), model, maturity, z);
            ensure!(
                self.s_min <= s_floor,
                "S_min = {} lies above the lower quantile {s_floor}; use 0 or a lower edge",
                self.s_min
            );
        }
        ensure!(
            s_max > self.s_min,
            "derived S_max = {s_max} does not exceed S_min = {}",
            self.s_min
        );

        let ns = match self.sizing {
            GridSizing::Quality(quality) => quality.price_steps(),
            GridSizing::RelativeSpacing(rho) => {
                ensure!(
                    rho > 0.0 && rho.is_finite(),
                    "relative spacing must be positive, got {rho}"
                );
                let steps = ((s_max - self.s_min) / (rho * spot)).ceil();
                ensure!(
                    steps.is_finite() && steps <= MAX_PRICE_STEPS as Real,
                    "relative spacing {rho} needs {steps} price steps (max {MAX_PRICE_STEPS})"
                );
                (steps as Size).max(2)
            }
        };

        let ds = (s_max - self.s_min) / ns as Real;
        let nt = stable_time_steps(maturity, model, s_max, ds, self.safety)?;
        let work = nt as Real * ns as Real;
        ensure!(
            work <= MAX_SOLVE_WORK,
            "grid of Nt = {nt} by Ns = {ns} exceeds {MAX_SOLVE_WORK:e} node updates"
        );

        debug!(
            s_max,
            ns,
            nt,
            ds,
            dt = maturity / nt as Real,
            "sized finite-difference grid"
        );

        Grid::new(maturity, self.s_min, s_max, nt, ns)
    }
}

// ─── Shared rules ────────────────────────────────────────────────────────────

/// `spot · exp((r − q − ½σ²)·T + z·σ·√T)`: the `z`-quantile of the terminal
/// lognormal distribution.
pub fn lognormal_upper_bound(
    spot: Real,
    model: &BlackScholesModel,
    maturity: Time,
    z: Real,
) -> Real {
    let sigma = model.sigma();
    let mu = (model.r() - model.q() - 0.5 * sigma * sigma) * maturity;
    spot * (mu + z * sigma * maturity.sqrt()).exp()
}

/// `spot · exp((r − q − ½σ²)·T − z·σ·√T)`: the lower `z`-quantile of the
/// terminal lognormal distribution.
pub fn lognormal_lower_bound(
    spot: Real,
    model: &BlackScholesModel,
    maturity: Time,
    z: Real,
) -> Real {
    lognormal_upper_bound(spot, model, maturity, -z)
}

/// Smallest number of time steps keeping `dt ≤ safety · dt_max`, with
/// `dt_max = 1 / (σ²·S_max²/dS² + |r|)`. At least one step.
///
/// # Errors
/// `InvalidArgument` if `ds` is not positive, `safety` is outside `(0, 1)`,
/// or more than [`MAX_TIME_STEPS`] steps would be needed.
pub fn stable_time_steps(
    maturity: Time,
    model: &BlackScholesModel,
    s_max: Real,
    ds: Real,
    safety: Real,
) -> Result<Size> {
    ensure!(ds > 0.0, "dS must be positive, got {ds}");
    ensure!(
        safety > 0.0 && safety < 1.0,
        "safety factor must lie in (0, 1), got {safety}"
    );

    let sigma = model.sigma();
    let denom = sigma * sigma * s_max * s_max / (ds * ds) + model.r().abs();
    if denom <= 0.0 {
        // No diffusion and no discounting: any step is stable.
        return Ok(1);
    }
    let dt = safety / denom;
    let steps = (maturity / dt).ceil();
    ensure!(
        steps.is_finite() && steps <= MAX_TIME_STEPS as Real,
        "stability bound needs {steps} time steps (max {MAX_TIME_STEPS})"
    );
    Ok((steps as Size).max(1))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
