//! # fd-methods
//!
//! Numerical methods for pricing under a one-factor lognormal diffusion:
//! uniform time × price grids, grid-sizing heuristics, and the explicit
//! finite-difference solver with early-exercise projection.
//!
//! # Modules
//!
//! * [`finite_differences`]: grid, sizer, explicit stencil and solver

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Finite difference methods: grid, sizing heuristics, explicit solver.
pub mod finite_differences;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use finite_differences::{
    lognormal_lower_bound, lognormal_upper_bound, stable_time_steps, ExplicitFdSolver,
    FdSolution, Grid, GridQuality, GridSizer, GridSizing, TridiagonalOperator,
    DEFAULT_SAFETY_FACTOR, MAX_PRICE_STEPS, MAX_SOLVE_WORK, MAX_TIME_STEPS,
    RELATIVE_SPACING_QUANTILE,
};
