//! Finite difference methods for PDE-based pricing.
//!
//! Solves the Black-Scholes valuation equation
//!
//! `∂V/∂t + ½σ²S²·∂²V/∂S² + (r−q)S·∂V/∂S − rV = 0`
//!
//! backward in time from the terminal payoff on a uniform grid in `S`,
//! stepping with forward Euler in time and central differences in price.
//!
//! # Overview
//!
//! * [`Grid`]: uniform time × price discretisation with linear interpolation
//! * [`GridSizer`]: derives `S_max`, `Ns` and the largest stable `Nt`
//! * [`TridiagonalOperator`]: the three-point explicit stencil
//! * [`ExplicitFdSolver`]: backward recursion, boundary injection,
//!   early-exercise projection, price and delta/gamma at spot

pub mod grid;
pub mod operator;
pub mod sizer;
pub mod solver;

pub use grid::{Grid, MAX_PRICE_STEPS, MAX_TIME_STEPS};
pub use operator::TridiagonalOperator;
pub use sizer::{
    lognormal_lower_bound, lognormal_upper_bound, stable_time_steps, GridQuality, GridSizer,
    GridSizing, DEFAULT_SAFETY_FACTOR, MAX_SOLVE_WORK, RELATIVE_SPACING_QUANTILE,
};
pub use solver::{ExplicitFdSolver, FdSolution};
