//! # fd-pricingengines
//!
//! Pricing engines combining grids, contracts and models:
//!
//! * [`FdBlackScholesEngine`]: sizes a grid for a contract and runs the
//!   explicit finite-difference solver on it
//! * [`black_scholes_merton`]: closed-form European price, delta and gamma,
//!   used as the reference the finite-difference results are checked against

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod fd_black_scholes_engine;

pub use analytic_european_engine::black_scholes_merton;
pub use fd_black_scholes_engine::FdBlackScholesEngine;
