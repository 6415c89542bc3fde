//! # fd-models
//!
//! Diffusion model parameters consumed by contracts and finite-difference
//! solvers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod black_scholes;

pub use black_scholes::BlackScholesModel;
