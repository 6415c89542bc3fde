//! # fdpricer
//!
//! Explicit finite-difference pricing of option-like contracts under the
//! Black–Scholes model.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `fd-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! fdpricer = "0.1"
//! ```
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fdpricer::instruments::Contract;
//! use fdpricer::methods::GridQuality;
//! use fdpricer::models::BlackScholesModel;
//! use fdpricer::pricingengines::FdBlackScholesEngine;
//!
//! let model = Arc::new(BlackScholesModel::new(0.05, 0.20, 0.02)?);
//! let put = Contract::american_put(100.0, 1.0, model)?;
//!
//! let engine = FdBlackScholesEngine::with_quality(GridQuality::Coarse);
//! let result = engine.calculate(&put, 100.0)?;
//! assert!(result.price > 5.0 && result.delta < 0.0);
//! # Ok::<(), fdpricer::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Scalar aliases and error definitions.
pub use fd_core as core;

/// Black–Scholes market model.
pub use fd_models as models;

/// Payoffs and the priceable contract variants.
pub use fd_instruments as instruments;

/// Grids, sizing, and the explicit time-stepping solver.
pub use fd_methods as methods;

/// Finite-difference and closed-form pricing engines.
pub use fd_pricingengines as pricingengines;
