//! # fd-instruments
//!
//! Contracts priced by the finite-difference solver: European and American
//! calls and puts, forwards, vertical spreads and straddles.
//!
//! The solver only ever talks to the [`FdContract`] trait; [`Contract`] is
//! the closed set of built-in variants implementing it.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod contract;
pub mod payoff;

pub use contract::{Contract, ContractKind, FdContract};
pub use payoff::{intrinsic, OptionType};
