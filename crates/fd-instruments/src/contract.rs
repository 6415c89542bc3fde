//! Contract interface consumed by the finite-difference solver, and the
//! built-in contract variants.
//!
//! A contract supplies everything the backward recursion needs besides the
//! model coefficients:
//!
//! * the terminal condition `V(T, S) = payoff(S)`,
//! * Dirichlet values at the truncated domain edges `S = S_min` and
//!   `S = S_max`, expressed through the time to maturity `τ = T − t`,
//! * the obstacle `V ≥ early_exercise_value(S)` for American styles.
//!
//! The edge values are the discounted far-field asymptotics of each contract
//! under Black-Scholes; they are what make the PDE well posed on a finite
//! domain.

use crate::payoff::{intrinsic, OptionType};
use fd_core::{ensure, errors::Result, Real, Time};
use fd_models::BlackScholesModel;
use std::fmt;
use std::sync::Arc;

// ─── Solver-facing interface ─────────────────────────────────────────────────

/// The capability set a contract exposes to the finite-difference solver.
///
/// Implementations must be read-only after construction so that a single
/// contract can be shared between concurrent solves.
pub trait FdContract: fmt::Debug + Send + Sync {
    /// Maturity `T` in years.
    fn maturity(&self) -> Time;

    /// Reference strike (for spreads, the strike that defines the contract
    /// in its name: lower for a bull call spread, upper for a bear put
    /// spread).
    fn strike(&self) -> Real;

    /// Terminal payoff `V(T, S)`.
    fn payoff(&self, s: Real) -> Real;

    /// Value at the lower edge `s_min` of the price domain at time `t`.
    ///
    /// Only accurate while `s_min` lies far below the strikes; at
    /// `s_min = 0` it is the exact `S → 0` limit.
    fn left_boundary(&self, t: Time, s_min: Real) -> Real;

    /// Value at the upper edge `s_max` of the price domain at time `t`.
    fn right_boundary(&self, t: Time, s_max: Real) -> Real;

    /// Whether the holder may exercise before maturity.
    fn is_early_exercisable(&self) -> bool {
        false
    }

    /// Value received on immediate exercise at price `s`.
    fn early_exercise_value(&self, s: Real) -> Real {
        self.payoff(s)
    }
}

// ─── Built-in variants ───────────────────────────────────────────────────────

/// The closed set of built-in contract kinds together with their strikes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContractKind {
    /// `max(S − K, 0)` at maturity.
    EuropeanCall {
        /// Strike.
        strike: Real,
    },
    /// `max(K − S, 0)` at maturity.
    EuropeanPut {
        /// Strike.
        strike: Real,
    },
    /// `max(S − K, 0)`, exercisable at any time.
    AmericanCall {
        /// Strike.
        strike: Real,
    },
    /// `max(K − S, 0)`, exercisable at any time.
    AmericanPut {
        /// Strike.
        strike: Real,
    },
    /// Linear `S − K` at maturity.
    Future {
        /// Delivery price.
        strike: Real,
    },
    /// Long call at `K1`, short call at `K2`, with `K1 < K2`.
    BullCallSpread {
        /// `K1`.
        lower_strike: Real,
        /// `K2`.
        upper_strike: Real,
    },
    /// Long put at `K2`, short put at `K1`, with `K1 < K2`.
    BearPutSpread {
        /// `K1`.
        lower_strike: Real,
        /// `K2`.
        upper_strike: Real,
    },
    /// `|S − K|` at maturity.
    Straddle {
        /// Strike.
        strike: Real,
    },
}

impl ContractKind {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ContractKind::EuropeanCall { .. } => "EuropeanCall",
            ContractKind::EuropeanPut { .. } => "EuropeanPut",
            ContractKind::AmericanCall { .. } => "AmericanCall",
            ContractKind::AmericanPut { .. } => "AmericanPut",
            ContractKind::Future { .. } => "Future",
            ContractKind::BullCallSpread { .. } => "BullCallSpread",
            ContractKind::BearPutSpread { .. } => "BearPutSpread",
            ContractKind::Straddle { .. } => "Straddle",
        }
    }

    /// `true` for the American variants.
    pub fn is_american(&self) -> bool {
        matches!(
            self,
            ContractKind::AmericanCall { .. } | ContractKind::AmericanPut { .. }
        )
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ContractKind::BullCallSpread {
                lower_strike,
                upper_strike,
            }
            | ContractKind::BearPutSpread {
                lower_strike,
                upper_strike,
            } => write!(f, "{} {lower_strike}/{upper_strike}", self.name()),
            ContractKind::EuropeanCall { strike }
            | ContractKind::EuropeanPut { strike }
            | ContractKind::AmericanCall { strike }
            | ContractKind::AmericanPut { strike }
            | ContractKind::Future { strike }
            | ContractKind::Straddle { strike } => write!(f, "{} @ {strike}", self.name()),
        }
    }
}

/// A built-in contract: a [`ContractKind`], its maturity and the model whose
/// rates discount its boundary values.
///
/// Holds no mutable state; cloning is cheap (the model is behind an `Arc`).
#[derive(Debug, Clone)]
pub struct Contract {
    kind: ContractKind,
    maturity: Time,
    model: Arc<BlackScholesModel>,
}

impl Contract {
    /// Create a contract.
    ///
    /// # Errors
    /// `InvalidArgument` if the maturity is not strictly positive, a strike
    /// is not finite, or a spread has `K1 ≥ K2`.
    pub fn new(
        kind: ContractKind,
        maturity: Time,
        model: Arc<BlackScholesModel>,
    ) -> Result<Self> {
        ensure!(
            maturity > 0.0 && maturity.is_finite(),
            "maturity must be positive, got {maturity}"
        );
        match kind {
            ContractKind::BullCallSpread {
                lower_strike,
                upper_strike,
            }
            | ContractKind::BearPutSpread {
                lower_strike,
                upper_strike,
            } => {
                ensure!(
                    lower_strike.is_finite() && upper_strike.is_finite(),
                    "{} strikes must be finite",
                    kind.name()
                );
                ensure!(
                    lower_strike < upper_strike,
                    "{} requires K1 < K2, got K1 = {lower_strike}, K2 = {upper_strike}",
                    kind.name()
                );
            }
            ContractKind::EuropeanCall { strike }
            | ContractKind::EuropeanPut { strike }
            | ContractKind::AmericanCall { strike }
            | ContractKind::AmericanPut { strike }
            | ContractKind::Future { strike }
            | ContractKind::Straddle { strike } => {
                ensure!(strike.is_finite(), "strike must be finite, got {strike}");
            }
        }
        Ok(Self {
            kind,
            maturity,
            model,
        })
    }

    /// European call.
    pub fn european_call(
        strike: Real,
        maturity: Time,
        model: Arc<BlackScholesModel>,
    ) -> Result<Self> {
        Self::new(ContractKind::EuropeanCall { strike }, maturity, model)
    }

    /// European put.
    pub fn european_put(
        strike: Real,
        maturity: Time,
        model: Arc<BlackScholesModel>,
    ) -> Result<Self> {
        Self::new(ContractKind::EuropeanPut { strike }, maturity, model)
    }

    /// American call.
    pub fn american_call(
        strike: Real,
        maturity: Time,
        model: Arc<BlackScholesModel>,
    ) -> Result<Self> {
        Self::new(ContractKind::AmericanCall { strike }, maturity, model)
    }

    /// American put.
    pub fn american_put(
        strike: Real,
        maturity: Time,
        model: Arc<BlackScholesModel>,
    ) -> Result<Self> {
        Self::new(ContractKind::AmericanPut { strike }, maturity, model)
    }

    /// Forward / future paying `S − K` at maturity.
    pub fn future(strike: Real, maturity: Time, model: Arc<BlackScholesModel>) -> Result<Self> {
        Self::new(ContractKind::Future { strike }, maturity, model)
    }

    /// Bull call spread `K1 < K2`.
    pub fn bull_call_spread(
        lower_strike: Real,
        upper_strike: Real,
        maturity: Time,
        model: Arc<BlackScholesModel>,
    ) -> Result<Self> {
        Self::new(
            ContractKind::BullCallSpread {
                lower_strike,
                upper_strike,
            },
            maturity,
            model,
        )
    }

    /// Bear put spread `K1 < K2`.
    pub fn bear_put_spread(
        lower_strike: Real,
        upper_strike: Real,
        maturity: Time,
        model: Arc<BlackScholesModel>,
    ) -> Result<Self> {
        Self::new(
            ContractKind::BearPutSpread {
                lower_strike,
                upper_strike,
            },
            maturity,
            model,
        )
    }

    /// Straddle.
    pub fn straddle(
        strike: Real,
        maturity: Time,
        model: Arc<BlackScholesModel>,
    ) -> Result<Self> {
        Self::new(ContractKind::Straddle { strike }, maturity, model)
    }

    /// The contract kind.
    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    /// The model used for boundary discounting.
    pub fn model(&self) -> &BlackScholesModel {
        &self.model
    }

    /// Time to maturity `τ = T − t`, floored at zero.
    fn tau(&self, t: Time) -> Time {
        (self.maturity - t).max(0.0)
    }

    /// `S·e^(−qτ) − K·e^(−rτ)`: the value of a forward, and the far-field
    /// asymptote of anything that behaves like a long call for large `S`
    /// (or, negated, like a long put for small `S`).
    fn forward_value(&self, s: Real, strike: Real, tau: Time) -> Real {
        s * self.model.dividend_discount(tau) - strike * self.model.discount(tau)
    }
}

impl FdContract for Contract {
    fn maturity(&self) -> Time {
        self.maturity
    }

    fn strike(&self) -> Real {
        match self.kind {
            ContractKind::BullCallSpread { lower_strike, .. } => lower_strike,
            ContractKind::BearPutSpread { upper_strike, .. } => upper_strike,
            ContractKind::EuropeanCall { strike }
            | ContractKind::EuropeanPut { strike }
            | ContractKind::AmericanCall { strike }
            | ContractKind::AmericanPut { strike }
            | ContractKind::Future { strike }
            | ContractKind::Straddle { strike } => strike,
        }
    }

    fn payoff(&self, s: Real) -> Real {
        match self.kind {
            ContractKind::EuropeanCall { strike } | ContractKind::AmericanCall { strike } => {
                intrinsic(OptionType::Call, s, strike)
            }
            ContractKind::EuropeanPut { strike } | ContractKind::AmericanPut { strike } => {
                intrinsic(OptionType::Put, s, strike)
            }
            ContractKind::Future { strike } => s - strike,
            ContractKind::BullCallSpread {
                lower_strike,
                upper_strike,
            } => {
                intrinsic(OptionType::Call, s, lower_strike)
                    - intrinsic(OptionType::Call, s, upper_strike)
            }
            ContractKind::BearPutSpread {
                lower_strike,
                upper_strike,
            } => {
                intrinsic(OptionType::Put, s, upper_strike)
                    - intrinsic(OptionType::Put, s, lower_strike)
            }
            ContractKind::Straddle { strike } => (s - strike).abs(),
        }
    }

    fn left_boundary(&self, t: Time, s_min: Real) -> Real {
        let tau = self.tau(t);
        if tau <= 0.0 {
            return self.payoff(s_min);
        }
        match self.kind {
            ContractKind::EuropeanCall { .. }
            | ContractKind::AmericanCall { .. }
            | ContractKind::BullCallSpread { .. } => 0.0,
            ContractKind::EuropeanPut { strike } | ContractKind::Straddle { strike } => {
                -self.forward_value(s_min, strike, tau)
            }
            // Exercise is optimal deep in the money.
            ContractKind::AmericanPut { strike } => strike - s_min,
            ContractKind::Future { strike } => self.forward_value(s_min, strike, tau),
            ContractKind::BearPutSpread {
                lower_strike,
                upper_strike,
            } => (upper_strike - lower_strike) * self.model.discount(tau),
        }
    }

    fn right_boundary(&self, t: Time, s_max: Real) -> Real {
        let tau = self.tau(t);
        if tau <= 0.0 {
            return self.payoff(s_max);
        }
        match self.kind {
            ContractKind::EuropeanCall { strike }
            | ContractKind::AmericanCall { strike }
            | ContractKind::Future { strike }
            | ContractKind::Straddle { strike } => self.forward_value(s_max, strike, tau),
            ContractKind::EuropeanPut { .. }
            | ContractKind::AmericanPut { .. }
            | ContractKind::BearPutSpread { .. } => 0.0,
            ContractKind::BullCallSpread {
                lower_strike,
                upper_strike,
            } => (upper_strike - lower_strike) * self.model.discount(tau),
        }
    }

    fn is_early_exercisable(&self) -> bool {
        self.kind.is_american()
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} T={}", self.kind, self.maturity)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
