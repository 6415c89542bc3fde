//! Constant-parameter Black-Scholes-Merton model.
//!
//! `dS/S = (r − q) dt + σ dW`
//!
//! where `r` is the risk-free rate, `q` is the continuous dividend yield and
//! `σ` is the (constant) volatility.

use fd_core::{ensure, errors::Result, DiscountFactor, Rate, Time, Volatility};

/// Immutable `{r, σ, q}` triple.
///
/// Never mutated after construction, so one instance can be shared by
/// reference (or `Arc`) between any number of contracts, solvers and threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesModel {
    r: Rate,
    sigma: Volatility,
    q: Rate,
}

impl BlackScholesModel {
    /// Create a model with risk-free rate `r`, volatility `sigma` and
    /// dividend yield `q`.
    ///
    /// `r` and `q` may take any sign.
    ///
    /// # Errors
    /// `InvalidArgument` if `sigma` is negative or not finite, or if `r` or
    /// `q` is not finite.
    pub fn new(r: Rate, sigma: Volatility, q: Rate) -> Result<Self> {
        ensure!(
            sigma >= 0.0 && sigma.is_finite(),
            "volatility must be finite and non-negative, got {sigma}"
        );
        ensure!(r.is_finite(), "risk-free rate must be finite, got {r}");
        ensure!(q.is_finite(), "dividend yield must be finite, got {q}");
        Ok(Self { r, sigma, q })
    }

    /// A model with no dividend yield.
    pub fn without_dividends(r: Rate, sigma: Volatility) -> Result<Self> {
        Self::new(r, sigma, 0.0)
    }

    /// Risk-free rate.
    pub fn r(&self) -> Rate {
        self.r
    }

    /// Volatility.
    pub fn sigma(&self) -> Volatility {
        self.sigma
    }

    /// Continuous dividend yield.
    pub fn q(&self) -> Rate {
        self.q
    }

    /// Discount factor `exp(−r·t)`.
    pub fn discount(&self, t: Time) -> DiscountFactor {
        (-self.r * t).exp()
    }

    /// Dividend discount factor `exp(−q·t)`.
    pub fn dividend_discount(&self, t: Time) -> DiscountFactor {
        (-self.q * t).exp()
    }
}
