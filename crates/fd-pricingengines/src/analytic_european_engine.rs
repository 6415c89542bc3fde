//! Closed-form Black-Scholes-Merton prices for European calls and puts.
//!
//! $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
//! $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
//!
//! where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$.

use fd_core::{Price, Rate, Real, Time, Volatility};
use fd_instruments::OptionType;
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Black-Scholes-Merton price and Greeks for a European option.
///
/// Returns `(price, delta, gamma)`. At or past expiry returns the intrinsic
/// value with zero sensitivities.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> (Price, Real, Real) {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        let intrinsic = (phi * (spot - strike)).max(0.0);
        return (intrinsic, 0.0, 0.0);
    }

    let r = risk_free_rate;
    let q = dividend_yield;
    let sigma = volatility;
    let std_dev = sigma * t.sqrt();
    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();
    let fwd = spot * ((r - q) * t).exp();

    if std_dev <= 1e-15 {
        // Deterministic terminal price.
        let price = df_r * (phi * (fwd - strike)).max(0.0);
        let delta = if phi * (fwd - strike) > 0.0 { phi * df_q } else { 0.0 };
        return (price, delta, 0.0);
    }

    let normal = Normal::standard();
    let d1 = ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / std_dev;
    let d2 = d1 - std_dev;

    let nd1 = normal.cdf(phi * d1);
    let nd2 = normal.cdf(phi * d2);

    let price = phi * (spot * df_q * nd1 - strike * df_r * nd2);
    let delta = phi * df_q * nd1;
    let gamma = df_q * normal.pdf(d1) / (spot * std_dev);

    (price, delta, gamma)
}
