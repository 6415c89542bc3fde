//! Error types for fdpricer.
//!
//! A single `thiserror`-derived enum covers both checked failure classes:
//! rejected construction inputs / solver preconditions, and internal
//! consistency violations between a grid and the arrays laid on it.
//! Numerical hazards (an explicit step beyond the stability bound, domain
//! truncation bias) are not errors and are never raised.

use thiserror::Error;

/// The top-level error type used throughout fdpricer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A caller-supplied value was rejected: negative volatility,
    /// non-positive maturity, misordered spread strikes, a degenerate grid,
    /// or a solver precondition such as non-positive `dS` / `dt`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two structures that must agree in shape did not
    /// (e.g. a grid whose point sequences disagree with its step counts).
    #[error("internal consistency check failed: {0}")]
    InternalConsistency(String),
}

/// Shorthand `Result` type used throughout fdpricer.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidArgument(...))` if `$cond` is false.
///
/// Conditions should be phrased so that NaN fails them
/// (`x > 0.0` rather than `!(x <= 0.0)`).
///
/// # Example
/// ```
/// use fd_core::{ensure, errors::Error};
/// fn positive(x: f64) -> fd_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(f64::NAN).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::InternalConsistency(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use fd_core::{ensure_consistent, errors::Error};
/// fn same_len(a: &[f64], b: &[f64]) -> fd_core::errors::Result<()> {
///     ensure_consistent!(a.len() == b.len(), "{} != {}", a.len(), b.len());
///     Ok(())
/// }
/// assert!(same_len(&[1.0], &[2.0]).is_ok());
/// assert!(matches!(
///     same_len(&[1.0], &[]),
///     Err(Error::InternalConsistency(_))
/// ));
/// ```
#[macro_export]
macro_rules! ensure_consistent {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InternalConsistency(
                format!($($msg)*)
            ));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked_sqrt(x: f64) -> Result<f64> {
        crate::ensure!(x >= 0.0, "cannot take the square root of {x}");
        Ok(x.sqrt())
    }

    #[test]
    fn ensure_passes_and_fails() {
        assert_eq!(checked_sqrt(4.0), Ok(2.0));
        assert_eq!(
            checked_sqrt(-1.0),
            Err(Error::InvalidArgument(
                "cannot take the square root of -1".to_string()
            ))
        );
    }

    #[test]
    fn ensure_rejects_nan() {
        assert!(checked_sqrt(f64::NAN).is_err());
    }

    #[test]
    fn display_messages() {
        let e = Error::InvalidArgument("sigma < 0".into());
        assert_eq!(e.to_string(), "invalid argument: sigma < 0");
        let e = Error::InternalConsistency("3 != 4".into());
        assert_eq!(e.to_string(), "internal consistency check failed: 3 != 4");
    }
}
