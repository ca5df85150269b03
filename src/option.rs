//! Option contract inputs
//!
//! [`OptionParameters`] is the single value the pricing engine consumes. It is
//! `Copy`, carries no state between evaluations, and can be validated on its
//! own so callers can report a bad field before asking for a price.

use crate::error::{validation::*, BsmError, BsmResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar days per year, used for day-count inputs and per-day theta
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Exercise right of a European vanilla option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Right to buy at the strike
    Call,
    /// Right to sell at the strike
    Put,
}

impl FromStr for OptionKind {
    type Err = BsmError;

    /// Accepts `c`/`call` and `p`/`put`, case-insensitive
    fn from_str(s: &str) -> BsmResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "call" => Ok(OptionKind::Call),
            "p" | "put" => Ok(OptionKind::Put),
            _ => Err(BsmError::invalid_parameter(
                "kind",
                format!("'{}'", s),
                "must be one of 'c', 'call', 'p', 'put'",
            )),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => write!(f, "call"),
            OptionKind::Put => write!(f, "put"),
        }
    }
}

/// Inputs of one Black-Scholes evaluation
///
/// # Constraints
/// - `spot`, `strike`, `time_to_expiry`, `volatility`: finite and > 0
/// - `rate`: finite, may be negative
///
/// Fields are public so callers can build the struct directly; the engine
/// re-validates on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionParameters {
    pub spot: f64,
    pub strike: f64,
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    /// Annualized volatility
    pub volatility: f64,
    pub kind: OptionKind,
}

impl OptionParameters {
    /// Build and validate a parameter set
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        time_to_expiry: f64,
        volatility: f64,
        kind: OptionKind,
    ) -> BsmResult<Self> {
        let params = OptionParameters {
            spot,
            strike,
            rate,
            time_to_expiry,
            volatility,
            kind,
        };
        params.validate()?;
        Ok(params)
    }

    /// Build a parameter set from a time to expiry in calendar days
    pub fn from_days(
        spot: f64,
        strike: f64,
        rate: f64,
        days_to_expiry: f64,
        volatility: f64,
        kind: OptionKind,
    ) -> BsmResult<Self> {
        validate_positive("days_to_expiry", days_to_expiry)?;
        Self::new(
            spot,
            strike,
            rate,
            days_to_expiry / DAYS_PER_YEAR,
            volatility,
            kind,
        )
    }

    /// Validate every field
    ///
    /// Positivity of spot and strike guards `ln(S/K)`; positivity of time
    /// and volatility guards the `sigma * sqrt(T)` denominator.
    pub fn validate(&self) -> BsmResult<()> {
        validate_positive("spot", self.spot)?;
        validate_positive("strike", self.strike)?;
        validate_finite("rate", self.rate)?;
        validate_positive("time_to_expiry", self.time_to_expiry)?;
        validate_positive("volatility", self.volatility)?;
        Ok(())
    }

    /// Same contract with the spot replaced
    pub fn with_spot(&self, spot: f64) -> Self {
        OptionParameters { spot, ..*self }
    }

    /// Same contract with the opposite exercise right
    pub fn with_kind(&self, kind: OptionKind) -> Self {
        OptionParameters { kind, ..*self }
    }
}

impl Default for OptionParameters {
    fn default() -> Self {
        OptionParameters {
            spot: 30.0,
            strike: 50.0,
            rate: 0.03,
            time_to_expiry: 1.0,
            volatility: 0.30,
            kind: OptionKind::Call,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("c".parse::<OptionKind>().unwrap(), OptionKind::Call);
        assert_eq!(" Call ".parse::<OptionKind>().unwrap(), OptionKind::Call);
        assert_eq!("p".parse::<OptionKind>().unwrap(), OptionKind::Put);
        assert_eq!("PUT".parse::<OptionKind>().unwrap(), OptionKind::Put);

        let err = "straddle".parse::<OptionKind>().unwrap_err();
        assert_eq!(err.parameter(), "kind");
        assert!(err.to_string().contains("straddle"));
        assert!("".parse::<OptionKind>().is_err());
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in [OptionKind::Call, OptionKind::Put] {
            assert_eq!(kind.to_string().parse::<OptionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_default_parameters_are_valid() {
        let params = OptionParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.kind, OptionKind::Call);
    }

    #[test]
    fn test_new_rejects_each_field() {
        let cases = [
            (OptionParameters::new(0.0, 50.0, 0.03, 1.0, 0.3, OptionKind::Call), "spot"),
            (OptionParameters::new(30.0, -10.0, 0.03, 1.0, 0.3, OptionKind::Call), "strike"),
            (OptionParameters::new(30.0, 50.0, f64::NAN, 1.0, 0.3, OptionKind::Call), "rate"),
            (OptionParameters::new(30.0, 50.0, 0.03, 0.0, 0.3, OptionKind::Put), "time_to_expiry"),
            (OptionParameters::new(30.0, 50.0, 0.03, 1.0, 0.0, OptionKind::Put), "volatility"),
        ];

        for (result, field) in cases {
            let err = result.unwrap_err();
            assert_eq!(err.parameter(), field, "unexpected error: {}", err);
        }
    }

    #[test]
    fn test_negative_rate_is_valid() {
        assert!(OptionParameters::new(100.0, 100.0, -0.005, 0.5, 0.2, OptionKind::Call).is_ok());
    }

    #[test]
    fn test_from_days() {
        let params =
            OptionParameters::from_days(100.0, 100.0, 0.05, 73.0, 0.2, OptionKind::Put).unwrap();
        assert!((params.time_to_expiry - 0.2).abs() < 1e-15);

        let err = OptionParameters::from_days(100.0, 100.0, 0.05, 0.0, 0.2, OptionKind::Put)
            .unwrap_err();
        assert_eq!(err.parameter(), "days_to_expiry");
    }

    #[test]
    fn test_with_spot_keeps_contract() {
        let params = OptionParameters::default();
        let moved = params.with_spot(42.0);
        assert_eq!(moved.spot, 42.0);
        assert_eq!(moved.strike, params.strike);
        assert_eq!(moved.kind, params.kind);
        assert_eq!(params.with_kind(OptionKind::Put).kind, OptionKind::Put);
    }
}
