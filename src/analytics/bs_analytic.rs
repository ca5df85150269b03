// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! European calls and puts then have closed-form prices in terms of the
//! cumulative normal distribution Φ(x), and every Greek is an analytic
//! derivative of that price.
//!
//! # Reporting Units
//!
//! - Theta is per calendar day (annual theta / 365)
//! - Vega is per one volatility point (raw vega × 0.01)
//! - Rho is per one rate point (raw rho × 0.01)

use crate::error::{BsmError, BsmResult};
use crate::math_utils::{norm_cdf, norm_pdf};
use crate::option::{OptionKind, OptionParameters, DAYS_PER_YEAR};
use serde::{Deserialize, Serialize};

/// Scale from a unit change to a one percentage point change
pub const PERCENT_POINT: f64 = 0.01;

/// Auxiliary quantities shared by the price and every Greek
///
/// # Formula
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Factors {
    pub d1: f64,
    pub d2: f64,
    pub sqrt_t: f64,
    /// e^(-rT)
    pub discount: f64,
}

impl Factors {
    /// Validate the parameters and compute d₁, d₂
    ///
    /// # Errors
    ///
    /// Besides the per-field checks of [`OptionParameters::validate`], finite
    /// inputs are rejected when e^(-rT) overflows, when σ√T underflows to zero
    /// or overflows, or when d₁ is not finite.
    pub fn compute(params: &OptionParameters) -> BsmResult<Self> {
        params.validate()?;
        Self::from_valid(params)
    }

    fn from_valid(p: &OptionParameters) -> BsmResult<Self> {
        let discount = (-p.rate * p.time_to_expiry).exp();
        if !discount.is_finite() {
            return Err(BsmError::invalid_parameter(
                "rate",
                p.rate,
                format!(
                    "discount factor e^(-rT) overflows with time_to_expiry {}",
                    p.time_to_expiry
                ),
            ));
        }

        let sqrt_t = p.time_to_expiry.sqrt();
        let vol_sqrt_t = p.volatility * sqrt_t;
        if !(vol_sqrt_t > 0.0 && vol_sqrt_t.is_finite()) {
            return Err(BsmError::invalid_parameter(
                "volatility",
                p.volatility,
                format!(
                    "sigma * sqrt(T) = {} is outside the representable range",
                    vol_sqrt_t
                ),
            ));
        }

        let d1 = ((p.spot / p.strike).ln()
            + (p.rate + 0.5 * p.volatility * p.volatility) * p.time_to_expiry)
            / vol_sqrt_t;
        if !d1.is_finite() {
            return Err(BsmError::invalid_parameter(
                "volatility",
                p.volatility,
                format!("d1 is not finite with time_to_expiry {}", p.time_to_expiry),
            ));
        }

        Ok(Factors {
            d1,
            d2: d1 - vol_sqrt_t,
            sqrt_t,
            discount,
        })
    }
}

/// Price and the five standard Greeks of one option
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    /// Per calendar day
    pub theta: f64,
    /// Per one volatility point
    pub vega: f64,
    /// Per one rate point
    pub rho: f64,
}

/// Evaluate price and all Greeks from one shared set of factors
///
/// # Errors
///
/// Returns `InvalidParameter` when spot, strike, time or volatility is not
/// strictly positive, when any input is not finite, or when finite inputs
/// overflow an intermediate factor or one of the outputs. An `Ok` result
/// never holds NaN or infinity.
///
/// # Example
/// ```rust
/// use bsm_greeks::analytics::bs_analytic::evaluate;
/// use bsm_greeks::option::{OptionKind, OptionParameters};
///
/// let params = OptionParameters::new(100.0, 100.0, 0.05, 1.0, 0.2, OptionKind::Call).unwrap();
/// let result = evaluate(&params).unwrap();
/// assert!((result.price - 10.4506).abs() < 1e-4);
/// ```
pub fn evaluate(params: &OptionParameters) -> BsmResult<EvaluationResult> {
    let f = Factors::compute(params)?;
    Ok(EvaluationResult {
        price: price_with(params, &f)?,
        delta: delta_with(params, &f),
        gamma: gamma_with(params, &f)?,
        theta: theta_with(params, &f)?,
        vega: vega_with(params, &f)?,
        rho: rho_with(params, &f)?,
    })
}

/// Black-Scholes European option price
///
/// # Formula
/// ```text
/// C = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// P = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
pub fn price(params: &OptionParameters) -> BsmResult<f64> {
    Factors::compute(params).and_then(|f| price_with(params, &f))
}

/// Delta (∂V/∂S)
///
/// # Formula
/// ```text
/// Δ_call = Φ(d₁)
/// Δ_put  = Φ(d₁) - 1 = -Φ(-d₁)
/// ```
///
/// Range: [0, 1] for calls, [-1, 0] for puts.
pub fn delta(params: &OptionParameters) -> BsmResult<f64> {
    Factors::compute(params).map(|f| delta_with(params, &f))
}

/// Gamma (∂²V/∂S²), same for calls and puts
///
/// # Formula
/// ```text
/// Γ = φ(d₁) / (S * σ * √T)
/// ```
pub fn gamma(params: &OptionParameters) -> BsmResult<f64> {
    Factors::compute(params).and_then(|f| gamma_with(params, &f))
}

/// Theta (∂V/∂t) per calendar day
///
/// # Formula
/// ```text
/// Θ_call = [-S*φ(d₁)*σ/(2√T) - r*K*e^(-rT)*Φ(d₂)] / 365
/// Θ_put  = [-S*φ(d₁)*σ/(2√T) + r*K*e^(-rT)*Φ(-d₂)] / 365
/// ```
pub fn theta(params: &OptionParameters) -> BsmResult<f64> {
    Factors::compute(params).and_then(|f| theta_with(params, &f))
}

/// Vega (∂V/∂σ) per one volatility point, same for calls and puts
///
/// # Formula
/// ```text
/// ν = S * √T * φ(d₁) * 0.01
/// ```
pub fn vega(params: &OptionParameters) -> BsmResult<f64> {
    Factors::compute(params).and_then(|f| vega_with(params, &f))
}

/// Rho (∂V/∂r) per one rate point
///
/// # Formula
/// ```text
/// ρ_call =  K * T * e^(-rT) * Φ(d₂) * 0.01
/// ρ_put  = -K * T * e^(-rT) * Φ(-d₂) * 0.01
/// ```
pub fn rho(params: &OptionParameters) -> BsmResult<f64> {
    Factors::compute(params).and_then(|f| rho_with(params, &f))
}

/// Pass a finite output through, otherwise blame the input that scales it
fn finite_output(quantity: &str, value: f64, parameter: &str, input: f64) -> BsmResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BsmError::invalid_parameter(
            parameter,
            input,
            format!("{} is not finite ({}) for this input", quantity, value),
        ))
    }
}

fn price_with(p: &OptionParameters, f: &Factors) -> BsmResult<f64> {
    let price = match p.kind {
        OptionKind::Call => p.spot * norm_cdf(f.d1) - p.strike * f.discount * norm_cdf(f.d2),
        OptionKind::Put => p.strike * f.discount * norm_cdf(-f.d2) - p.spot * norm_cdf(-f.d1),
    };
    finite_output("price", price, "rate", p.rate)
}

fn delta_with(p: &OptionParameters, f: &Factors) -> f64 {
    match p.kind {
        OptionKind::Call => norm_cdf(f.d1),
        // -Φ(-d₁) keeps precision where Φ(d₁) - 1 would cancel
        OptionKind::Put => -norm_cdf(-f.d1),
    }
}

fn gamma_with(p: &OptionParameters, f: &Factors) -> BsmResult<f64> {
    let gamma = norm_pdf(f.d1) / (p.spot * p.volatility * f.sqrt_t);
    finite_output("gamma", gamma, "volatility", p.volatility)
}

fn theta_with(p: &OptionParameters, f: &Factors) -> BsmResult<f64> {
    let decay = -(p.spot * norm_pdf(f.d1) * p.volatility) / (2.0 * f.sqrt_t);
    let carry = p.rate * p.strike * f.discount;
    let annual = match p.kind {
        OptionKind::Call => decay - carry * norm_cdf(f.d2),
        OptionKind::Put => decay + carry * norm_cdf(-f.d2),
    };
    finite_output("theta", annual / DAYS_PER_YEAR, "time_to_expiry", p.time_to_expiry)
}

fn vega_with(p: &OptionParameters, f: &Factors) -> BsmResult<f64> {
    let vega = p.spot * f.sqrt_t * norm_pdf(f.d1) * PERCENT_POINT;
    finite_output("vega", vega, "time_to_expiry", p.time_to_expiry)
}

fn rho_with(p: &OptionParameters, f: &Factors) -> BsmResult<f64> {
    let exposure = p.strike * p.time_to_expiry * f.discount;
    let rho = match p.kind {
        OptionKind::Call => exposure * norm_cdf(f.d2) * PERCENT_POINT,
        OptionKind::Put => -exposure * norm_cdf(-f.d2) * PERCENT_POINT,
    };
    finite_output("rho", rho, "rate", p.rate)
}
