//! # bsm-greeks: Closed-Form Black-Scholes-Merton Pricing and Greeks
//!
//! A Rust library for the theoretical price and risk sensitivities of European
//! vanilla options, plus sensitivity curves of those numbers across spot prices.
//!
//! ## Key Features
//!
//! - **Closed form**: Black-Scholes-Merton price, delta, gamma, theta, vega, rho
//! - **Validated inputs**: invalid parameters fail with a named `InvalidParameter`
//! - **Consistent Greeks**: one shared d₁/d₂ per evaluation feeds every output
//! - **Spot sweeps**: sequential or Rayon-parallel curves with identical results
//!
//! ## Quick Start
//!
//! ```rust
//! use bsm_greeks::analytics::bs_analytic::evaluate;
//! use bsm_greeks::option::{OptionKind, OptionParameters};
//! use bsm_greeks::sweep::curve::{sweep, SpotRange};
//!
//! let params = OptionParameters::new(30.0, 50.0, 0.03, 1.0, 0.30, OptionKind::Call)
//!     .expect("Valid parameters");
//!
//! let result = evaluate(&params).expect("Valid parameters");
//! println!("Price: {:.4}  Delta: {:.4}", result.price, result.delta);
//!
//! let curve = sweep(&params, SpotRange::new(15.0, 45.0).unwrap(), 61).unwrap();
//! assert_eq!(curve.len(), 61);
//! ```
//!
//! ## Units
//!
//! Time is in years, theta is reported per calendar day, vega per one
//! volatility point and rho per one rate point.

pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod option;
pub mod output;
pub mod sweep;

// Re-export commonly used types for convenience
pub use analytics::bs_analytic::{evaluate, EvaluationResult};
pub use error::{BsmError, BsmResult};
pub use option::{OptionKind, OptionParameters};
pub use sweep::curve::{sweep, sweep_par, SensitivitySeries, SpotRange};
