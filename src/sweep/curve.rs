// src/sweep/curve.rs
//! Spot sensitivity curves
//!
//! A sweep re-prices one contract over an evenly spaced grid of spot prices,
//! holding strike, rate, time, volatility and kind fixed. Each grid point is
//! an independent call to [`evaluate`], so the sequential and parallel
//! versions return identical numbers in identical order.
//!
//! A sweep is all-or-nothing: the first invalid point aborts it with that
//! point's error.

use crate::analytics::bs_analytic::{evaluate, EvaluationResult};
use crate::error::{validation::*, BsmError, BsmResult};
use crate::option::OptionParameters;
use bitflags::bitflags;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

bitflags! {
    /// Selection of output quantities, e.g. the columns of a curve export
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Quantities: u32 {
        const PRICE = 1 << 0;
        const DELTA = 1 << 1;
        const GAMMA = 1 << 2;
        const THETA = 1 << 3;
        const VEGA  = 1 << 4;
        const RHO   = 1 << 5;
        const ALL = Self::PRICE.bits()
            | Self::DELTA.bits()
            | Self::GAMMA.bits()
            | Self::THETA.bits()
            | Self::VEGA.bits()
            | Self::RHO.bits();
    }
}

impl Quantities {
    /// Single quantities in output order with their column names
    pub const NAMED: [(Quantities, &'static str); 6] = [
        (Quantities::PRICE, "price"),
        (Quantities::DELTA, "delta"),
        (Quantities::GAMMA, "gamma"),
        (Quantities::THETA, "theta"),
        (Quantities::VEGA, "vega"),
        (Quantities::RHO, "rho"),
    ];

    /// Parse a comma-separated list such as `"price,delta"` or `"all"`
    pub fn parse_list(list: &str) -> BsmResult<Self> {
        let mut selected = Quantities::empty();
        for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let token = token.to_ascii_lowercase();
            if token == "all" {
                selected |= Quantities::ALL;
                continue;
            }
            let flag = Self::NAMED
                .iter()
                .find(|(_, name)| *name == token)
                .map(|(flag, _)| *flag)
                .ok_or_else(|| {
                    BsmError::invalid_parameter(
                        "columns",
                        format!("'{}'", token),
                        "must be one of price, delta, gamma, theta, vega, rho, all",
                    )
                })?;
            selected |= flag;
        }
        if selected.is_empty() {
            return Err(BsmError::invalid_parameter(
                "columns",
                format!("'{}'", list),
                "must select at least one quantity",
            ));
        }
        Ok(selected)
    }
}

/// Closed interval of spot prices to sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotRange {
    pub low: f64,
    pub high: f64,
}

impl SpotRange {
    /// Build a range, requiring finite bounds with `low < high`
    ///
    /// Bounds are not required to be positive here: a non-positive point is
    /// rejected by the engine when the sweep reaches it.
    pub fn new(low: f64, high: f64) -> BsmResult<Self> {
        let range = SpotRange { low, high };
        range.validate()?;
        Ok(range)
    }

    /// Range of `spot * (1 ± width)`, with `0 < width < 1`
    pub fn around(spot: f64, width: f64) -> BsmResult<Self> {
        validate_positive("spot", spot)?;
        validate_width("width", width)?;
        Self::new(spot * (1.0 - width), spot * (1.0 + width))
    }

    pub fn validate(&self) -> BsmResult<()> {
        validate_finite("low", self.low)?;
        validate_finite("high", self.high)?;
        if self.low >= self.high {
            return Err(BsmError::invalid_parameter(
                "low",
                self.low,
                format!("must be strictly below high ({})", self.high),
            ));
        }
        Ok(())
    }

    /// Evenly spaced grid of `point_count` spots, both ends included exactly
    pub fn grid(&self, point_count: usize) -> BsmResult<Vec<f64>> {
        self.validate()?;
        validate_point_count(point_count)?;

        let last = point_count - 1;
        let step = (self.high - self.low) / last as f64;
        let spots: Vec<f64> = (0..point_count)
            .map(|i| if i == last { self.high } else { self.low + step * i as f64 })
            .collect();

        if spots.windows(2).any(|w| w[0] >= w[1]) {
            return Err(BsmError::invalid_parameter(
                "point_count",
                point_count,
                format!(
                    "too many points to stay strictly increasing over [{}, {}]",
                    self.low, self.high
                ),
            ));
        }
        Ok(spots)
    }
}

/// Sweep settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    pub range: SpotRange,
    pub point_count: usize,
    /// Evaluate points on the rayon pool
    pub parallel: bool,
}

impl SweepConfig {
    /// ±`width` around the reference spot
    pub fn around(params: &OptionParameters, width: f64, point_count: usize) -> BsmResult<Self> {
        let config = SweepConfig {
            range: SpotRange::around(params.spot, width)?,
            point_count,
            parallel: false,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BsmResult<()> {
        self.range.validate()?;
        validate_point_count(self.point_count)
    }
}

impl Default for SweepConfig {
    /// ±50% around the default spot of 30, 100 points
    fn default() -> Self {
        SweepConfig {
            range: SpotRange {
                low: 15.0,
                high: 45.0,
            },
            point_count: 100,
            parallel: false,
        }
    }
}

/// Price and Greeks along a spot grid, stored column-wise
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensitivitySeries {
    pub spot_prices: Vec<f64>,
    pub price: Vec<f64>,
    pub delta: Vec<f64>,
    pub gamma: Vec<f64>,
    pub theta: Vec<f64>,
    pub vega: Vec<f64>,
    pub rho: Vec<f64>,
}

impl SensitivitySeries {
    fn with_capacity(n: usize) -> Self {
        SensitivitySeries {
            spot_prices: Vec::with_capacity(n),
            price: Vec::with_capacity(n),
            delta: Vec::with_capacity(n),
            gamma: Vec::with_capacity(n),
            theta: Vec::with_capacity(n),
            vega: Vec::with_capacity(n),
            rho: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, spot: f64, r: &EvaluationResult) {
        self.spot_prices.push(spot);
        self.price.push(r.price);
        self.delta.push(r.delta);
        self.gamma.push(r.gamma);
        self.theta.push(r.theta);
        self.vega.push(r.vega);
        self.rho.push(r.rho);
    }

    fn from_points(spots: &[f64], results: &[EvaluationResult]) -> Self {
        let mut series = Self::with_capacity(spots.len());
        for (spot, result) in spots.iter().zip(results) {
            series.push(*spot, result);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.spot_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spot_prices.is_empty()
    }

    /// Spot and full result at grid index `i`
    pub fn point(&self, i: usize) -> Option<(f64, EvaluationResult)> {
        let spot = *self.spot_prices.get(i)?;
        Some((
            spot,
            EvaluationResult {
                price: self.price[i],
                delta: self.delta[i],
                gamma: self.gamma[i],
                theta: self.theta[i],
                vega: self.vega[i],
                rho: self.rho[i],
            },
        ))
    }

    /// Column of a single quantity; `None` for empty or combined selections
    pub fn column(&self, quantity: Quantities) -> Option<&[f64]> {
        let column = if quantity == Quantities::PRICE {
            &self.price
        } else if quantity == Quantities::DELTA {
            &self.delta
        } else if quantity == Quantities::GAMMA {
            &self.gamma
        } else if quantity == Quantities::THETA {
            &self.theta
        } else if quantity == Quantities::VEGA {
            &self.vega
        } else if quantity == Quantities::RHO {
            &self.rho
        } else {
            return None;
        };
        Some(column)
    }
}

/// Sequential spot sweep
///
/// # Errors
///
/// `InvalidParameter` for a bad range or point count, or the error of the
/// first grid point the engine rejects (e.g. a non-positive spot).
pub fn sweep(
    params: &OptionParameters,
    range: SpotRange,
    point_count: usize,
) -> BsmResult<SensitivitySeries> {
    let spots = range.grid(point_count)?;
    debug!(points = point_count, low = range.low, high = range.high, "spot sweep");

    let mut series = SensitivitySeries::with_capacity(spots.len());
    for &spot in &spots {
        let result = evaluate(&params.with_spot(spot)).map_err(|err| {
            debug!(spot, %err, "spot sweep aborted");
            err
        })?;
        series.push(spot, &result);
    }
    Ok(series)
}

/// Parallel spot sweep on the rayon pool
///
/// Same grid, same numbers and same ordering as [`sweep`].
pub fn sweep_par(
    params: &OptionParameters,
    range: SpotRange,
    point_count: usize,
) -> BsmResult<SensitivitySeries> {
    let spots = range.grid(point_count)?;
    debug!(
        points = point_count,
        low = range.low,
        high = range.high,
        threads = rayon::current_num_threads(),
        "parallel spot sweep"
    );

    let results = spots
        .par_iter()
        .map(|&spot| evaluate(&params.with_spot(spot)))
        .collect::<BsmResult<Vec<_>>>()
        .map_err(|err| {
            debug!(%err, "parallel spot sweep aborted");
            err
        })?;

    Ok(SensitivitySeries::from_points(&spots, &results))
}

/// Run a sweep described by a [`SweepConfig`]
pub fn run_sweep(params: &OptionParameters, config: &SweepConfig) -> BsmResult<SensitivitySeries> {
    config.validate()?;
    if config.parallel {
        sweep_par(params, config.range, config.point_count)
    } else {
        sweep(params, config.range, config.point_count)
    }
}
