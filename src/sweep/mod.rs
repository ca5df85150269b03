pub mod curve;

pub use curve::{run_sweep, sweep, sweep_par, Quantities, SensitivitySeries, SpotRange, SweepConfig};
