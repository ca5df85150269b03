// src/output.rs
use crate::analytics::bs_analytic::EvaluationResult;
use crate::option::OptionParameters;
use crate::sweep::curve::{Quantities, SensitivitySeries};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Write a sensitivity series as CSV, one row per spot, selected columns only
pub fn write_series_csv<W: Write>(
    mut out: W,
    series: &SensitivitySeries,
    columns: Quantities,
) -> io::Result<()> {
    let selected: Vec<(&[f64], &str)> = Quantities::NAMED
        .iter()
        .filter(|(flag, _)| columns.contains(*flag))
        .filter_map(|(flag, name)| series.column(*flag).map(|col| (col, *name)))
        .collect();

    write!(out, "spot")?;
    for (_, name) in &selected {
        write!(out, ",{}", name)?;
    }
    writeln!(out)?;

    for (i, spot) in series.spot_prices.iter().enumerate() {
        write!(out, "{}", spot)?;
        for (col, _) in &selected {
            write!(out, ",{}", col[i])?;
        }
        writeln!(out)?;
    }
    out.flush()
}

pub fn write_series_to_csv(
    filename: &str,
    series: &SensitivitySeries,
    columns: Quantities,
) -> io::Result<()> {
    let file = File::create(filename)?;
    write_series_csv(BufWriter::new(file), series, columns)
}

/// Key/value rows describing one evaluation and its inputs
pub fn summary_rows(params: &OptionParameters, result: &EvaluationResult) -> Vec<(String, String)> {
    vec![
        ("kind".to_string(), params.kind.to_string()),
        ("spot".to_string(), params.spot.to_string()),
        ("strike".to_string(), params.strike.to_string()),
        ("rate".to_string(), params.rate.to_string()),
        ("time_to_expiry".to_string(), params.time_to_expiry.to_string()),
        ("volatility".to_string(), params.volatility.to_string()),
        ("price".to_string(), result.price.to_string()),
        ("delta".to_string(), result.delta.to_string()),
        ("gamma".to_string(), result.gamma.to_string()),
        ("theta".to_string(), result.theta.to_string()),
        ("vega".to_string(), result.vega.to_string()),
        ("rho".to_string(), result.rho.to_string()),
    ]
}

pub fn write_summary_csv<W: Write>(mut out: W, summary_data: &[(String, String)]) -> io::Result<()> {
    for (key, value) in summary_data {
        writeln!(out, "{},{}", key, value)?;
    }
    out.flush()
}

pub fn write_summary_to_csv(filename: &str, summary_data: &[(String, String)]) -> io::Result<()> {
    let file = File::create(filename)?;
    write_summary_csv(BufWriter::new(file), summary_data)
}
