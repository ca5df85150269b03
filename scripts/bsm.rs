//! bsm - command line front end for the Black-Scholes engine
//!
//! # Commands
//!
//! - `bsm price` - price and Greeks of one option
//! - `bsm sweep` - price and Greeks across a spot range, as a table, JSON or CSV

use anyhow::{Context, Result};
use bsm_greeks::analytics::bs_analytic::{evaluate, EvaluationResult};
use bsm_greeks::option::{OptionKind, OptionParameters};
use bsm_greeks::output::{summary_rows, write_series_csv, write_series_to_csv, write_summary_csv};
use bsm_greeks::sweep::curve::{run_sweep, Quantities, SensitivitySeries, SpotRange, SweepConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Black-Scholes-Merton option price and Greeks
#[derive(Parser)]
#[command(name = "bsm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one option and report its Greeks
    Price {
        #[command(flatten)]
        option: OptionArgs,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Evaluate price and Greeks across a range of spot prices
    Sweep {
        #[command(flatten)]
        option: OptionArgs,

        /// Lowest spot of the sweep (default: 50% below --spot)
        #[arg(long, allow_negative_numbers = true)]
        low: Option<f64>,

        /// Highest spot of the sweep (default: 50% above --spot)
        #[arg(long, allow_negative_numbers = true)]
        high: Option<f64>,

        /// Number of evenly spaced spots, ends included
        #[arg(short = 'n', long, default_value_t = 100)]
        points: usize,

        /// Evaluate points in parallel
        #[arg(long)]
        parallel: bool,

        /// Comma-separated quantities: price,delta,gamma,theta,vega,rho or all
        #[arg(long, default_value = "all")]
        columns: String,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Write CSV output to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// Underlying asset price (S)
    #[arg(short = 's', long, default_value_t = 30.0)]
    spot: f64,

    /// Strike price (K)
    #[arg(short = 'k', long, default_value_t = 50.0)]
    strike: f64,

    /// Continuously compounded risk-free rate (r)
    #[arg(short = 'r', long, default_value_t = 0.03, allow_negative_numbers = true)]
    rate: f64,

    /// Time to expiry in years (T)
    #[arg(short = 't', long, default_value_t = 1.0, conflicts_with = "days")]
    time: f64,

    /// Time to expiry in calendar days, instead of --time
    #[arg(long)]
    days: Option<f64>,

    /// Annualized volatility (sigma)
    #[arg(long = "vol", default_value_t = 0.30)]
    volatility: f64,

    /// Option kind: c, call, p or put
    #[arg(long, default_value_t = OptionKind::Call)]
    kind: OptionKind,
}

impl OptionArgs {
    fn to_params(&self) -> Result<OptionParameters> {
        let params = match self.days {
            Some(days) => OptionParameters::from_days(
                self.spot,
                self.strike,
                self.rate,
                days,
                self.volatility,
                self.kind,
            )?,
            None => OptionParameters::new(
                self.spot,
                self.strike,
                self.rate,
                self.time,
                self.volatility,
                self.kind,
            )?,
        };
        Ok(params)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Price { option, format } => run_price(&option, format),
        Commands::Sweep {
            option,
            low,
            high,
            points,
            parallel,
            columns,
            format,
            output,
        } => {
            let params = option.to_params()?;
            let range = match (low, high) {
                (None, None) => SpotRange::around(params.spot, 0.5)?,
                (low, high) => SpotRange::new(
                    low.unwrap_or(params.spot * 0.5),
                    high.unwrap_or(params.spot * 1.5),
                )?,
            };
            let config = SweepConfig {
                range,
                point_count: points,
                parallel,
            };
            let columns = Quantities::parse_list(&columns)?;
            run_sweep_command(&params, &config, columns, format, output.as_deref())
        }
    }
}

fn run_price(option: &OptionArgs, format: Format) -> Result<()> {
    let params = option.to_params()?;
    debug!(?params, "pricing");
    let result = evaluate(&params)?;

    match format {
        Format::Table => print_result_table(&params, &result),
        Format::Json => {
            let json = serde_json::json!({ "parameters": params, "result": result });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Format::Csv => write_summary_csv(io::stdout().lock(), &summary_rows(&params, &result))?,
    }
    Ok(())
}

fn run_sweep_command(
    params: &OptionParameters,
    config: &SweepConfig,
    columns: Quantities,
    format: Format,
    output: Option<&str>,
) -> Result<()> {
    info!(
        low = config.range.low,
        high = config.range.high,
        points = config.point_count,
        parallel = config.parallel,
        "Starting sweep"
    );
    let series = run_sweep(params, config)?;

    if let Some(path) = output {
        write_series_to_csv(path, &series, columns)
            .with_context(|| format!("writing sweep to {}", path))?;
        info!("Sweep written to {}", path);
        return Ok(());
    }

    match format {
        Format::Table => print_series_table(&series, columns),
        Format::Json => println!("{}", serde_json::to_string_pretty(&series)?),
        Format::Csv => write_series_csv(io::stdout().lock(), &series, columns)?,
    }
    Ok(())
}

fn print_result_table(params: &OptionParameters, result: &EvaluationResult) {
    println!(
        "European {} S={} K={} r={} T={} sigma={}",
        params.kind, params.spot, params.strike, params.rate, params.time_to_expiry, params.volatility
    );
    println!("{:-<32}", "");
    println!("{:<12} {:>18.4}", "Price", result.price);
    println!("{:<12} {:>18.4}", "Delta", result.delta);
    println!("{:<12} {:>18.4}", "Gamma", result.gamma);
    println!("{:<12} {:>18.4}", "Theta/day", result.theta);
    println!("{:<12} {:>18.4}", "Vega/1%", result.vega);
    println!("{:<12} {:>18.4}", "Rho/1%", result.rho);
}

fn print_series_table(series: &SensitivitySeries, columns: Quantities) {
    let selected: Vec<_> = Quantities::NAMED
        .iter()
        .filter(|(flag, _)| columns.contains(*flag))
        .collect();

    print!("{:>12}", "spot");
    for (_, name) in &selected {
        print!(" {:>12}", name);
    }
    println!();

    for i in 0..series.len() {
        print!("{:>12.4}", series.spot_prices[i]);
        for (flag, _) in &selected {
            if let Some(col) = series.column(*flag) {
                print!(" {:>12.4}", col[i]);
            }
        }
        println!();
    }
}
