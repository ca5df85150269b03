use bsm_greeks::analytics::bs_analytic::evaluate;
use bsm_greeks::math_utils::Timer;
use bsm_greeks::option::{OptionKind, OptionParameters};
use bsm_greeks::sweep::curve::{sweep, sweep_par, SpotRange};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    evaluations: usize,
    time_ms: f64,
    throughput_evals_per_sec: f64,
    checksum: f64,
}

impl BenchmarkResult {
    fn new(name: String, evaluations: usize, time_ms: f64, checksum: f64) -> Self {
        Self {
            name,
            evaluations,
            time_ms,
            throughput_evals_per_sec: evaluations as f64 / (time_ms / 1000.0),
            checksum,
        }
    }
}

fn run_single_evaluation_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let n = 1_000_000;

    for kind in [OptionKind::Call, OptionKind::Put] {
        println!("Timing {} single {} evaluations...", n, kind);
        let base = OptionParameters {
            spot: 100.0,
            strike: 100.0,
            rate: 0.05,
            time_to_expiry: 1.0,
            volatility: 0.2,
            kind,
        };

        let mut timer = Timer::new();
        timer.start();
        let mut checksum = 0.0;
        for i in 0..n {
            // Vary spot so the loop cannot be folded into one evaluation
            let params = base.with_spot(50.0 + (i % 1000) as f64 * 0.1);
            if let Ok(result) = evaluate(&params) {
                checksum += result.price + result.delta;
            }
        }
        let time_ms = timer.elapsed_ms();

        results.push(BenchmarkResult::new(
            format!("Evaluate {}", kind),
            n,
            time_ms,
            checksum,
        ));
    }

    results
}

fn run_sweep_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let params = OptionParameters {
        spot: 100.0,
        strike: 100.0,
        rate: 0.05,
        time_to_expiry: 1.0,
        volatility: 0.2,
        kind: OptionKind::Call,
    };
    let range = SpotRange {
        low: 50.0,
        high: 150.0,
    };

    for &points in &[1_000, 100_000, 1_000_000] {
        println!("Benchmarking sweeps with {} points...", points);

        let mut timer = Timer::new();
        timer.start();
        let sequential = sweep(&params, range, points);
        let seq_ms = timer.elapsed_ms();

        timer.start();
        let parallel = sweep_par(&params, range, points);
        let par_ms = timer.elapsed_ms();

        match (sequential, parallel) {
            (Ok(seq), Ok(par)) => {
                if seq != par {
                    eprintln!("WARNING!: sequential and parallel sweeps differ at {} points", points);
                }
                let checksum = seq.price.iter().sum::<f64>();
                results.push(BenchmarkResult::new(
                    format!("Sweep sequential ({}k)", points / 1000),
                    points,
                    seq_ms,
                    checksum,
                ));
                results.push(BenchmarkResult::new(
                    format!("Sweep parallel ({}k)", points / 1000),
                    points,
                    par_ms,
                    par.price.iter().sum::<f64>(),
                ));
            }
            (Err(e), _) | (_, Err(e)) => eprintln!("Sweep with {} points failed: {}", points, e),
        }
    }

    results
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);

    // System information as comments
    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(file, "Benchmark,Evaluations,Time_ms,Throughput_evals_per_sec,Checksum")?;
    for result in results {
        writeln!(
            file,
            "{},{},{:.2},{:.0},{:.6}",
            result.name,
            result.evaluations,
            result.time_ms,
            result.throughput_evals_per_sec,
            result.checksum
        )?;
    }
    file.flush()
}

fn main() -> io::Result<()> {
    println!("bsm-greeks Benchmark Suite");
    println!("==========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let mut all_results = run_single_evaluation_benchmarks();
    all_results.extend(run_sweep_benchmarks());

    println!("\n{:=<80}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<80}", "");
    println!(
        "{:<30} {:>12} {:>12} {:>18}",
        "Benchmark", "Evaluations", "Time (ms)", "Throughput (/s)"
    );
    println!("{:-<80}", "");
    for result in &all_results {
        println!(
            "{:<30} {:>12} {:>12.2} {:>18.0}",
            result.name, result.evaluations, result.time_ms, result.throughput_evals_per_sec
        );
    }
    println!("{:=<80}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    write_results_to_csv(&all_results, &system_info, &filename)?;

    println!("\nResults saved to: {}", filename);
    println!("Run: cargo run --bin benchmark --release");
    Ok(())
}
