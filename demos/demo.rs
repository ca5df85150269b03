// demos/demo.rs
use bsm_greeks::analytics::bs_analytic::evaluate;
use bsm_greeks::math_utils::Timer;
use bsm_greeks::option::{OptionKind, OptionParameters};
use bsm_greeks::output;
use bsm_greeks::sweep::curve::{sweep, sweep_par, Quantities, SpotRange};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let csv_path = args.get(1).map(String::as_str);

    let call = OptionParameters::default();
    let put = call.with_kind(OptionKind::Put);

    println!("Black-Scholes-Merton Demo");
    println!("=========================\n");
    println!(
        "S = {}, K = {}, r = {}, T = {}, sigma = {}\n",
        call.spot, call.strike, call.rate, call.time_to_expiry, call.volatility
    );

    let call_result = evaluate(&call).expect("Valid parameters");
    let put_result = evaluate(&put).expect("Valid parameters");

    println!("{:<12} {:>12} {:>12}", "", "Call", "Put");
    println!("{:-<38}", "");
    println!("{:<12} {:>12.4} {:>12.4}", "Price", call_result.price, put_result.price);
    println!("{:<12} {:>12.4} {:>12.4}", "Delta", call_result.delta, put_result.delta);
    println!("{:<12} {:>12.4} {:>12.4}", "Gamma", call_result.gamma, put_result.gamma);
    println!("{:<12} {:>12.4} {:>12.4}", "Theta/day", call_result.theta, put_result.theta);
    println!("{:<12} {:>12.4} {:>12.4}", "Vega/1%", call_result.vega, put_result.vega);
    println!("{:<12} {:>12.4} {:>12.4}", "Rho/1%", call_result.rho, put_result.rho);

    // Put-call parity: C - P = S - K e^(-rT)
    let parity_gap = (call_result.price - put_result.price)
        - (call.spot - call.strike * (-call.rate * call.time_to_expiry).exp());
    println!("\nPut-call parity gap: {:.2e}", parity_gap);

    let range = SpotRange::new(10.0, 90.0).expect("Valid range");
    let points = 81;

    let mut timer = Timer::new();
    timer.start();
    let series = sweep(&call, range, points).expect("Valid sweep");
    let seq_ms = timer.elapsed_ms();

    timer.start();
    let series_par = sweep_par(&call, range, points).expect("Valid sweep");
    let par_ms = timer.elapsed_ms();

    println!(
        "\nSweep over [{}, {}] with {} points: {:.3} ms sequential, {:.3} ms parallel, identical = {}",
        range.low,
        range.high,
        points,
        seq_ms,
        par_ms,
        series == series_par
    );

    println!("\n{:>8} {:>10} {:>10} {:>10}", "Spot", "Price", "Delta", "Gamma");
    for i in (0..series.len()).step_by(10) {
        if let Some((spot, r)) = series.point(i) {
            println!("{:>8.2} {:>10.4} {:>10.4} {:>10.4}", spot, r.price, r.delta, r.gamma);
        }
    }

    if let Some(path) = csv_path {
        match output::write_series_to_csv(path, &series, Quantities::ALL) {
            Ok(()) => println!("\nCurves written to {}", path),
            Err(e) => eprintln!("\nCould not write {}: {}", path, e),
        }
    }
}
