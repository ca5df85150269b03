// tests/greeks_test.rs
use bsm_greeks::analytics::bs_analytic::{self, evaluate};
use bsm_greeks::error::BsmError;
use bsm_greeks::option::{OptionKind, OptionParameters};

fn params(s: f64, k: f64, r: f64, t: f64, sigma: f64, kind: OptionKind) -> OptionParameters {
    OptionParameters::new(s, k, r, t, sigma, kind).expect("Valid parameters")
}

fn assert_rel(actual: f64, expected: f64, tol: f64, label: &str) {
    let rel_error = (actual - expected).abs() / expected.abs();
    assert!(
        rel_error < tol,
        "Relative error for {} exceeds tolerance: {} (actual {}, expected {})",
        label,
        rel_error,
        actual,
        expected
    );
}

#[test]
fn test_call_at_the_money_reference_values() {
    let result = evaluate(&params(100.0, 100.0, 0.05, 1.0, 0.20, OptionKind::Call)).unwrap();

    assert_rel(result.price, 10.450_583_572_185_565, 1e-10, "price");
    assert_rel(result.delta, 0.636_830_651_175_619_1, 1e-10, "delta");
    assert_rel(result.gamma, 0.018_762_017_345_846_895, 1e-10, "gamma");
    assert_rel(result.theta, -0.017_572_678_209_419_72, 1e-10, "theta");
    assert_rel(result.vega, 0.375_240_346_916_937_9, 1e-10, "vega");
    assert_rel(result.rho, 0.532_324_815_453_763_4, 1e-10, "rho");
}

#[test]
fn test_put_at_the_money_reference_values() {
    let result = evaluate(&params(100.0, 100.0, 0.05, 1.0, 0.20, OptionKind::Put)).unwrap();

    assert_rel(result.price, 5.573_526_022_256_971, 1e-10, "price");
    assert_rel(result.delta, -0.363_169_348_824_380_9, 1e-10, "delta");
    assert_rel(result.gamma, 0.018_762_017_345_846_895, 1e-10, "gamma");
    assert_rel(result.theta, -0.004_542_138_147_766_099, 1e-10, "theta");
    assert_rel(result.vega, 0.375_240_346_916_937_9, 1e-10, "vega");
    assert_rel(result.rho, -0.418_904_609_046_950_6, 1e-10, "rho");
}

#[test]
fn test_default_scenario_call() {
    // S=30, K=50, r=3%, T=1y, sigma=30%
    let result = evaluate(&OptionParameters::default()).unwrap();

    println!("\nPrice: {:.4}", result.price);
    println!("Delta: {:.4}", result.delta);
    println!("Gamma: {:.4}", result.gamma);
    println!("Theta: {:.4}", result.theta);
    println!("Vega:  {:.4}", result.vega);
    println!("Rho:   {:.4}", result.rho);

    assert_rel(result.price, 0.262_121_042_642_205_15, 1e-9, "price");
    assert_rel(result.delta, 0.073_146_300_738_732_8, 1e-9, "delta");
    assert_rel(result.gamma, 0.015_430_527_718_529_75, 1e-9, "gamma");
    assert_rel(result.theta, -0.001_870_970_991_742_598, 1e-9, "theta");
    assert_rel(result.vega, 0.041_662_424_840_030_33, 1e-9, "vega");
    assert_rel(result.rho, 0.019_322_679_795_197_79, 1e-9, "rho");
}

#[test]
fn test_default_scenario_put() {
    let put = OptionParameters::default().with_kind(OptionKind::Put);
    let result = evaluate(&put).unwrap();

    assert_rel(result.price, 18.784_397_720_067_613, 1e-10, "price");
    assert_rel(result.delta, -0.926_853_699_261_267_3, 1e-10, "delta");
    assert_rel(result.theta, 0.002_117_161_337_908_805, 1e-9, "theta");
    assert_rel(result.rho, -0.465_900_086_979_056_3, 1e-10, "rho");
}

#[test]
fn test_put_call_parity_scenarios() {
    let scenarios = [
        (30.0, 50.0, 0.03, 1.0, 0.30),
        (100.0, 100.0, 0.05, 1.0, 0.20),
        (100.0, 80.0, -0.01, 0.25, 0.45),
        (42.0, 40.0, 0.10, 0.5, 0.20),
        (1.0, 1000.0, 0.02, 3.0, 0.9),
    ];

    for (s, k, r, t, sigma) in scenarios {
        let call = evaluate(&params(s, k, r, t, sigma, OptionKind::Call)).unwrap();
        let put = evaluate(&params(s, k, r, t, sigma, OptionKind::Put)).unwrap();
        let forward_gap = s - k * (-r * t).exp();
        let scale = s.max(k);

        let parity_error = ((call.price - put.price) - forward_gap).abs() / scale;
        assert!(parity_error < 1e-6, "Parity broken for S={} K={}: {}", s, k, parity_error);

        // Greeks of the parity identity
        assert!((call.delta - put.delta - 1.0).abs() < 1e-12);
        assert_eq!(call.gamma, put.gamma);
        assert_eq!(call.vega, put.vega);
    }
}

#[test]
fn test_deep_in_the_money_call_converges() {
    let p = params(1e6, 50.0, 0.03, 1.0, 0.30, OptionKind::Call);
    let result = evaluate(&p).unwrap();
    let intrinsic = p.spot - p.strike * (-p.rate * p.time_to_expiry).exp();

    assert!((result.delta - 1.0).abs() < 1e-12);
    assert_rel(result.price, intrinsic, 1e-12, "price");
    assert!(result.gamma >= 0.0 && result.gamma < 1e-12);
    assert!(result.vega >= 0.0 && result.vega < 1e-12);
    assert!(result.price.is_finite() && result.theta.is_finite() && result.rho.is_finite());
}

#[test]
fn test_deep_out_of_the_money_converges() {
    let call = evaluate(&params(1e-6, 50.0, 0.03, 1.0, 0.30, OptionKind::Call)).unwrap();
    let put_params = params(1e-6, 50.0, 0.03, 1.0, 0.30, OptionKind::Put);
    let put = evaluate(&put_params).unwrap();
    let discounted_strike = 50.0 * (-0.03f64).exp();

    assert!(call.price >= 0.0 && call.price < 1e-12);
    assert!(call.delta >= 0.0 && call.delta < 1e-12);
    assert!((put.price - discounted_strike).abs() < 1e-5);
    assert!((put.delta + 1.0).abs() < 1e-12);
    assert!(put.gamma >= 0.0 && put.vega >= 0.0);
}

#[test]
fn test_delta_matches_finite_difference_of_price() {
    let p = params(100.0, 95.0, 0.04, 0.75, 0.25, OptionKind::Put);
    let h = 1e-4;
    let up = bs_analytic::price(&p.with_spot(p.spot + h)).unwrap();
    let down = bs_analytic::price(&p.with_spot(p.spot - h)).unwrap();
    let fd_delta = (up - down) / (2.0 * h);
    let fd_gamma = (up - 2.0 * bs_analytic::price(&p).unwrap() + down) / (h * h);

    let result = evaluate(&p).unwrap();
    assert!((fd_delta - result.delta).abs() < 1e-7, "FD delta {} vs {}", fd_delta, result.delta);
    assert!((fd_gamma - result.gamma).abs() < 1e-4, "FD gamma {} vs {}", fd_gamma, result.gamma);
}

#[test]
fn test_vega_and_rho_match_finite_difference() {
    let p = params(100.0, 110.0, 0.03, 2.0, 0.35, OptionKind::Call);
    let h = 1e-5;
    let result = evaluate(&p).unwrap();

    let vol_up = OptionParameters { volatility: p.volatility + h, ..p };
    let vol_down = OptionParameters { volatility: p.volatility - h, ..p };
    let fd_vega = (bs_analytic::price(&vol_up).unwrap() - bs_analytic::price(&vol_down).unwrap())
        / (2.0 * h)
        * 0.01;
    assert!((fd_vega - result.vega).abs() < 1e-6, "FD vega {} vs {}", fd_vega, result.vega);

    let rate_up = OptionParameters { rate: p.rate + h, ..p };
    let rate_down = OptionParameters { rate: p.rate - h, ..p };
    let fd_rho = (bs_analytic::price(&rate_up).unwrap() - bs_analytic::price(&rate_down).unwrap())
        / (2.0 * h)
        * 0.01;
    assert!((fd_rho - result.rho).abs() < 1e-6, "FD rho {} vs {}", fd_rho, result.rho);
}

#[test]
fn test_theta_matches_calendar_decay() {
    // Theta is -dV/dT scaled to one calendar day
    let p = params(100.0, 100.0, 0.05, 1.0, 0.20, OptionKind::Call);
    let h = 1e-5;
    let shorter = OptionParameters { time_to_expiry: p.time_to_expiry - h, ..p };
    let longer = OptionParameters { time_to_expiry: p.time_to_expiry + h, ..p };
    let dv_dt = (bs_analytic::price(&longer).unwrap() - bs_analytic::price(&shorter).unwrap())
        / (2.0 * h);

    let result = evaluate(&p).unwrap();
    assert!((-dv_dt / 365.0 - result.theta).abs() < 1e-8);
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let base = OptionParameters::default();
    let cases = [
        (OptionParameters { time_to_expiry: 0.0, ..base }, "time_to_expiry"),
        (OptionParameters { volatility: 0.0, ..base }, "volatility"),
        (OptionParameters { spot: 0.0, ..base }, "spot"),
        (OptionParameters { strike: -10.0, ..base }, "strike"),
        (OptionParameters { time_to_expiry: -1.0, ..base }, "time_to_expiry"),
        (OptionParameters { rate: f64::INFINITY, ..base }, "rate"),
        (OptionParameters { spot: f64::NAN, ..base }, "spot"),
    ];

    for (p, field) in cases {
        let err = evaluate(&p).expect_err("Invalid parameters must fail");
        assert_eq!(err.parameter(), field);

        // Every single-quantity entry point rejects the same input
        assert!(bs_analytic::price(&p).is_err());
        assert!(bs_analytic::delta(&p).is_err());
        assert!(bs_analytic::gamma(&p).is_err());
        assert!(bs_analytic::theta(&p).is_err());
        assert!(bs_analytic::vega(&p).is_err());
        assert!(bs_analytic::rho(&p).is_err());
    }
}

#[test]
fn test_overflowing_discount_is_rejected() {
    // e^(-rT) = e^800 overflows although every field is finite
    for kind in [OptionKind::Call, OptionKind::Put] {
        let p = params(30.0, 50.0, -800.0, 1.0, 0.30, kind);
        let err = evaluate(&p).expect_err("Overflowing discount must fail");
        assert_eq!(err.parameter(), "rate");
        assert!(bs_analytic::price(&p).is_err());
        assert!(bs_analytic::theta(&p).is_err());
        assert!(bs_analytic::rho(&p).is_err());
    }
}

#[test]
fn test_subnormal_volatility_gamma_overflow_is_rejected() {
    // At the money d₁ = 0, so gamma = φ(0) / (S σ √T) exceeds f64::MAX
    let p = params(100.0, 100.0, 0.0, 1.0, 1e-320, OptionKind::Call);
    let err = evaluate(&p).expect_err("Gamma overflow must fail");
    assert_eq!(err.parameter(), "volatility");
    assert_eq!(bs_analytic::gamma(&p).unwrap_err(), err);

    // One order of magnitude up, gamma is huge but representable
    let result = evaluate(&params(100.0, 100.0, 0.0, 1.0, 1e-310, OptionKind::Call)).unwrap();
    assert!(result.gamma.is_finite() && result.gamma > 1e307);
}

fn assert_finite_or_rejected(p: &OptionParameters) {
    match evaluate(p) {
        Ok(r) => {
            for value in [r.price, r.delta, r.gamma, r.theta, r.vega, r.rho] {
                assert!(value.is_finite(), "Non-finite output {:?} for {:?}", r, p);
            }
        }
        Err(BsmError::InvalidParameter { parameter, .. }) => {
            assert!(
                ["rate", "volatility", "time_to_expiry"].contains(&parameter.as_str()),
                "Unexpected parameter {} for {:?}",
                parameter,
                p
            );
        }
    }
}

#[test]
fn test_extreme_magnitudes_saturate_or_fail() {
    let base = OptionParameters::default();
    let cases = [
        OptionParameters { volatility: 1e-300, ..base },
        OptionParameters { time_to_expiry: 1e-300, ..base },
        OptionParameters { volatility: 1e-300, time_to_expiry: 1e-300, ..base },
        OptionParameters { rate: 800.0, ..base },
        OptionParameters { rate: -800.0, ..base },
        OptionParameters { rate: 8.0, time_to_expiry: 100.0, ..base },
        OptionParameters { rate: -8.0, time_to_expiry: 100.0, ..base },
        OptionParameters { spot: 1e300, strike: 1.0, ..base },
        OptionParameters { spot: 1.0, strike: 1e300, ..base },
        OptionParameters { volatility: 1e200, ..base },
        OptionParameters { time_to_expiry: 1e300, ..base },
    ];

    for p in cases {
        assert_finite_or_rejected(&p);
        assert_finite_or_rejected(&p.with_kind(OptionKind::Put));
    }
}

#[test]
fn test_near_zero_volatility_saturates_to_forward_intrinsic() {
    // S=30 < K e^(-rT), so the call is worthless and the put is K e^(-rT) - S
    let p = OptionParameters { volatility: 1e-300, ..OptionParameters::default() };
    let call = evaluate(&p).unwrap();
    let put = evaluate(&p.with_kind(OptionKind::Put)).unwrap();

    assert_eq!(call.price, 0.0);
    assert_eq!(call.delta, 0.0);
    assert_eq!(call.gamma, 0.0);
    assert_rel(put.price, 50.0 * (-0.03f64).exp() - 30.0, 1e-12, "put price");
    assert_eq!(put.delta, -1.0);
    assert_eq!(put.vega, 0.0);
}

#[test]
fn test_near_zero_time_saturates_to_intrinsic() {
    let p = OptionParameters { time_to_expiry: 1e-300, ..OptionParameters::default() };
    let call = evaluate(&p).unwrap();
    let put = evaluate(&p.with_kind(OptionKind::Put)).unwrap();

    assert_eq!(call.price, 0.0);
    assert_rel(put.price, 20.0, 1e-12, "put price");
    assert_eq!(put.delta, -1.0);
    assert!(call.theta.is_finite() && put.theta.is_finite());
}

#[test]
fn test_vanishing_discount_saturates() {
    // e^(-800) underflows to zero: the call is worth the spot, the put nothing
    let p = params(30.0, 50.0, 800.0, 1.0, 0.30, OptionKind::Call);
    let call = evaluate(&p).unwrap();
    let put = evaluate(&p.with_kind(OptionKind::Put)).unwrap();

    assert_rel(call.price, 30.0, 1e-12, "call price");
    assert_eq!(call.delta, 1.0);
    assert_eq!(call.rho, 0.0);
    assert_eq!(put.price, 0.0);
    assert!(put.theta.is_finite() && put.rho.is_finite());
}

#[test]
fn test_extreme_moneyness_saturates() {
    let call = evaluate(&params(1e300, 1.0, 0.03, 1.0, 0.30, OptionKind::Call)).unwrap();
    assert_rel(call.price, 1e300, 1e-12, "call price");
    assert_eq!(call.delta, 1.0);
    assert_eq!(call.gamma, 0.0);
    assert_eq!(call.vega, 0.0);

    let put = evaluate(&params(1e300, 1.0, 0.03, 1.0, 0.30, OptionKind::Put)).unwrap();
    assert_eq!(put.price, 0.0);
    assert!(put.theta.is_finite() && put.rho.is_finite());
}
