// demos/error_handling_demo.rs
use bsm_greeks::analytics::bs_analytic::evaluate;
use bsm_greeks::error::BsmError;
use bsm_greeks::option::{OptionKind, OptionParameters};
use bsm_greeks::sweep::curve::{sweep, SpotRange, SweepConfig};

fn main() {
    println!("Error Handling Demo for bsm-greeks");
    println!("==================================\n");

    let base = OptionParameters::default();

    // 1-4: each boundary the closed form cannot cross
    let invalid = [
        ("expired option (T = 0)", OptionParameters { time_to_expiry: 0.0, ..base }),
        ("zero volatility", OptionParameters { volatility: 0.0, ..base }),
        ("zero spot", OptionParameters { spot: 0.0, ..base }),
        ("negative strike", OptionParameters { strike: -10.0, ..base }),
    ];

    for (i, (label, params)) in invalid.iter().enumerate() {
        println!("{}. Testing {}...", i + 1, label);
        match evaluate(params) {
            Ok(r) => println!("   Unexpected: Should have failed! price = {}", r.price),
            Err(e) => println!("   ✓ Caught error: {}", e),
        }
    }

    // 5: unsupported option kind from text input
    println!("\n5. Testing unsupported option kind...");
    match "digital".parse::<OptionKind>() {
        Ok(kind) => println!("   Unexpected: parsed {}", kind),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // 6: a sweep whose range reaches a non-positive spot fails as a whole
    println!("\n6. Testing sweep that crosses zero spot...");
    let range = SpotRange::new(-10.0, 40.0).expect("Ordered range");
    match sweep(&base, range, 51) {
        Ok(series) => println!("   Unexpected: {} points returned", series.len()),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // 7: invalid sweep configuration
    println!("\n7. Testing sweep configuration with one point...");
    let config = SweepConfig {
        point_count: 1,
        ..SweepConfig::default()
    };
    match config.validate() {
        Ok(()) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // 8: matching on the error to find the offending field
    println!("\n8. Testing error field reporting...");
    match OptionParameters::new(30.0, 50.0, 0.03, 1.0, f64::NAN, OptionKind::Call) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(BsmError::InvalidParameter {
            parameter,
            value,
            constraint,
        }) => {
            println!("   ✓ Caught InvalidParameter: {} = {} ({})", parameter, value, constraint);
        }
    }

    // 9: extreme but valid inputs saturate instead of failing
    println!("\n9. Testing deep in-the-money call...");
    match evaluate(&OptionParameters { spot: 1e6, ..base }) {
        Ok(r) => println!("   ✓ Saturated: delta = {}, gamma = {:e}", r.delta, r.gamma),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // 10: finite inputs whose discount factor overflows are rejected, not NaN
    println!("\n10. Testing rate * time that overflows e^(-rT)...");
    match evaluate(&OptionParameters { rate: -800.0, ..base }) {
        Ok(r) => println!("   Unexpected: Should have failed! price = {}", r.price),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    println!("\n✓ Error handling demo complete!");
}
