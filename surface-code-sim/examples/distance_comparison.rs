//! Distance comparison: threshold behavior of the planar surface code
//! under minimum-weight perfect matching.
//!
//! Key deductions:
//! 1. Near the threshold, curves for different d converge: the code stops
//!    helping when physical noise overwhelms the matching.
//! 2. Below threshold, P_L drops steeply with distance: each step d → d+2
//!    multiplies protection by roughly the same suppression factor Λ.
//! 3. The pseudo-threshold (P_L = p) marks break-even against an
//!    unencoded qubit; it is reported per distance, or explicitly absent.

use std::fs::File;
use std::process;

use surface_code_sim::prelude::*;

fn main() {
    env_logger::init();

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║     Planar Surface Code Distance Comparison              ║");
    println!("║     MWPM Decoding under Depolarizing Noise               ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    // ═══ 1. Threshold curves across distances ═══
    println!("═══ 1. Logical Error Rate vs Physical Rate ═══");
    println!();
    println!("Depolarizing noise spends p/3 on each of X, Y, Z. Each sector");
    println!("sees an effective flip rate of 2p/3, so the familiar ≈10.3%");
    println!("matching threshold per sector sits near p ≈ 0.15 in total rate.");
    println!();

    let distances = [3, 5, 7];
    let rates: Vec<f64> = (1..=10).map(|i| i as f64 * 0.02).collect();
    let trials = 2000;
    let seed = 42;

    let curves = match compare_distances(&distances, &rates, trials, seed) {
        Ok(curves) => curves,
        Err(err) => {
            eprintln!("sweep failed: {err}");
            process::exit(1);
        }
    };

    print!("  p_err  ");
    for &d in &distances {
        print!("  d={:<5}", d);
    }
    println!();
    print!("  ─────  ");
    for _ in &distances {
        print!("  ─────  ");
    }
    println!();
    for (i, &p) in rates.iter().enumerate() {
        print!("  {:.3}  ", p);
        for (_, curve) in &curves {
            print!("  {:.4} ", curve.points()[i].logical_rate);
        }
        println!();
    }

    println!();
    println!("Pseudo-thresholds (where each curve meets P_L = p):");
    for (d, curve) in &curves {
        match curve.pseudo_threshold() {
            Some(p) => println!("  d={}: P_L = p at p ≈ {:.4}", d, p),
            None => println!(
                "  d={}: no crossing of P_L = p inside the scanned range",
                d
            ),
        }
    }

    // ═══ 2. Sub-threshold suppression ═══
    println!();
    println!("═══ 2. Suppression Below Threshold ═══");
    println!();
    let p_low = 0.04;
    println!("At fixed p = {:.2}, growing the distance buys protection:", p_low);
    println!();

    let suppression_distances = [3, 5, 7, 9];
    let suppression_trials = 5000;
    let mut low_rates = Vec::new();
    print!("  d      ");
    for &d in &suppression_distances {
        print!("  {:<7}", d);
    }
    println!();
    print!("  P_L    ");
    for &d in &suppression_distances {
        let result = run_experiment(&SimConfig {
            d,
            p_error: p_low,
            trials: suppression_trials,
            seed,
        })
        .unwrap_or_else(|err| {
            eprintln!("experiment failed: {err}");
            process::exit(1);
        });
        print!("  {:.4} ", result.logical_error_rate);
        low_rates.push(result.logical_error_rate);
    }
    println!();

    print!("  Λ      ");
    for pair in low_rates.windows(2) {
        if pair[1] > 0.0 {
            print!("  {:.1}x   ", pair[0] / pair[1]);
        } else {
            print!("  n/a    ");
        }
    }
    println!();
    println!();
    println!("Λ = P_L(d) / P_L(d+2) > 1 below threshold: each distance step");
    println!("suppresses the logical error rate by a roughly constant factor.");

    // ═══ 3. Row export ═══
    println!();
    println!("═══ 3. Curve Export ═══");
    println!();
    for (d, curve) in &curves {
        let path = format!("surface_threshold_d{}.csv", d);
        let mut file = File::create(&path).expect("creating the export file");
        write_curve_csv(curve, &mut file).expect("writing curve rows");
        println!("  wrote {} ({} rows)", path, curve.len());
    }

    println!();
    println!("═══ Summary ═══");
    println!();
    println!("1. THRESHOLD: distance curves converge near p ≈ 0.15 total");
    println!("   depolarizing rate, the matching limit for this noise split.");
    println!("2. PROTECTION: below threshold, d=7 beats d=3 by orders of");
    println!("   magnitude; the planar patch earns its qubit overhead.");
    println!("3. BREAK-EVEN: pseudo-thresholds mark where encoding starts");
    println!("   to pay; outside the scanned range the report says so.");
    println!();
}
