//! Monte Carlo simulation: depolarizing noise, MWPM decoding, threshold
//! estimation.
//!
//! The error model is single-qubit depolarizing: with probability p a
//! qubit suffers an error, split evenly (p/3 each) between X, Y and Z.
//! Y errors feed both sectors at once, which couples the X and Z
//! matchings statistically even though they decode independently.
//!
//! Each trial reseeds its own generator from the configured base seed
//! and the trial index, so runs reproduce exactly at any thread count.
//! A trial that breaks the decoding contract aborts the whole
//! experiment with the trial's coordinates attached; a logical error is
//! a counted outcome, never an abort.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use qec_core::error::QecError;
use qec_core::noise::{trial_rng, DepolarizingNoise};
use qec_core::pauli::PauliString;
use qec_core::threshold::{ThresholdCurve, ThresholdPoint};

use crate::decoder::mwpm_decode;
use crate::lattice::PlanarLattice;
use crate::syndrome::SurfaceSyndrome;

/// Configuration for a Monte Carlo threshold experiment.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Code distance (d×d patch with d² + (d-1)² qubits).
    pub d: usize,
    /// Physical depolarizing rate per qubit.
    pub p_error: f64,
    /// Number of Monte Carlo trials.
    pub trials: usize,
    /// Base seed; trial i runs on its own stream derived from it.
    pub seed: u64,
}

impl SimConfig {
    /// Reject impossible experiments before any trial runs.
    pub fn validate(&self) -> Result<(), QecError> {
        if self.d < 2 {
            return Err(QecError::LatticeTooSmall { d: self.d });
        }
        DepolarizingNoise::new(self.p_error)?;
        if self.trials == 0 {
            return Err(QecError::EmptyTrialBudget);
        }
        Ok(())
    }
}

/// Result of a Monte Carlo threshold experiment.
#[derive(Debug, Clone)]
pub struct SimResult {
    /// Code distance.
    pub d: usize,
    /// Physical error rate.
    pub p_error: f64,
    /// Number of trials.
    pub trials: usize,
    /// Number of logical failures (after decoding and verification).
    pub logical_failures: usize,
    /// Logical error rate = failures / trials.
    pub logical_error_rate: f64,
}

impl SimResult {
    /// Reduce to the row shape threshold curves collect.
    pub fn to_point(&self) -> ThresholdPoint {
        ThresholdPoint {
            physical_rate: self.p_error,
            logical_rate: self.logical_error_rate,
            trials: self.trials,
        }
    }
}

/// Sample one depolarizing pattern, fold it into the lattice frames and
/// return it.
pub fn apply_depolarizing_noise<R: Rng + ?Sized>(
    lattice: &mut PlanarLattice,
    p: f64,
    rng: &mut R,
) -> Result<PauliString, QecError> {
    let noise = DepolarizingNoise::new(p)?;
    let pattern = noise.sample(lattice.num_qubits(), rng);
    lattice.apply_pauli_pattern(&pattern);
    Ok(pattern)
}

/// Hit every data qubit with the depolarizing channel, then measure
/// all checks.
pub fn generate_syndrome<R: Rng + ?Sized>(
    lattice: &mut PlanarLattice,
    p: f64,
    rng: &mut R,
) -> Result<SurfaceSyndrome, QecError> {
    apply_depolarizing_noise(lattice, p, rng)?;
    Ok(SurfaceSyndrome::measure(lattice))
}

/// Run a single Monte Carlo trial.
///
/// Returns true if a logical error remains after decoding.
pub fn run_trial<R: Rng + ?Sized>(d: usize, p: f64, rng: &mut R) -> Result<bool, QecError> {
    let mut lattice = PlanarLattice::new(d)?;
    let syndrome = generate_syndrome(&mut lattice, p, rng)?;
    mwpm_decode(&mut lattice, &syndrome)?;
    Ok(lattice.has_any_logical_error())
}

#[cfg(feature = "parallel")]
fn count_failures(config: &SimConfig) -> Result<usize, QecError> {
    (0..config.trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = trial_rng(config.seed, trial);
            match run_trial(config.d, config.p_error, &mut rng) {
                Ok(failed) => Ok(usize::from(failed)),
                Err(source) => Err(QecError::trial_aborted(config.p_error, trial, source)),
            }
        })
        .try_reduce(|| 0, |a, b| Ok(a + b))
}

#[cfg(not(feature = "parallel"))]
fn count_failures(config: &SimConfig) -> Result<usize, QecError> {
    let mut failures = 0;
    for trial in 0..config.trials {
        let mut rng = trial_rng(config.seed, trial);
        let failed = run_trial(config.d, config.p_error, &mut rng)
            .map_err(|source| QecError::trial_aborted(config.p_error, trial, source))?;
        failures += usize::from(failed);
    }
    Ok(failures)
}

/// Run a full threshold experiment at one rate point.
pub fn run_experiment(config: &SimConfig) -> Result<SimResult, QecError> {
    config.validate()?;
    let failures = count_failures(config)?;
    let rate = failures as f64 / config.trials as f64;
    info!(
        "d={}: rate {:.5} -> logical {:.6} over {} trials",
        config.d, config.p_error, rate, config.trials
    );
    Ok(SimResult {
        d: config.d,
        p_error: config.p_error,
        trials: config.trials,
        logical_failures: failures,
        logical_error_rate: rate,
    })
}

/// Sweep the trial budget across ascending rates for one distance.
pub fn threshold_sweep(
    d: usize,
    rates: &[f64],
    trials: usize,
    seed: u64,
) -> Result<ThresholdCurve, QecError> {
    threshold_sweep_with_cancel(d, rates, trials, seed, &AtomicBool::new(false))
}

/// Sweep with cooperative cancellation. A cancelled sweep returns the
/// points finished so far, explicitly marked incomplete.
pub fn threshold_sweep_with_cancel(
    d: usize,
    rates: &[f64],
    trials: usize,
    seed: u64,
    cancel: &AtomicBool,
) -> Result<ThresholdCurve, QecError> {
    ThresholdCurve::validate_rates(rates)?;
    let mut curve = ThresholdCurve::new();
    for &rate in rates {
        if cancel.load(Ordering::Relaxed) {
            warn!(
                "sweep cancelled after {} of {} rate points",
                curve.len(),
                rates.len()
            );
            curve.mark_incomplete();
            return Ok(curve);
        }
        let result = run_experiment(&SimConfig {
            d,
            p_error: rate,
            trials,
            seed,
        })?;
        curve.push(result.to_point());
    }
    Ok(curve)
}

/// Sweep several code distances over the same rates, for threshold
/// comparison plots.
pub fn compare_distances(
    distances: &[usize],
    rates: &[f64],
    trials: usize,
    seed: u64,
) -> Result<Vec<(usize, ThresholdCurve)>, QecError> {
    distances
        .iter()
        .map(|&d| Ok((d, threshold_sweep(d, rates, trials, seed)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_error_rate_is_exactly_zero() {
        let result = run_experiment(&SimConfig {
            d: 3,
            p_error: 0.0,
            trials: 200,
            seed: 1,
        })
        .unwrap();
        assert_eq!(
            result.logical_failures, 0,
            "zero noise must never produce a logical failure"
        );
        assert_eq!(result.logical_error_rate, 0.0);
    }

    #[test]
    fn test_generate_syndrome_separates_sectors() {
        let mut rng = trial_rng(13, 0);
        let mut lattice = PlanarLattice::new(5).unwrap();
        let syndrome = generate_syndrome(&mut lattice, 0.2, &mut rng).unwrap();
        let (xr, xc) = lattice.x_check_grid();
        for (r, c) in syndrome.x_defects() {
            assert!(r < xr && c < xc, "X-defect ({}, {}) off the check grid", r, c);
        }
        let (zr, zc) = lattice.z_check_grid();
        for (r, c) in syndrome.z_defects() {
            assert!(r < zr && c < zc, "Z-defect ({}, {}) off the check grid", r, c);
        }
        // Measurement is a pure function of the frames.
        let again = SurfaceSyndrome::measure(&lattice);
        assert_eq!(again.x_defects(), syndrome.x_defects());
        assert_eq!(again.z_defects(), syndrome.z_defects());

        let mut quiet = PlanarLattice::new(5).unwrap();
        let clean = generate_syndrome(&mut quiet, 0.0, &mut rng).unwrap();
        assert!(clean.is_clean(), "zero noise must measure a clean syndrome");
    }

    #[test]
    fn test_high_error_rate_many_failures() {
        let result = run_experiment(&SimConfig {
            d: 3,
            p_error: 0.40,
            trials: 200,
            seed: 2,
        })
        .unwrap();
        assert!(
            result.logical_error_rate > 0.1,
            "far above threshold the decoder should fail often, got {}",
            result.logical_error_rate
        );
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let config = SimConfig {
            d: 3,
            p_error: 0.08,
            trials: 400,
            seed: 99,
        };
        let first = run_experiment(&config).unwrap();
        let second = run_experiment(&config).unwrap();
        assert_eq!(first.logical_failures, second.logical_failures);
        assert_eq!(first.logical_error_rate, second.logical_error_rate);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let base = SimConfig {
            d: 3,
            p_error: 0.1,
            trials: 10,
            seed: 0,
        };
        let too_small = SimConfig { d: 1, ..base.clone() };
        assert!(matches!(
            too_small.validate(),
            Err(QecError::LatticeTooSmall { d: 1 })
        ));
        let bad_rate = SimConfig {
            p_error: 1.5,
            ..base.clone()
        };
        assert!(matches!(
            bad_rate.validate(),
            Err(QecError::RateOutOfRange(_))
        ));
        let no_trials = SimConfig { trials: 0, ..base };
        assert!(matches!(
            no_trials.validate(),
            Err(QecError::EmptyTrialBudget)
        ));
    }

    #[test]
    fn test_sweep_rates_must_ascend() {
        let err = threshold_sweep(3, &[0.1, 0.05], 10, 0).unwrap_err();
        assert!(matches!(err, QecError::RatesNotAscending { index: 1 }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_sweep_produces_one_point_per_rate() {
        let rates = [0.01, 0.05, 0.10];
        let curve = threshold_sweep(3, &rates, 50, 7).unwrap();
        assert!(curve.is_complete());
        assert_eq!(curve.len(), rates.len());
        for (point, &rate) in curve.points().iter().zip(rates.iter()) {
            assert_eq!(point.physical_rate, rate);
            assert_eq!(point.trials, 50);
        }
    }

    #[test]
    fn test_cancelled_sweep_is_marked_incomplete() {
        let cancel = AtomicBool::new(true);
        let curve = threshold_sweep_with_cancel(3, &[0.01, 0.05], 50, 7, &cancel).unwrap();
        assert!(curve.is_empty());
        assert!(!curve.is_complete());
    }

    #[test]
    fn test_sweep_monotonic() {
        let curve = threshold_sweep(3, &[0.01, 0.20], 300, 5).unwrap();
        let points = curve.points();
        assert!(
            points.first().unwrap().logical_rate < points.last().unwrap().logical_rate,
            "logical error rate should increase with physical error rate"
        );
    }

    #[test]
    fn test_larger_distance_suppresses_errors_below_threshold() {
        let p = 0.05;
        let small = run_experiment(&SimConfig {
            d: 3,
            p_error: p,
            trials: 3000,
            seed: 31,
        })
        .unwrap();
        let large = run_experiment(&SimConfig {
            d: 7,
            p_error: p,
            trials: 3000,
            seed: 31,
        })
        .unwrap();
        assert!(
            small.logical_error_rate > large.logical_error_rate,
            "below threshold, d=7 ({}) must beat d=3 ({})",
            large.logical_error_rate,
            small.logical_error_rate
        );
    }
}
