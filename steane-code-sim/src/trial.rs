//! Monte Carlo trials over the Steane code.
//!
//! Each trial walks one fixed pipeline: encode the logical zero state,
//! draw a depolarizing pattern, measure all six generators, look up the
//! correction, apply it, verify. Verification runs twice over: the
//! Pauli frame (error composed with correction) is checked against both
//! logical operators, and the corrected state's logical Z expectation
//! must agree with the frame's X sector. A logical error is the counted
//! outcome of a verified trial; anything that breaks the pipeline
//! itself aborts the whole scan with the trial's coordinates attached.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use qec_core::error::QecError;
use qec_core::noise::{trial_rng, DepolarizingNoise};
use qec_core::pauli::{Pauli, PauliString};
use qec_core::state::QuantumState;
use qec_core::threshold::{ThresholdCurve, ThresholdPoint};

use crate::backend::{eigenvalue_to_bit, BackendKind, SimulatorBackend};
use crate::code::{
    logical_x, logical_z, x_generator, z_generator, LookupDecoder, Syndrome, N_QUBITS,
};

/// Base seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;
/// Per-rate trial budget used when the caller does not pick one.
pub const DEFAULT_TRIALS: usize = 2000;

/// A [[7,1,3]] code handle bound to one simulation engine.
///
/// All trial operations go through the handle, so swapping the engine
/// (or substituting a test double) never touches trial logic.
pub struct SteaneCode {
    backend: Box<dyn SimulatorBackend>,
    kind: BackendKind,
    decoder: LookupDecoder,
    seed: u64,
    trials: usize,
}

impl fmt::Debug for SteaneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteaneCode")
            .field("kind", &self.kind)
            .field("seed", &self.seed)
            .field("trials", &self.trials)
            .finish_non_exhaustive()
    }
}

impl SteaneCode {
    pub fn with_backend(kind: BackendKind) -> Self {
        SteaneCode {
            backend: kind.build(),
            kind,
            decoder: LookupDecoder::new(),
            seed: DEFAULT_SEED,
            trials: DEFAULT_TRIALS,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn trials_per_rate(&self) -> usize {
        self.trials
    }

    pub fn encode_logical_zero(&self) -> Result<QuantumState, QecError> {
        self.backend.encode_zero()
    }

    pub fn encode_logical_one(&self) -> Result<QuantumState, QecError> {
        self.backend.encode_one()
    }

    /// Sample one depolarizing pattern, apply it, and hand the pattern
    /// back so the caller can track the Pauli frame.
    pub fn apply_depolarizing_noise<R: Rng + ?Sized>(
        &self,
        state: &mut QuantumState,
        p: f64,
        rng: &mut R,
    ) -> Result<PauliString, QecError> {
        let channel = DepolarizingNoise::new(p)?;
        let pattern = channel.sample(N_QUBITS, rng);
        self.backend.apply_error(state, &pattern)?;
        Ok(pattern)
    }

    pub fn measure_syndrome(&self, state: &QuantumState) -> Result<Syndrome, QecError> {
        self.backend.measure_syndrome(state)
    }

    pub fn decode(&self, syndrome: &Syndrome) -> PauliString {
        self.decoder.decode(syndrome)
    }

    /// Apply a recovery operator and confirm it returned the state to
    /// the codespace.
    pub fn apply_correction(
        &self,
        state: &mut QuantumState,
        correction: &PauliString,
    ) -> Result<(), QecError> {
        self.backend.apply_correction(state, correction)?;
        let after = self.backend.measure_syndrome(state)?;
        if !after.is_clean() {
            return Err(QecError::ResidualSyndrome {
                context: "steane correction",
            });
        }
        Ok(())
    }

    /// Expectation values of a diagnostic observable set: all 21
    /// single-qubit Paulis, the six stabilizer generators, and the
    /// logical Z, each labeled.
    pub fn compute_pauli_spectrum(
        &self,
        state: &QuantumState,
    ) -> Result<Vec<(String, f64)>, QecError> {
        let mut spectrum = Vec::with_capacity(28);
        for (label, pauli) in [("X", Pauli::X), ("Y", Pauli::Y), ("Z", Pauli::Z)] {
            for qubit in 0..N_QUBITS {
                let observable = PauliString::single(N_QUBITS, qubit, pauli);
                let value = self.backend.expectation(state, &observable)?;
                spectrum.push((format!("{label}{qubit}"), value));
            }
        }
        for g in 0..3 {
            let value = self.backend.expectation(state, &x_generator(g))?;
            spectrum.push((format!("XS{g}"), value));
        }
        for g in 0..3 {
            let value = self.backend.expectation(state, &z_generator(g))?;
            spectrum.push((format!("ZS{g}"), value));
        }
        let value = self.backend.expectation(state, &logical_z())?;
        spectrum.push(("ZL".to_string(), value));
        Ok(spectrum)
    }

    /// Run one trial at rate `p`. Returns true when the corrected state
    /// carries a logical error in either Pauli sector.
    pub fn run_trial<R: Rng + ?Sized>(&self, p: f64, rng: &mut R) -> Result<bool, QecError> {
        let mut state = self.backend.encode_zero()?;
        let pattern = self.apply_depolarizing_noise(&mut state, p, rng)?;
        let syndrome = self.backend.measure_syndrome(&state)?;
        let correction = self.decoder.decode(&syndrome);
        self.apply_correction(&mut state, &correction)?;

        // Frame-level verdict in both sectors: the residual acts as a
        // logical operator exactly when it anticommutes with the
        // opposite logical.
        let residual = pattern.compose(&correction);
        let logical_x_failure = !residual.commutes_with(&logical_z());
        let logical_z_failure = !residual.commutes_with(&logical_x());

        // State-level verdict for the X sector: on an encoded zero, a
        // logical bit flip shows up as ⟨ZL⟩ = -1. Both verdicts must
        // agree or the run is broken.
        let z_expectation = self.backend.expectation(&state, &logical_z())?;
        let state_flip = eigenvalue_to_bit(z_expectation, "steane trial verification")?;
        if state_flip != logical_x_failure {
            return Err(QecError::VerificationConflict {
                context: "steane trial verification",
            });
        }

        Ok(logical_x_failure || logical_z_failure)
    }

    /// Logical error rate at `p` over `n_trials` independent trials.
    ///
    /// Each trial reseeds from the base seed and its own index, so the
    /// estimate is identical serial or parallel.
    pub fn calculate_logical_error_rate(&self, p: f64, n_trials: usize) -> Result<f64, QecError> {
        if n_trials == 0 {
            return Err(QecError::EmptyTrialBudget);
        }
        DepolarizingNoise::new(p)?;
        let failures = self.count_failures(p, n_trials)?;
        debug!("rate {:.5}: {} failures in {} trials", p, failures, n_trials);
        Ok(failures as f64 / n_trials as f64)
    }

    #[cfg(feature = "parallel")]
    fn count_failures(&self, p: f64, n_trials: usize) -> Result<usize, QecError> {
        (0..n_trials)
            .into_par_iter()
            .map(|trial| {
                let mut rng = trial_rng(self.seed, trial);
                match self.run_trial(p, &mut rng) {
                    Ok(failed) => Ok(usize::from(failed)),
                    Err(source) => Err(QecError::trial_aborted(p, trial, source)),
                }
            })
            .try_reduce(|| 0, |a, b| Ok(a + b))
    }

    #[cfg(not(feature = "parallel"))]
    fn count_failures(&self, p: f64, n_trials: usize) -> Result<usize, QecError> {
        let mut failures = 0;
        for trial in 0..n_trials {
            let mut rng = trial_rng(self.seed, trial);
            let failed = self
                .run_trial(p, &mut rng)
                .map_err(|source| QecError::trial_aborted(p, trial, source))?;
            failures += usize::from(failed);
        }
        Ok(failures)
    }

    /// Scan the configured trial budget across ascending rates.
    pub fn run_threshold_scan(&self, rates: &[f64]) -> Result<ThresholdCurve, QecError> {
        self.run_threshold_scan_with_cancel(rates, &AtomicBool::new(false))
    }

    /// Scan with cooperative cancellation. A cancelled scan returns the
    /// points finished so far, explicitly marked incomplete.
    pub fn run_threshold_scan_with_cancel(
        &self,
        rates: &[f64],
        cancel: &AtomicBool,
    ) -> Result<ThresholdCurve, QecError> {
        ThresholdCurve::validate_rates(rates)?;
        let mut curve = ThresholdCurve::new();
        for &rate in rates {
            if cancel.load(Ordering::Relaxed) {
                warn!(
                    "scan cancelled after {} of {} rate points",
                    curve.len(),
                    rates.len()
                );
                curve.mark_incomplete();
                return Ok(curve);
            }
            let logical_rate = self.calculate_logical_error_rate(rate, self.trials)?;
            info!(
                "{} backend: rate {:.5} -> logical {:.6} over {} trials",
                self.kind, rate, logical_rate, self.trials
            );
            curve.push(ThresholdPoint {
                physical_rate: rate,
                logical_rate,
                trials: self.trials,
            });
        }
        Ok(curve)
    }
}
