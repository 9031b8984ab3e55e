//! Engine selection and the capability interface both engines satisfy.
//!
//! The two engines compute the same physics by different routes: the
//! state-vector engine acts on amplitudes in closed form, the circuit
//! engine compiles every operation to a small gate program first. Trial
//! code only ever sees the trait, so a run can be replayed on either
//! engine (or a test double) without touching the trial logic.

use std::fmt;
use std::str::FromStr;

use qec_core::error::QecError;
use qec_core::pauli::PauliString;
use qec_core::state::QuantumState;

use crate::circuit::CircuitEngine;
use crate::code::Syndrome;
use crate::statevector::StateVectorEngine;
use crate::trial::SteaneCode;

/// Stabilizer expectations on states in a syndrome eigenspace are ±1
/// exactly; drift past this marks a broken state, not a noisy one.
pub const EIGENVALUE_TOLERANCE: f64 = 1e-6;

/// Capabilities every simulation engine provides.
pub trait SimulatorBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// |0̄⟩ over seven physical qubits.
    fn encode_zero(&self) -> Result<QuantumState, QecError>;

    /// |1̄⟩ over seven physical qubits.
    fn encode_one(&self) -> Result<QuantumState, QecError>;

    /// Apply a sampled Pauli error pattern to the state.
    fn apply_error(&self, state: &mut QuantumState, error: &PauliString) -> Result<(), QecError>;

    /// Measure all six stabilizer generators. Deterministic on syndrome
    /// eigenstates, which is the only kind of state a trial produces.
    fn measure_syndrome(&self, state: &QuantumState) -> Result<Syndrome, QecError>;

    /// Expectation value of a Pauli-string observable.
    fn expectation(&self, state: &QuantumState, observable: &PauliString)
        -> Result<f64, QecError>;

    /// Recovery operators are Pauli strings, applied exactly like errors.
    fn apply_correction(
        &self,
        state: &mut QuantumState,
        correction: &PauliString,
    ) -> Result<(), QecError> {
        self.apply_error(state, correction)
    }
}

/// The closed set of engines a code handle can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    StateVector,
    Circuit,
}

impl BackendKind {
    pub const ALL: [BackendKind; 2] = [BackendKind::StateVector, BackendKind::Circuit];

    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::StateVector => "statevector",
            BackendKind::Circuit => "circuit",
        }
    }

    pub fn build(&self) -> Box<dyn SimulatorBackend> {
        match self {
            BackendKind::StateVector => Box::new(StateVectorEngine::new()),
            BackendKind::Circuit => Box::new(CircuitEngine::new()),
        }
    }
}

impl FromStr for BackendKind {
    type Err = QecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "statevector" => Ok(BackendKind::StateVector),
            "circuit" => Ok(BackendKind::Circuit),
            other => Err(QecError::unknown_backend(other)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build a Steane code handle bound to the named engine. Unknown names
/// fail fast; nothing is read from the environment.
pub fn create_code(backend_name: &str) -> Result<SteaneCode, QecError> {
    let kind: BackendKind = backend_name.parse()?;
    Ok(SteaneCode::with_backend(kind))
}

/// Map a measured generator expectation to a syndrome bit, rejecting
/// values away from ±1.
pub fn eigenvalue_to_bit(value: f64, operation: &'static str) -> Result<bool, QecError> {
    if (value - 1.0).abs() <= EIGENVALUE_TOLERANCE {
        Ok(false)
    } else if (value + 1.0).abs() <= EIGENVALUE_TOLERANCE {
        Ok(true)
    } else {
        Err(QecError::EigenvalueDrift { operation, value })
    }
}
