//! Direct amplitude-vector engine.
//!
//! The CSS structure makes every operation closed-form: the logical
//! zero state is an equal superposition over the eight even codewords,
//! Pauli strings permute basis states with at most a phase, and
//! stabilizer outcomes read off as expectation values. Nothing here
//! touches gates.

use num_complex::Complex64;
use num_traits::Zero;

use qec_core::error::QecError;
use qec_core::pauli::PauliString;
use qec_core::state::QuantumState;

use crate::backend::{eigenvalue_to_bit, SimulatorBackend};
use crate::code::{codeword_masks, generators, Syndrome, N_GENERATORS, N_QUBITS};

pub struct StateVectorEngine;

impl StateVectorEngine {
    pub fn new() -> Self {
        StateVectorEngine
    }

    fn codeword_superposition(words: impl Iterator<Item = usize>) -> QuantumState {
        let mut amplitudes = vec![Complex64::zero(); 1 << N_QUBITS];
        let weight = Complex64::new(1.0 / 8f64.sqrt(), 0.0);
        for word in words {
            amplitudes[word] = weight;
        }
        QuantumState::from_amplitudes(N_QUBITS, amplitudes)
    }
}

impl Default for StateVectorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorBackend for StateVectorEngine {
    fn name(&self) -> &'static str {
        "statevector"
    }

    fn encode_zero(&self) -> Result<QuantumState, QecError> {
        let state = Self::codeword_superposition(codeword_masks().iter().map(|&w| w as usize));
        state.check_norm("statevector encoding")?;
        Ok(state)
    }

    fn encode_one(&self) -> Result<QuantumState, QecError> {
        // Logical X is transversal, so the one state lives on the
        // bitwise complements of the even codewords.
        let state =
            Self::codeword_superposition(codeword_masks().iter().map(|&w| (w ^ 0x7F) as usize));
        state.check_norm("statevector encoding")?;
        Ok(state)
    }

    fn apply_error(&self, state: &mut QuantumState, error: &PauliString) -> Result<(), QecError> {
        state.apply_pauli_string(error);
        state.check_norm("statevector pauli application")
    }

    fn measure_syndrome(&self, state: &QuantumState) -> Result<Syndrome, QecError> {
        let mut bits = [false; N_GENERATORS];
        for (i, generator) in generators().iter().enumerate() {
            let value = state.expectation(generator);
            bits[i] = eigenvalue_to_bit(value, "statevector syndrome extraction")?;
        }
        Ok(Syndrome::new(bits))
    }

    fn expectation(
        &self,
        state: &QuantumState,
        observable: &PauliString,
    ) -> Result<f64, QecError> {
        Ok(state.expectation(observable))
    }
}
