//! Gate/circuit engine.
//!
//! Every operation is compiled to a small program over H, CNOT and
//! Pauli gates and executed by a dense interpreter. Encoding uses the
//! standard CSS preparation circuit: a Hadamard on one pivot qubit per
//! X-type generator, then CNOT fan-out across the rest of its support.
//! Syndrome and observable readout conjugate a copy of the state with
//! the observable's gate program and take the overlap.

use std::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex64;

use qec_core::error::QecError;
use qec_core::pauli::{Pauli, PauliString};
use qec_core::state::QuantumState;

use crate::backend::{eigenvalue_to_bit, SimulatorBackend};
use crate::code::{generators, Syndrome, GENERATOR_MASKS, N_GENERATORS, N_QUBITS};

/// One elementary gate on qubit indices of the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    H(usize),
    Cnot { control: usize, target: usize },
    X(usize),
    Y(usize),
    Z(usize),
}

/// An ordered gate list the interpreter executes front to back.
#[derive(Debug, Clone, Default)]
pub struct GateProgram {
    gates: Vec<Gate>,
}

impl GateProgram {
    pub fn new() -> Self {
        GateProgram { gates: Vec::new() }
    }

    pub fn push(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Pauli-string application as a gate sequence, one gate per
    /// non-identity site.
    pub fn from_pauli_string(string: &PauliString) -> Self {
        let mut program = GateProgram::new();
        for (qubit, pauli) in string.iter().enumerate() {
            match pauli {
                Pauli::I => {}
                Pauli::X => program.push(Gate::X(qubit)),
                Pauli::Y => program.push(Gate::Y(qubit)),
                Pauli::Z => program.push(Gate::Z(qubit)),
            }
        }
        program
    }

    /// Encoding circuit for the logical zero state. Pivots 3, 1 and 0
    /// each sit in exactly one generator support, so a Hadamard there
    /// followed by CNOTs onto the rest of the support spans the
    /// codeword group.
    pub fn steane_encoder() -> Self {
        let mut program = GateProgram::new();
        let pivots = [3usize, 1, 0];
        for (&pivot, &mask) in pivots.iter().zip(GENERATOR_MASKS.iter()) {
            program.push(Gate::H(pivot));
            for target in 0..N_QUBITS {
                if target != pivot && mask & (1 << target) != 0 {
                    program.push(Gate::Cnot {
                        control: pivot,
                        target,
                    });
                }
            }
        }
        program
    }

    /// Execute the program against a dense state.
    pub fn run(&self, state: &mut QuantumState) {
        let amplitudes = state.amplitudes_mut();
        for gate in &self.gates {
            match *gate {
                Gate::H(q) => apply_h(amplitudes, q),
                Gate::Cnot { control, target } => apply_cnot(amplitudes, control, target),
                Gate::X(q) => apply_x(amplitudes, q),
                Gate::Y(q) => apply_y(amplitudes, q),
                Gate::Z(q) => apply_z(amplitudes, q),
            }
        }
    }
}

fn apply_h(amplitudes: &mut [Complex64], qubit: usize) {
    let mask = 1usize << qubit;
    for i in 0..amplitudes.len() {
        if i & mask == 0 {
            let a = amplitudes[i];
            let b = amplitudes[i | mask];
            amplitudes[i] = (a + b) * FRAC_1_SQRT_2;
            amplitudes[i | mask] = (a - b) * FRAC_1_SQRT_2;
        }
    }
}

fn apply_cnot(amplitudes: &mut [Complex64], control: usize, target: usize) {
    let control_mask = 1usize << control;
    let target_mask = 1usize << target;
    for i in 0..amplitudes.len() {
        if i & control_mask != 0 && i & target_mask == 0 {
            amplitudes.swap(i, i | target_mask);
        }
    }
}

fn apply_x(amplitudes: &mut [Complex64], qubit: usize) {
    let mask = 1usize << qubit;
    for i in 0..amplitudes.len() {
        if i & mask == 0 {
            amplitudes.swap(i, i | mask);
        }
    }
}

fn apply_y(amplitudes: &mut [Complex64], qubit: usize) {
    let mask = 1usize << qubit;
    let phase = Complex64::new(0.0, 1.0);
    for i in 0..amplitudes.len() {
        if i & mask == 0 {
            let a = amplitudes[i];
            let b = amplitudes[i | mask];
            amplitudes[i] = -phase * b;
            amplitudes[i | mask] = phase * a;
        }
    }
}

fn apply_z(amplitudes: &mut [Complex64], qubit: usize) {
    let mask = 1usize << qubit;
    for (i, amp) in amplitudes.iter_mut().enumerate() {
        if i & mask != 0 {
            *amp = -*amp;
        }
    }
}

/// Engine that routes every operation through the gate interpreter.
pub struct CircuitEngine {
    encoder: GateProgram,
}

impl CircuitEngine {
    pub fn new() -> Self {
        CircuitEngine {
            encoder: GateProgram::steane_encoder(),
        }
    }

    fn overlap_after(&self, state: &QuantumState, program: &GateProgram) -> f64 {
        let mut conjugated = state.clone();
        program.run(&mut conjugated);
        state.inner_product(&conjugated).re
    }
}

impl Default for CircuitEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorBackend for CircuitEngine {
    fn name(&self) -> &'static str {
        "circuit"
    }

    fn encode_zero(&self) -> Result<QuantumState, QecError> {
        let mut state = QuantumState::zero(N_QUBITS);
        self.encoder.run(&mut state);
        state.check_norm("circuit encoding")?;
        Ok(state)
    }

    fn encode_one(&self) -> Result<QuantumState, QecError> {
        let mut state = self.encode_zero()?;
        let mut flip = GateProgram::new();
        for qubit in 0..N_QUBITS {
            flip.push(Gate::X(qubit));
        }
        flip.run(&mut state);
        state.check_norm("circuit encoding")?;
        Ok(state)
    }

    fn apply_error(&self, state: &mut QuantumState, error: &PauliString) -> Result<(), QecError> {
        GateProgram::from_pauli_string(error).run(state);
        state.check_norm("circuit pauli application")
    }

    fn measure_syndrome(&self, state: &QuantumState) -> Result<Syndrome, QecError> {
        let mut bits = [false; N_GENERATORS];
        for (i, generator) in generators().iter().enumerate() {
            let program = GateProgram::from_pauli_string(generator);
            let value = self.overlap_after(state, &program);
            bits[i] = eigenvalue_to_bit(value, "circuit syndrome extraction")?;
        }
        Ok(Syndrome::new(bits))
    }

    fn expectation(
        &self,
        state: &QuantumState,
        observable: &PauliString,
    ) -> Result<f64, QecError> {
        let program = GateProgram::from_pauli_string(observable);
        Ok(self.overlap_after(state, &program))
    }
}
