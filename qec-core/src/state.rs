//! Dense state vectors over a small qubit register.
//!
//! Amplitudes are stored as a length-2^n complex vector; qubit k is
//! bit k of the basis index (qubit 0 least significant). A Pauli
//! string with X mask x, Z mask z and n_Y Y-sites acts in one pass:
//!
//! ```text
//! P |i⟩ = i^{n_Y} · (−1)^{popcount(i ∧ z)} · |i ⊕ x⟩
//! ```
//!
//! States on the reachable orbit (codewords hit by Pauli errors) stay
//! exactly normalized; anything beyond `NORM_TOLERANCE` is reported as
//! numerical instability rather than silently renormalized.

use num_complex::Complex64;
use num_traits::Zero;

use crate::error::QecError;
use crate::pauli::PauliString;

/// Norm-squared drift beyond this is treated as numerical instability.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// A pure state of `n_qubits` qubits as a dense amplitude vector.
#[derive(Debug, Clone)]
pub struct QuantumState {
    n_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl QuantumState {
    /// |0…0⟩ on `n_qubits` qubits.
    pub fn zero(n_qubits: usize) -> Self {
        Self::computational_basis(n_qubits, 0)
    }

    /// The computational basis state |index⟩.
    pub fn computational_basis(n_qubits: usize, index: usize) -> Self {
        let dim = 1usize << n_qubits;
        assert!(index < dim, "basis index {} out of range", index);
        let mut amplitudes = vec![Complex64::zero(); dim];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Self {
            n_qubits,
            amplitudes,
        }
    }

    /// Wrap a raw amplitude vector (length must be 2^n).
    pub fn from_amplitudes(n_qubits: usize, amplitudes: Vec<Complex64>) -> Self {
        assert_eq!(
            amplitudes.len(),
            1usize << n_qubits,
            "amplitude vector length must be 2^n_qubits"
        );
        Self {
            n_qubits,
            amplitudes,
        }
    }

    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Mutable amplitude access for gate interpreters.
    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    /// ⟨ψ|ψ⟩.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Fail with `NormDrift` when the norm left the unit sphere.
    pub fn check_norm(&self, operation: &'static str) -> Result<(), QecError> {
        let norm = self.norm_sqr();
        if (norm - 1.0).abs() > NORM_TOLERANCE {
            return Err(QecError::NormDrift { operation, norm });
        }
        Ok(())
    }

    /// Apply a Pauli string in place.
    pub fn apply_pauli_string(&mut self, op: &PauliString) {
        assert_eq!(op.len(), self.n_qubits, "operator width mismatch");
        let x_mask = op.x_mask() as usize;
        let z_mask = op.z_mask() as usize;
        let phase = y_phase(op.y_count());

        let mut next = vec![Complex64::zero(); self.amplitudes.len()];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let sign = parity_sign(i & z_mask);
            next[i ^ x_mask] = phase * sign * amp;
        }
        self.amplitudes = next;
    }

    /// ⟨ψ|P|ψ⟩ for a Hermitian Pauli string (real by construction).
    pub fn expectation(&self, op: &PauliString) -> f64 {
        assert_eq!(op.len(), self.n_qubits, "operator width mismatch");
        let x_mask = op.x_mask() as usize;
        let z_mask = op.z_mask() as usize;
        let phase = y_phase(op.y_count());

        let mut acc = Complex64::zero();
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let sign = parity_sign(i & z_mask);
            acc += self.amplitudes[i ^ x_mask].conj() * phase * sign * amp;
        }
        acc.re
    }

    /// ⟨self|other⟩.
    pub fn inner_product(&self, other: &QuantumState) -> Complex64 {
        assert_eq!(self.n_qubits, other.n_qubits, "register width mismatch");
        self.amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum()
    }

    /// |⟨self|other⟩|².
    pub fn fidelity(&self, other: &QuantumState) -> f64 {
        self.inner_product(other).norm_sqr()
    }
}

/// i^k for the Y-site count.
fn y_phase(y_count: usize) -> Complex64 {
    match y_count % 4 {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, 1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, -1.0),
    }
}

/// (−1)^popcount(bits).
fn parity_sign(bits: usize) -> f64 {
    if bits.count_ones() % 2 == 1 {
        -1.0
    } else {
        1.0
    }
}
