//! # qec-core
//!
//! Shared machinery for quantum error-correction simulations: Pauli
//! algebra and error patterns, dense state vectors, depolarizing noise
//! with reproducible per-trial seeding, the simulation error taxonomy,
//! and threshold-curve bookkeeping with pseudo-threshold extraction.
//!
//! Everything here assumes the code-capacity model: noise hits data
//! qubits between perfect encoding and perfect syndrome extraction,
//! and decoding sees one round of syndrome data.

pub mod error;
pub mod export;
pub mod noise;
pub mod pauli;
pub mod state;
pub mod threshold;

pub mod prelude {
    pub use crate::error::QecError;
    pub use crate::export::{
        bit_values, curve_rows, spectrum_values, write_curve_csv, CURVE_CSV_HEADER,
    };
    pub use crate::noise::{trial_rng, DepolarizingNoise, TRIAL_SEED_STRIDE};
    pub use crate::pauli::{Pauli, PauliString};
    pub use crate::state::{QuantumState, NORM_TOLERANCE};
    pub use crate::threshold::{ThresholdCurve, ThresholdPoint};
}
