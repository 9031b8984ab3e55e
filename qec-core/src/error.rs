//! Error taxonomy for simulation runs.
//!
//! Three families of failure:
//! - **configuration**: rejected up front, never retried (bad backend
//!   name, rate outside [0,1], empty trial budget, malformed scan range)
//! - **numerical instability**: state-vector norm or stabilizer
//!   eigenvalue drifting away from its exact value
//! - **decoding inconsistency**: a decoder contract violated mid-trial
//!   (residual syndrome after correction, defect left unmatched)
//!
//! A logical error after decoding is *not* an error value. It is the
//! counted outcome a verified trial reports; only broken runs produce
//! `QecError`.

use thiserror::Error;

/// Errors surfaced by code construction, simulation and decoding.
#[derive(Debug, Error)]
pub enum QecError {
    /// Requested engine is not in the closed set.
    #[error("unknown backend `{name}`: expected `statevector` or `circuit`")]
    UnknownBackend { name: String },

    /// Physical error probability outside [0, 1].
    #[error("physical error rate {0} is outside [0, 1]")]
    RateOutOfRange(f64),

    /// A Monte Carlo run was asked for zero trials.
    #[error("trial count must be at least 1")]
    EmptyTrialBudget,

    /// Scan rates must increase strictly so curves can be interpolated.
    #[error("scan rates must be strictly ascending (violation at index {index})")]
    RatesNotAscending { index: usize },

    /// Planar lattices need at least distance 2.
    #[error("lattice distance {d} is below the minimum of 2")]
    LatticeTooSmall { d: usize },

    /// State norm left the unit sphere beyond tolerance.
    #[error("state norm {norm:.12} drifted beyond tolerance during {operation}")]
    NormDrift { operation: &'static str, norm: f64 },

    /// A stabilizer expectation came back away from ±1.
    #[error("generator expectation {value:.6} is not ±1 during {operation}")]
    EigenvalueDrift { operation: &'static str, value: f64 },

    /// Correction failed to return the state to the codespace.
    #[error("correction left a nonzero syndrome in {context}")]
    ResidualSyndrome { context: &'static str },

    /// State-level and frame-level verification disagree on the outcome.
    #[error("state-level and frame-level verification disagree in {context}")]
    VerificationConflict { context: &'static str },

    /// The matching primitive left a defect without a partner.
    #[error("defect {index} was left unpaired by the matching solver")]
    UnmatchedDefect { index: usize },

    /// A trial failed; the whole scan aborts with its coordinates.
    #[error("trial {trial} at rate {rate} aborted: {source}")]
    TrialAborted {
        rate: f64,
        trial: usize,
        #[source]
        source: Box<QecError>,
    },
}

impl QecError {
    /// Wrap a backend name that failed to parse.
    pub fn unknown_backend(name: impl Into<String>) -> Self {
        Self::UnknownBackend { name: name.into() }
    }

    /// Attach scan coordinates to a failed trial.
    pub fn trial_aborted(rate: f64, trial: usize, source: QecError) -> Self {
        Self::TrialAborted {
            rate,
            trial,
            source: Box::new(source),
        }
    }

    /// True for the configuration family: errors a caller caused and
    /// must fix before retrying.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownBackend { .. }
                | Self::RateOutOfRange(_)
                | Self::EmptyTrialBudget
                | Self::RatesNotAscending { .. }
                | Self::LatticeTooSmall { .. }
        )
    }
}
