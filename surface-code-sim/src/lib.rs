//! # surface-code-sim
//!
//! Planar surface code simulator with minimum-weight perfect-matching
//! decoding.
//!
//! Simulates a distance-d planar patch with open boundaries using Pauli
//! frame tracking: errors live in two classical bit vectors, stabilizer
//! defects are parity violations, and decoding pairs defects (or sends
//! them to the nearest boundary) through a blossom-algorithm matching
//! solver. Correction chains run along taxicab shortest paths.
//!
//! ## Physics
//!
//! - **X-checks** live on a d×(d-1) grid with rough left/right
//!   boundaries; they detect Z errors
//! - **Z-checks** live on the (d-1)×d dual grid with smooth top/bottom
//!   boundaries; they detect X errors
//! - **Logical failure**: the residual chain after correction crosses
//!   the patch, read off as odd parity along a transverse cut
//! - **Threshold**: larger distance suppresses the logical rate below
//!   threshold and amplifies it above, so curves for different d cross

pub mod decoder;
pub mod lattice;
pub mod matching;
pub mod simulation;
pub mod syndrome;

pub mod prelude {
    pub use crate::decoder::*;
    pub use crate::lattice::*;
    pub use crate::matching::*;
    pub use crate::simulation::*;
    pub use crate::syndrome::*;
    pub use qec_core::prelude::*;
}
