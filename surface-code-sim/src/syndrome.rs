//! Syndrome measurement for the planar patch.
//!
//! **X-check** at (r, c) = ∏ X_q over its supported qubits. It flips to
//! -1 when an odd number of Z errors sit on that support → **X-defect**.
//!
//! **Z-check** at (r, c) = ∏ Z_q over its supported qubits. It flips to
//! -1 when an odd number of X errors sit on that support → **Z-defect**.
//!
//! Unlike on a torus, defect counts need not be even: an error chain
//! can terminate invisibly on a boundary of the matching type, leaving
//! a single defect at its interior end.

use crate::lattice::PlanarLattice;

/// Result of measuring every check once.
#[derive(Debug, Clone)]
pub struct SurfaceSyndrome {
    /// X-check outcomes: true = X-defect at grid position (r, c).
    pub x_syndromes: Vec<Vec<bool>>,
    /// Z-check outcomes: true = Z-defect at grid position (r, c).
    pub z_syndromes: Vec<Vec<bool>>,
}

impl SurfaceSyndrome {
    /// Measure all X-checks and Z-checks on the current error frames.
    pub fn measure(lattice: &PlanarLattice) -> Self {
        let (xr, xc) = lattice.x_check_grid();
        let mut x_syndromes = vec![vec![false; xc]; xr];
        for (r, row) in x_syndromes.iter_mut().enumerate() {
            for (c, outcome) in row.iter_mut().enumerate() {
                let z_parity = lattice
                    .x_check_qubits(r, c)
                    .iter()
                    .filter(|&&q| lattice.has_z_error(q))
                    .count();
                *outcome = z_parity % 2 == 1;
            }
        }

        let (zr, zc) = lattice.z_check_grid();
        let mut z_syndromes = vec![vec![false; zc]; zr];
        for (r, row) in z_syndromes.iter_mut().enumerate() {
            for (c, outcome) in row.iter_mut().enumerate() {
                let x_parity = lattice
                    .z_check_qubits(r, c)
                    .iter()
                    .filter(|&&q| lattice.has_x_error(q))
                    .count();
                *outcome = x_parity % 2 == 1;
            }
        }

        Self {
            x_syndromes,
            z_syndromes,
        }
    }

    /// Grid positions of all X-defects.
    pub fn x_defects(&self) -> Vec<(usize, usize)> {
        let mut locs = Vec::new();
        for (r, row) in self.x_syndromes.iter().enumerate() {
            for (c, &syn) in row.iter().enumerate() {
                if syn {
                    locs.push((r, c));
                }
            }
        }
        locs
    }

    /// Grid positions of all Z-defects.
    pub fn z_defects(&self) -> Vec<(usize, usize)> {
        let mut locs = Vec::new();
        for (r, row) in self.z_syndromes.iter().enumerate() {
            for (c, &syn) in row.iter().enumerate() {
                if syn {
                    locs.push((r, c));
                }
            }
        }
        locs
    }

    pub fn num_x_defects(&self) -> usize {
        self.x_syndromes
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&s| s)
            .count()
    }

    pub fn num_z_defects(&self) -> usize {
        self.z_syndromes
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&s| s)
            .count()
    }

    pub fn num_defects(&self) -> usize {
        self.num_x_defects() + self.num_z_defects()
    }

    /// Check if every stabilizer reads +1.
    pub fn is_clean(&self) -> bool {
        self.num_x_defects() == 0 && self.num_z_defects() == 0
    }
}
