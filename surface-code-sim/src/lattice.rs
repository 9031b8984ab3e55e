//! Planar lattice with Pauli frame error tracking.
//!
//! A distance-d patch with open boundaries. X-checks sit on a d×(d-1)
//! grid whose left and right sides are rough; Z-checks sit on the
//! (d-1)×d dual grid whose top and bottom are smooth. Qubits sit on the
//! links between checks, d² + (d-1)² in total:
//! - d² **row qubits**: Row(r,k) joins X-checks (r,k-1) and (r,k); the
//!   k=0 and k=d-1 columns dangle off the rough boundaries. On the dual
//!   grid Row(r,k) separates Z-checks (r-1,k) and (r,k), dangling at
//!   the top (r=0) and bottom (r=d-1).
//! - (d-1)² **column qubits**: Column(r,c) joins X-checks (r,c) and
//!   (r+1,c), and separates Z-checks (r,c) and (r,c+1). Column qubits
//!   never touch a boundary.
//!
//! The logical X runs down the left rough boundary (Row(r,0) for all
//! r); the logical Z runs across the top row (Row(0,k) for all k). They
//! share exactly one qubit, Row(0,0), so they anticommute.
//!
//! Errors are tracked as classical bit vectors (Pauli frame), giving
//! O(d²) memory and operations rather than exponential state vectors.

use qec_core::error::QecError;
use qec_core::pauli::PauliString;
use smallvec::SmallVec;

/// Orientation of the link a data qubit sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDir {
    Row,
    Column,
}

/// A data qubit, identified by link orientation and grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataQubit {
    pub dir: LinkDir,
    pub row: usize,
    pub col: usize,
}

impl DataQubit {
    pub fn row(row: usize, col: usize) -> Self {
        DataQubit {
            dir: LinkDir::Row,
            row,
            col,
        }
    }

    pub fn column(row: usize, col: usize) -> Self {
        DataQubit {
            dir: LinkDir::Column,
            row,
            col,
        }
    }
}

/// Taxicab distance between two checks of the same grid.
pub fn check_distance(a: (usize, usize), b: (usize, usize)) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// The planar patch with Pauli frame error tracking.
///
/// An X error on a qubit flips the parity of its adjacent Z-checks; a
/// Z error flips its adjacent X-checks. Boundary qubits dangle off one
/// check only, so chains can terminate invisibly at the matching
/// boundary type.
#[derive(Debug, Clone)]
pub struct PlanarLattice {
    d: usize,
    x_frame: Vec<bool>,
    z_frame: Vec<bool>,
}

impl PlanarLattice {
    /// Create a clean distance-d patch.
    pub fn new(d: usize) -> Result<Self, QecError> {
        if d < 2 {
            return Err(QecError::LatticeTooSmall { d });
        }
        let num_qubits = d * d + (d - 1) * (d - 1);
        Ok(Self {
            d,
            x_frame: vec![false; num_qubits],
            z_frame: vec![false; num_qubits],
        })
    }

    /// Code distance.
    pub fn distance(&self) -> usize {
        self.d
    }

    /// Total number of data qubits, d² + (d-1)².
    pub fn num_qubits(&self) -> usize {
        self.d * self.d + (self.d - 1) * (self.d - 1)
    }

    /// X-check grid shape, (rows, cols) = (d, d-1).
    pub fn x_check_grid(&self) -> (usize, usize) {
        (self.d, self.d - 1)
    }

    /// Z-check grid shape, (rows, cols) = (d-1, d).
    pub fn z_check_grid(&self) -> (usize, usize) {
        (self.d - 1, self.d)
    }

    /// Convert a qubit to its linear frame index.
    pub fn qubit_index(&self, qubit: DataQubit) -> usize {
        match qubit.dir {
            LinkDir::Row => qubit.row * self.d + qubit.col,
            LinkDir::Column => self.d * self.d + qubit.row * (self.d - 1) + qubit.col,
        }
    }

    /// Convert a linear frame index back to a qubit.
    pub fn index_to_qubit(&self, index: usize) -> DataQubit {
        let dd = self.d * self.d;
        if index < dd {
            DataQubit::row(index / self.d, index % self.d)
        } else {
            let rest = index - dd;
            DataQubit::column(rest / (self.d - 1), rest % (self.d - 1))
        }
    }

    /// Apply (toggle) an X error on the given qubit.
    pub fn apply_x_error(&mut self, qubit: DataQubit) {
        let index = self.qubit_index(qubit);
        self.x_frame[index] ^= true;
    }

    /// Apply (toggle) a Z error on the given qubit.
    pub fn apply_z_error(&mut self, qubit: DataQubit) {
        let index = self.qubit_index(qubit);
        self.z_frame[index] ^= true;
    }

    /// Apply (toggle) a Y error on the given qubit (Y = iXZ).
    pub fn apply_y_error(&mut self, qubit: DataQubit) {
        let index = self.qubit_index(qubit);
        self.x_frame[index] ^= true;
        self.z_frame[index] ^= true;
    }

    pub fn has_x_error(&self, qubit: DataQubit) -> bool {
        self.x_frame[self.qubit_index(qubit)]
    }

    pub fn has_z_error(&self, qubit: DataQubit) -> bool {
        self.z_frame[self.qubit_index(qubit)]
    }

    /// Raw X error frame (read-only).
    pub fn x_frame(&self) -> &[bool] {
        &self.x_frame
    }

    /// Raw Z error frame (read-only).
    pub fn z_frame(&self) -> &[bool] {
        &self.z_frame
    }

    /// Reset all errors to the clean state.
    pub fn clear(&mut self) {
        self.x_frame.iter_mut().for_each(|e| *e = false);
        self.z_frame.iter_mut().for_each(|e| *e = false);
    }

    /// Fold a sampled Pauli pattern into the frames, qubit by qubit.
    pub fn apply_pauli_pattern(&mut self, pattern: &PauliString) {
        assert_eq!(pattern.len(), self.num_qubits());
        for (index, pauli) in pattern.iter().enumerate() {
            if pauli.has_x() {
                self.x_frame[index] ^= true;
            }
            if pauli.has_z() {
                self.z_frame[index] ^= true;
            }
        }
    }

    /// Qubits in the support of X-check (row, col). Two row qubits
    /// always, plus the column qubits above and below when they exist.
    pub fn x_check_qubits(&self, row: usize, col: usize) -> SmallVec<[DataQubit; 4]> {
        let mut qubits = SmallVec::new();
        qubits.push(DataQubit::row(row, col));
        qubits.push(DataQubit::row(row, col + 1));
        if row > 0 {
            qubits.push(DataQubit::column(row - 1, col));
        }
        if row < self.d - 1 {
            qubits.push(DataQubit::column(row, col));
        }
        qubits
    }

    /// Qubits in the support of Z-check (row, col). Two row qubits
    /// always, plus the column qubits left and right when they exist.
    pub fn z_check_qubits(&self, row: usize, col: usize) -> SmallVec<[DataQubit; 4]> {
        let mut qubits = SmallVec::new();
        qubits.push(DataQubit::row(row, col));
        qubits.push(DataQubit::row(row + 1, col));
        if col > 0 {
            qubits.push(DataQubit::column(row, col - 1));
        }
        if col < self.d - 1 {
            qubits.push(DataQubit::column(row, col));
        }
        qubits
    }

    /// Distance from an X-check to its nearest rough boundary.
    pub fn x_boundary_distance(&self, check: (usize, usize)) -> usize {
        let (_, c) = check;
        (c + 1).min(self.d - 1 - c)
    }

    /// Distance from a Z-check to its nearest smooth boundary.
    pub fn z_boundary_distance(&self, check: (usize, usize)) -> usize {
        let (r, _) = check;
        (r + 1).min(self.d - 1 - r)
    }

    /// L-shaped path of qubits whose Z errors move an X-defect from
    /// check `a` to check `b`: a column leg at a's column, then a row
    /// leg at b's row.
    pub fn x_check_path(&self, a: (usize, usize), b: (usize, usize)) -> Vec<DataQubit> {
        let mut path = Vec::with_capacity(check_distance(a, b));
        // Vertical moves (r,c)->(r+1,c) cross Column(r,c).
        let (rlo, rhi) = (a.0.min(b.0), a.0.max(b.0));
        for r in rlo..rhi {
            path.push(DataQubit::column(r, a.1));
        }
        // Horizontal moves (r,c)->(r,c+1) cross Row(r,c+1).
        let (clo, chi) = (a.1.min(b.1), a.1.max(b.1));
        for k in clo + 1..=chi {
            path.push(DataQubit::row(b.0, k));
        }
        path
    }

    /// Path taking an X-defect off the nearest rough boundary. Ties go
    /// left.
    pub fn x_boundary_path(&self, check: (usize, usize)) -> Vec<DataQubit> {
        let (r, c) = check;
        if c + 1 <= self.d - 1 - c {
            (0..=c).map(|k| DataQubit::row(r, k)).collect()
        } else {
            (c + 1..self.d).map(|k| DataQubit::row(r, k)).collect()
        }
    }

    /// L-shaped path of qubits whose X errors move a Z-defect from
    /// check `a` to check `b`.
    pub fn z_check_path(&self, a: (usize, usize), b: (usize, usize)) -> Vec<DataQubit> {
        let mut path = Vec::with_capacity(check_distance(a, b));
        // Vertical moves (r,c)->(r+1,c) cross Row(r+1,c).
        let (rlo, rhi) = (a.0.min(b.0), a.0.max(b.0));
        for k in rlo + 1..=rhi {
            path.push(DataQubit::row(k, a.1));
        }
        // Horizontal moves (r,c)->(r,c+1) cross Column(r,c).
        let (clo, chi) = (a.1.min(b.1), a.1.max(b.1));
        for k in clo..chi {
            path.push(DataQubit::column(b.0, k));
        }
        path
    }

    /// Path taking a Z-defect off the nearest smooth boundary. Ties go
    /// up.
    pub fn z_boundary_path(&self, check: (usize, usize)) -> Vec<DataQubit> {
        let (r, c) = check;
        if r + 1 <= self.d - 1 - r {
            (0..=r).map(|k| DataQubit::row(k, c)).collect()
        } else {
            (r + 1..self.d).map(|k| DataQubit::row(k, c)).collect()
        }
    }

    /// Odd X-frame parity along the top-row cut marks a logical X: any
    /// undetectable X chain crossing the patch trips it, any stabilizer
    /// product leaves it even.
    pub fn has_logical_x_error(&self) -> bool {
        (0..self.d)
            .filter(|&k| self.x_frame[self.qubit_index(DataQubit::row(0, k))])
            .count()
            % 2
            == 1
    }

    /// Odd Z-frame parity along the left-column cut marks a logical Z.
    pub fn has_logical_z_error(&self) -> bool {
        (0..self.d)
            .filter(|&r| self.z_frame[self.qubit_index(DataQubit::row(r, 0))])
            .count()
            % 2
            == 1
    }

    pub fn has_any_logical_error(&self) -> bool {
        self.has_logical_x_error() || self.has_logical_z_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x_check_parity(lattice: &PlanarLattice, row: usize, col: usize) -> bool {
        lattice
            .x_check_qubits(row, col)
            .iter()
            .filter(|&&q| lattice.has_z_error(q))
            .count()
            % 2
            == 1
    }

    fn z_check_parity(lattice: &PlanarLattice, row: usize, col: usize) -> bool {
        lattice
            .z_check_qubits(row, col)
            .iter()
            .filter(|&&q| lattice.has_x_error(q))
            .count()
            % 2
            == 1
    }

    #[test]
    fn test_distance_below_two_is_rejected() {
        for d in [0, 1] {
            let err = PlanarLattice::new(d).unwrap_err();
            assert!(matches!(err, QecError::LatticeTooSmall { .. }));
            assert!(err.is_configuration());
        }
    }

    #[test]
    fn test_qubit_count() {
        assert_eq!(PlanarLattice::new(2).unwrap().num_qubits(), 5);
        assert_eq!(PlanarLattice::new(3).unwrap().num_qubits(), 13);
        assert_eq!(PlanarLattice::new(5).unwrap().num_qubits(), 41);
    }

    #[test]
    fn test_qubit_index_roundtrip() {
        let lattice = PlanarLattice::new(4).unwrap();
        for index in 0..lattice.num_qubits() {
            let qubit = lattice.index_to_qubit(index);
            assert_eq!(lattice.qubit_index(qubit), index);
        }
    }

    #[test]
    fn test_check_supports_have_boundary_degrees() {
        let lattice = PlanarLattice::new(4).unwrap();
        let (xr, xc) = lattice.x_check_grid();
        for r in 0..xr {
            for c in 0..xc {
                let expected = if r == 0 || r == xr - 1 { 3 } else { 4 };
                assert_eq!(lattice.x_check_qubits(r, c).len(), expected);
            }
        }
        let (zr, zc) = lattice.z_check_grid();
        for r in 0..zr {
            for c in 0..zc {
                let expected = if c == 0 || c == zc - 1 { 3 } else { 4 };
                assert_eq!(lattice.z_check_qubits(r, c).len(), expected);
            }
        }
    }

    #[test]
    fn test_toggle_errors() {
        let mut lattice = PlanarLattice::new(3).unwrap();
        let qubit = DataQubit::row(1, 1);
        assert!(!lattice.has_x_error(qubit));
        lattice.apply_x_error(qubit);
        assert!(lattice.has_x_error(qubit));
        lattice.apply_x_error(qubit);
        assert!(!lattice.has_x_error(qubit));
        lattice.apply_y_error(qubit);
        assert!(lattice.has_x_error(qubit) && lattice.has_z_error(qubit));
    }

    #[test]
    fn test_path_lengths_match_distances() {
        let lattice = PlanarLattice::new(5).unwrap();
        let x_pairs = [((0, 0), (3, 2)), ((1, 3), (4, 0)), ((2, 2), (2, 2))];
        for (a, b) in x_pairs {
            assert_eq!(lattice.x_check_path(a, b).len(), check_distance(a, b));
        }
        let z_pairs = [((0, 0), (3, 4)), ((1, 2), (3, 1))];
        for (a, b) in z_pairs {
            assert_eq!(lattice.z_check_path(a, b).len(), check_distance(a, b));
        }
        let (xr, xc) = lattice.x_check_grid();
        for r in 0..xr {
            for c in 0..xc {
                assert_eq!(
                    lattice.x_boundary_path((r, c)).len(),
                    lattice.x_boundary_distance((r, c))
                );
            }
        }
        let (zr, zc) = lattice.z_check_grid();
        for r in 0..zr {
            for c in 0..zc {
                assert_eq!(
                    lattice.z_boundary_path((r, c)).len(),
                    lattice.z_boundary_distance((r, c))
                );
            }
        }
    }

    #[test]
    fn test_x_check_path_flips_only_its_endpoints() {
        let mut lattice = PlanarLattice::new(5).unwrap();
        let (a, b) = ((0, 1), (3, 3));
        for qubit in lattice.x_check_path(a, b) {
            lattice.apply_z_error(qubit);
        }
        let (xr, xc) = lattice.x_check_grid();
        for r in 0..xr {
            for c in 0..xc {
                let expected = (r, c) == a || (r, c) == b;
                assert_eq!(
                    x_check_parity(&lattice, r, c),
                    expected,
                    "chain endpoints alone must light up, check ({}, {})",
                    r,
                    c
                );
            }
        }
    }

    #[test]
    fn test_boundary_path_flips_only_its_source() {
        let mut lattice = PlanarLattice::new(5).unwrap();
        let check = (2, 3);
        for qubit in lattice.x_boundary_path(check) {
            lattice.apply_z_error(qubit);
        }
        let (xr, xc) = lattice.x_check_grid();
        for r in 0..xr {
            for c in 0..xc {
                assert_eq!(x_check_parity(&lattice, r, c), (r, c) == check);
            }
        }

        let mut lattice = PlanarLattice::new(5).unwrap();
        let check = (3, 1);
        for qubit in lattice.z_boundary_path(check) {
            lattice.apply_x_error(qubit);
        }
        let (zr, zc) = lattice.z_check_grid();
        for r in 0..zr {
            for c in 0..zc {
                assert_eq!(z_check_parity(&lattice, r, c), (r, c) == check);
            }
        }
    }

    #[test]
    fn test_stabilizers_are_invisible() {
        // Z errors on a Z-check support form a stabilizer: no defects,
        // no logical.
        let mut lattice = PlanarLattice::new(4).unwrap();
        for qubit in lattice.z_check_qubits(1, 1) {
            lattice.apply_z_error(qubit);
        }
        let (xr, xc) = lattice.x_check_grid();
        for r in 0..xr {
            for c in 0..xc {
                assert!(!x_check_parity(&lattice, r, c));
            }
        }
        assert!(!lattice.has_logical_z_error());

        let mut lattice = PlanarLattice::new(4).unwrap();
        for qubit in lattice.x_check_qubits(2, 1) {
            lattice.apply_x_error(qubit);
        }
        let (zr, zc) = lattice.z_check_grid();
        for r in 0..zr {
            for c in 0..zc {
                assert!(!z_check_parity(&lattice, r, c));
            }
        }
        assert!(!lattice.has_logical_x_error());
    }

    #[test]
    fn test_logical_chains_trip_the_cuts_without_defects() {
        // Logical Z: Z errors across the top row of row qubits.
        let mut lattice = PlanarLattice::new(4).unwrap();
        for k in 0..4 {
            lattice.apply_z_error(DataQubit::row(0, k));
        }
        let (xr, xc) = lattice.x_check_grid();
        for r in 0..xr {
            for c in 0..xc {
                assert!(!x_check_parity(&lattice, r, c));
            }
        }
        assert!(lattice.has_logical_z_error());
        assert!(!lattice.has_logical_x_error());

        // Logical X: X errors down the left column of row qubits.
        let mut lattice = PlanarLattice::new(4).unwrap();
        for r in 0..4 {
            lattice.apply_x_error(DataQubit::row(r, 0));
        }
        let (zr, zc) = lattice.z_check_grid();
        for r in 0..zr {
            for c in 0..zc {
                assert!(!z_check_parity(&lattice, r, c));
            }
        }
        assert!(lattice.has_logical_x_error());
        assert!(!lattice.has_logical_z_error());
    }

    #[test]
    fn test_clear() {
        let mut lattice = PlanarLattice::new(3).unwrap();
        lattice.apply_x_error(DataQubit::row(0, 0));
        lattice.apply_z_error(DataQubit::column(1, 1));
        lattice.clear();
        assert!(lattice.x_frame().iter().all(|&e| !e));
        assert!(lattice.z_frame().iter().all(|&e| !e));
    }
}
