//! Pauli operators and multi-qubit Pauli strings.
//!
//! Error patterns and observables share one algebraic object: a
//! `PauliString` assigns one Pauli to every qubit. Composition is
//! qubit-wise Pauli multiplication with the group phase dropped
//! (Y = iXZ convention), which is all frame tracking needs: two X
//! errors cancel, and X followed by Z on one qubit leaves a Y.

use std::fmt;

/// A single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    /// Phase-free Pauli product (Y = iXZ, phase dropped).
    pub fn times(self, other: Pauli) -> Pauli {
        use Pauli::*;
        match (self, other) {
            (I, p) | (p, I) => p,
            (a, b) if a == b => I,
            (X, Y) | (Y, X) => Z,
            (X, Z) | (Z, X) => Y,
            (Y, Z) | (Z, Y) => X,
            _ => unreachable!(),
        }
    }

    /// Whether the two single-qubit operators commute.
    pub fn commutes_with(self, other: Pauli) -> bool {
        self == Pauli::I || other == Pauli::I || self == other
    }

    pub fn is_identity(self) -> bool {
        self == Pauli::I
    }

    /// True when the operator has an X component (X or Y).
    pub fn has_x(self) -> bool {
        matches!(self, Pauli::X | Pauli::Y)
    }

    /// True when the operator has a Z component (Z or Y).
    pub fn has_z(self) -> bool {
        matches!(self, Pauli::Z | Pauli::Y)
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        };
        write!(f, "{}", c)
    }
}

/// A Pauli assignment over a fixed qubit register.
///
/// Doubles as the error-pattern type (which Pauli hit which qubit) and
/// the observable type (which Pauli string to measure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauliString {
    paulis: Vec<Pauli>,
}

impl PauliString {
    /// The identity on `n` qubits (no errors anywhere).
    pub fn identity(n: usize) -> Self {
        Self {
            paulis: vec![Pauli::I; n],
        }
    }

    /// A single Pauli on one qubit of an `n`-qubit register.
    pub fn single(n: usize, qubit: usize, p: Pauli) -> Self {
        assert!(qubit < n, "qubit {} out of range for {} qubits", qubit, n);
        let mut s = Self::identity(n);
        s.paulis[qubit] = p;
        s
    }

    pub fn from_paulis(paulis: Vec<Pauli>) -> Self {
        Self { paulis }
    }

    /// Register width.
    pub fn len(&self) -> usize {
        self.paulis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paulis.is_empty()
    }

    pub fn get(&self, qubit: usize) -> Pauli {
        self.paulis[qubit]
    }

    pub fn set(&mut self, qubit: usize, p: Pauli) {
        self.paulis[qubit] = p;
    }

    /// Number of non-identity sites.
    pub fn weight(&self) -> usize {
        self.paulis.iter().filter(|p| !p.is_identity()).count()
    }

    pub fn is_identity(&self) -> bool {
        self.paulis.iter().all(|p| p.is_identity())
    }

    /// Qubits carrying a non-identity Pauli.
    pub fn support(&self) -> Vec<usize> {
        self.paulis
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_identity())
            .map(|(q, _)| q)
            .collect()
    }

    /// Qubit-wise phase-free product of two equal-width strings.
    pub fn compose(&self, other: &PauliString) -> PauliString {
        assert_eq!(
            self.len(),
            other.len(),
            "composed Pauli strings must have equal width"
        );
        let paulis = self
            .paulis
            .iter()
            .zip(other.paulis.iter())
            .map(|(&a, &b)| a.times(b))
            .collect();
        PauliString { paulis }
    }

    /// Strings commute iff they anticommute on an even number of sites.
    pub fn commutes_with(&self, other: &PauliString) -> bool {
        assert_eq!(self.len(), other.len());
        let anticommuting = self
            .paulis
            .iter()
            .zip(other.paulis.iter())
            .filter(|(&a, &b)| !a.commutes_with(b))
            .count();
        anticommuting % 2 == 0
    }

    /// Bit mask of qubits with an X component (registers up to 64 qubits).
    pub fn x_mask(&self) -> u64 {
        assert!(self.len() <= 64, "bit masks cover at most 64 qubits");
        self.paulis
            .iter()
            .enumerate()
            .filter(|(_, p)| p.has_x())
            .fold(0u64, |mask, (q, _)| mask | (1 << q))
    }

    /// Bit mask of qubits with a Z component (registers up to 64 qubits).
    pub fn z_mask(&self) -> u64 {
        assert!(self.len() <= 64, "bit masks cover at most 64 qubits");
        self.paulis
            .iter()
            .enumerate()
            .filter(|(_, p)| p.has_z())
            .fold(0u64, |mask, (q, _)| mask | (1 << q))
    }

    /// Number of Y sites (each contributes one factor of i in Y = iXZ).
    pub fn y_count(&self) -> usize {
        self.paulis.iter().filter(|&&p| p == Pauli::Y).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pauli> + '_ {
        self.paulis.iter().copied()
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.paulis {
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Pauli::*;

    #[test]
    fn test_pauli_product_table() {
        for p in [I, X, Y, Z] {
            assert_eq!(I.times(p), p);
            assert_eq!(p.times(I), p);
            assert_eq!(p.times(p), I);
        }
        assert_eq!(X.times(Y), Z);
        assert_eq!(Y.times(X), Z);
        assert_eq!(X.times(Z), Y);
        assert_eq!(Z.times(X), Y);
        assert_eq!(Y.times(Z), X);
        assert_eq!(Z.times(Y), X);
    }

    #[test]
    fn test_single_qubit_commutation() {
        assert!(X.commutes_with(X));
        assert!(X.commutes_with(I));
        assert!(!X.commutes_with(Z));
        assert!(!X.commutes_with(Y));
        assert!(!Y.commutes_with(Z));
    }

    #[test]
    fn test_compose_cancels() {
        let a = PauliString::single(4, 2, X);
        let product = a.compose(&a);
        assert!(product.is_identity());
    }

    #[test]
    fn test_compose_merges_into_y() {
        let x = PauliString::single(4, 1, X);
        let z = PauliString::single(4, 1, Z);
        let product = x.compose(&z);
        assert_eq!(product.get(1), Y);
        assert_eq!(product.weight(), 1);
    }

    #[test]
    fn test_string_commutation_parity() {
        // X0 X1 vs Z0 Z1: two anticommuting sites, so the strings commute.
        let mut xx = PauliString::identity(3);
        xx.set(0, X);
        xx.set(1, X);
        let mut zz = PauliString::identity(3);
        zz.set(0, Z);
        zz.set(1, Z);
        assert!(xx.commutes_with(&zz));

        // X0 vs Z0: one anticommuting site.
        let x0 = PauliString::single(3, 0, X);
        let z0 = PauliString::single(3, 0, Z);
        assert!(!x0.commutes_with(&z0));

        // Disjoint supports always commute.
        let z2 = PauliString::single(3, 2, Z);
        assert!(x0.commutes_with(&z2));
    }

    #[test]
    fn test_weight_and_support() {
        let mut s = PauliString::identity(5);
        s.set(0, Y);
        s.set(3, Z);
        assert_eq!(s.weight(), 2);
        assert_eq!(s.support(), vec![0, 3]);
        assert!(!s.is_identity());
    }

    #[test]
    fn test_masks_split_y() {
        let mut s = PauliString::identity(4);
        s.set(0, X);
        s.set(1, Y);
        s.set(2, Z);
        assert_eq!(s.x_mask(), 0b0011);
        assert_eq!(s.z_mask(), 0b0110);
        assert_eq!(s.y_count(), 1);
    }

    #[test]
    fn test_display() {
        let mut s = PauliString::identity(4);
        s.set(1, X);
        s.set(3, Z);
        assert_eq!(format!("{}", s), "IXIZ");
    }
}
