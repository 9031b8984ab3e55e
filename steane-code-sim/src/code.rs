//! Steane [[7,1,3]] stabilizer structure and syndrome lookup decoding.
//!
//! The code is the CSS construction over the [7,4] Hamming code: the
//! three Hamming parity checks give both the X-type and the Z-type
//! stabilizer generators, on identical supports. Column q of the check
//! matrix is the binary expansion of q+1, so a single-qubit error
//! announces its own position: the three X-type outcomes read as a
//! binary number name the qubit carrying a Z error, and the Z-type
//! outcomes name the qubit carrying an X error.

use qec_core::pauli::{Pauli, PauliString};

/// Physical qubits per block.
pub const N_QUBITS: usize = 7;
/// Logical qubits per block.
pub const N_LOGICAL: usize = 1;
/// Code distance.
pub const DISTANCE: usize = 3;
/// Stabilizer generators (three X-type, three Z-type).
pub const N_GENERATORS: usize = 6;

/// Published pseudo-threshold for the fault-tolerant Steane gadget,
/// quoted for comparison against the code-capacity crossing this crate
/// measures directly.
pub const REFERENCE_PSEUDO_THRESHOLD: f64 = 9.3e-5;

/// Hamming parity-check supports as qubit bitmasks. Bit q of mask g is
/// set when qubit q participates in generator g; row 0 is the most
/// significant bit of the column values.
pub const GENERATOR_MASKS: [u8; 3] = [0b111_1000, 0b110_0110, 0b101_0101];

/// Basis-state bitmasks of the eight codewords spanning the logical
/// zero state: the XOR span of the generator masks.
pub fn codeword_masks() -> [u8; 8] {
    let mut masks = [0u8; 8];
    for (i, mask) in masks.iter_mut().enumerate() {
        let mut word = 0u8;
        for (g, generator) in GENERATOR_MASKS.iter().enumerate() {
            if i & (1 << g) != 0 {
                word ^= generator;
            }
        }
        *mask = word;
    }
    masks
}

fn generator_from_mask(mask: u8, pauli: Pauli) -> PauliString {
    let mut string = PauliString::identity(N_QUBITS);
    for qubit in 0..N_QUBITS {
        if mask & (1 << qubit) != 0 {
            string.set(qubit, pauli);
        }
    }
    string
}

/// X-type generator `g` (detects Z errors).
pub fn x_generator(g: usize) -> PauliString {
    generator_from_mask(GENERATOR_MASKS[g], Pauli::X)
}

/// Z-type generator `g` (detects X errors).
pub fn z_generator(g: usize) -> PauliString {
    generator_from_mask(GENERATOR_MASKS[g], Pauli::Z)
}

/// All six generators, X-type first.
pub fn generators() -> Vec<PauliString> {
    let mut all = Vec::with_capacity(N_GENERATORS);
    for g in 0..GENERATOR_MASKS.len() {
        all.push(x_generator(g));
    }
    for g in 0..GENERATOR_MASKS.len() {
        all.push(z_generator(g));
    }
    all
}

/// Transversal logical X.
pub fn logical_x() -> PauliString {
    generator_from_mask(0x7F, Pauli::X)
}

/// Transversal logical Z.
pub fn logical_z() -> PauliString {
    generator_from_mask(0x7F, Pauli::Z)
}

/// Outcomes of the six stabilizer measurements. Bits 0..3 are the
/// X-type generators, bits 3..6 the Z-type generators; `true` marks a
/// -1 eigenvalue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syndrome {
    bits: [bool; N_GENERATORS],
}

impl Syndrome {
    pub fn new(bits: [bool; N_GENERATORS]) -> Self {
        Syndrome { bits }
    }

    /// Syndrome a Pauli error pattern would produce, from commutation
    /// parities alone.
    pub fn from_error(error: &PauliString) -> Self {
        let z_mask = error.z_mask() as u8;
        let x_mask = error.x_mask() as u8;
        let mut bits = [false; N_GENERATORS];
        for (g, mask) in GENERATOR_MASKS.iter().enumerate() {
            bits[g] = (mask & z_mask).count_ones() % 2 == 1;
            bits[3 + g] = (mask & x_mask).count_ones() % 2 == 1;
        }
        Syndrome { bits }
    }

    pub fn bits(&self) -> &[bool; N_GENERATORS] {
        &self.bits
    }

    pub fn is_clean(&self) -> bool {
        self.bits.iter().all(|&b| !b)
    }

    /// X-type outcomes as a 3-bit value, generator 0 most significant.
    /// Non-zero values name 1 + the qubit carrying a Z error.
    pub fn x_checks(&self) -> u8 {
        (u8::from(self.bits[0]) << 2) | (u8::from(self.bits[1]) << 1) | u8::from(self.bits[2])
    }

    /// Z-type outcomes as a 3-bit value, generator 0 most significant.
    /// Non-zero values name 1 + the qubit carrying an X error.
    pub fn z_checks(&self) -> u8 {
        (u8::from(self.bits[3]) << 2) | (u8::from(self.bits[4]) << 1) | u8::from(self.bits[5])
    }

    /// Index into a 64-entry lookup table.
    pub fn table_index(&self) -> usize {
        ((self.x_checks() as usize) << 3) | self.z_checks() as usize
    }
}

impl std::fmt::Display for Syndrome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, &bit) in self.bits.iter().enumerate() {
            if i == 3 {
                write!(f, "|")?;
            }
            write!(f, "{}", u8::from(bit))?;
        }
        Ok(())
    }
}

/// Minimum-weight correction for every possible syndrome, built once.
///
/// Distance 3 makes the map trivial: each 3-bit half points directly at
/// one qubit, Z for the X-check half and X for the Z-check half, and a
/// coincidence on the same qubit merges into a single Y.
pub struct LookupDecoder {
    table: Vec<PauliString>,
}

impl LookupDecoder {
    pub fn new() -> Self {
        let mut table = Vec::with_capacity(64);
        for sx in 0..8u8 {
            for sz in 0..8u8 {
                let mut correction = PauliString::identity(N_QUBITS);
                if sx != 0 {
                    correction.set(sx as usize - 1, Pauli::Z);
                }
                if sz != 0 {
                    let qubit = sz as usize - 1;
                    let merged = correction.get(qubit).times(Pauli::X);
                    correction.set(qubit, merged);
                }
                table.push(correction);
            }
        }
        LookupDecoder { table }
    }

    pub fn decode(&self, syndrome: &Syndrome) -> PauliString {
        self.table[syndrome.table_index()].clone()
    }
}

impl Default for LookupDecoder {
    fn default() -> Self {
        Self::new()
    }
}
