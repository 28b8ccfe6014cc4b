//! Boolean-function oracles.
//!
//! An [`Oracle`] encodes `f: {0,1}^k → {0,1}` as the unitary
//! `U_f|x⟩|y⟩ = |x⟩|y ⊕ f(x)⟩` on a register of `k + 1` qubits: the first `k`
//! qubits hold `x` and the last qubit is the ancilla `y`.
//!
//! Because `y ↦ y ⊕ f(x)` is its own inverse, `U_f` only ever exchanges
//! pairs of basis states, so it is applied as a permutation of amplitudes.

use tracing::trace;

use crate::error::{StateError, StateResult};
use crate::register::{MAX_QUBITS, Register};

/// Truth table of a boolean function over `k` input qubits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oracle {
    /// Number of input qubits `k`.
    input_qubits: usize,
    /// `table[x] = f(x)`, length `2^k`.
    table: Vec<bool>,
}

impl Oracle {
    /// Build an oracle from its truth table.
    ///
    /// The table length must be a power of two; `table.len() == 2^k`.
    pub fn new(table: Vec<bool>) -> StateResult<Self> {
        let len = table.len();
        if !len.is_power_of_two() {
            return Err(StateError::InvalidOracleTable(len));
        }
        let input_qubits = len.trailing_zeros() as usize;
        if input_qubits >= MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                requested: input_qubits + 1,
                max: MAX_QUBITS,
            });
        }
        Ok(Self {
            input_qubits,
            table,
        })
    }

    /// Tabulate `f` over every `k`-bit input.
    pub fn from_fn<F>(input_qubits: usize, f: F) -> StateResult<Self>
    where
        F: Fn(usize) -> bool,
    {
        if input_qubits >= MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                requested: input_qubits + 1,
                max: MAX_QUBITS,
            });
        }
        Self::new((0..1usize << input_qubits).map(f).collect())
    }

    /// `f(x) = value` for every input.
    pub fn constant(input_qubits: usize, value: bool) -> StateResult<Self> {
        Self::from_fn(input_qubits, |_| value)
    }

    /// One-bit function given as `[f(0), f(1)]`.
    pub fn one_bit(table: [bool; 2]) -> Self {
        Self {
            input_qubits: 1,
            table: table.to_vec(),
        }
    }

    /// One-bit identity, `f(x) = x`. On two qubits this acts as CNOT.
    pub fn identity() -> Self {
        Self::one_bit([false, true])
    }

    /// One-bit negation, `f(x) = ¬x`.
    pub fn negation() -> Self {
        Self::one_bit([true, false])
    }

    /// `f(x)` = XOR of all input bits.
    pub fn parity(input_qubits: usize) -> StateResult<Self> {
        Self::from_fn(input_qubits, |x| x.count_ones() % 2 == 1)
    }

    /// Number of input qubits `k`.
    pub fn input_qubits(&self) -> usize {
        self.input_qubits
    }

    /// Register size this oracle acts on, `k + 1`.
    pub fn num_qubits(&self) -> usize {
        self.input_qubits + 1
    }

    /// `f(x)`; inputs beyond the table are out of range.
    pub fn evaluate(&self, x: usize) -> StateResult<bool> {
        self.table
            .get(x)
            .copied()
            .ok_or(StateError::IndexOutOfRange {
                index: x,
                len: self.table.len(),
            })
    }

    /// Whether `f` takes the same value everywhere.
    pub fn is_constant(&self) -> bool {
        self.table.iter().all(|&v| v == self.table[0])
    }

    /// Whether `f` is `1` on exactly half of its inputs.
    pub fn is_balanced(&self) -> bool {
        self.table.len() >= 2 && self.table.iter().filter(|&&v| v).count() * 2 == self.table.len()
    }

    /// Apply `U_f` to `register` in place.
    ///
    /// The register must have exactly `k + 1` qubits.
    pub fn apply(&self, register: &mut Register) -> StateResult<()> {
        if register.num_qubits() != self.num_qubits() {
            return Err(StateError::DimensionMismatch {
                expected: self.num_qubits(),
                got: register.num_qubits(),
            });
        }

        trace!(input_qubits = self.input_qubits, "applying oracle");
        let amplitudes = register.amplitudes_mut();
        for i in 0..amplitudes.len() {
            let x = i >> 1;
            let y = i & 1;
            let j = (x << 1) | (y ^ usize::from(self.table[x]));
            if i < j {
                amplitudes.swap(i, j);
            }
        }
        Ok(())
    }
}
