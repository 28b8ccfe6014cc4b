//! Error types for the state-vector engine.

use thiserror::Error;

/// Errors produced by register construction, gate application and oracles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StateError {
    /// A bitstring or vector length does not match the register size.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },

    /// A basis index lies beyond `2^n - 1`.
    #[error("Basis index {index} out of range for a vector of {len} amplitudes")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of amplitudes in the vector.
        len: usize,
    },

    /// Attempted to normalize an all-zero amplitude vector.
    #[error("Cannot normalize a degenerate state: total probability is zero")]
    DegenerateState,

    /// A gate or query targets a qubit the register does not have.
    #[error("Qubit {qubit} out of range for a register of {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Number of qubits in the register.
        num_qubits: usize,
    },

    /// A basis-state key contains characters other than `0` and `1`.
    #[error("Invalid bitstring '{0}': only '0' and '1' are allowed")]
    InvalidBitstring(String),

    /// An oracle truth table whose length is not a power of two.
    #[error("Oracle table length must be a power of two, got {0}")]
    InvalidOracleTable(usize),

    /// The requested register cannot be allocated.
    #[error("Register of {requested} qubits exceeds the supported maximum of {max}")]
    TooManyQubits {
        /// Requested number of qubits.
        requested: usize,
        /// Largest supported register.
        max: usize,
    },
}

/// Result type for state-vector operations.
pub type StateResult<T> = Result<T, StateError>;
