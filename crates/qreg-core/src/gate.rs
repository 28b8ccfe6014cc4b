//! Single-qubit gate set.

use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
/// e^(iπ/4)
const T_PHASE: Complex64 = Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);

/// Qubit-local unitary gates.
///
/// Every variant acts on one qubit. Applying a gate to a register pairs up
/// the amplitudes that differ only in the target qubit and runs
/// [`Gate::transform`] on each pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gate {
    /// Identity gate.
    #[serde(rename = "id")]
    I,
    /// Hadamard gate.
    H,
    /// Pauli-X (NOT) gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
}

impl Gate {
    /// All gates, in declaration order.
    pub const ALL: [Gate; 9] = [
        Gate::I,
        Gate::H,
        Gate::X,
        Gate::Y,
        Gate::Z,
        Gate::S,
        Gate::Sdg,
        Gate::T,
        Gate::Tdg,
    ];

    /// Get the name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Gate::I => "id",
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::T => "t",
            Gate::Tdg => "tdg",
        }
    }

    /// Number of qubits this gate acts on.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        1
    }

    /// The adjoint gate, so that `g` followed by `g.inverse()` is the identity.
    pub fn inverse(self) -> Gate {
        match self {
            Gate::S => Gate::Sdg,
            Gate::Sdg => Gate::S,
            Gate::T => Gate::Tdg,
            Gate::Tdg => Gate::T,
            g @ (Gate::I | Gate::H | Gate::X | Gate::Y | Gate::Z) => g,
        }
    }

    /// Whether applying the gate twice is the identity.
    pub fn is_self_inverse(self) -> bool {
        self.inverse() == self
    }

    /// Phase applied to the `|1⟩` branch for diagonal gates.
    ///
    /// Diagonal gates leave the `|0⟩` amplitude alone, so a register only
    /// needs to touch half of its vector for them.
    pub fn diagonal_phase(self) -> Option<Complex64> {
        match self {
            Gate::I => Some(ONE),
            Gate::Z => Some(-ONE),
            Gate::S => Some(I),
            Gate::Sdg => Some(-I),
            Gate::T => Some(T_PHASE),
            Gate::Tdg => Some(T_PHASE.conj()),
            Gate::H | Gate::X | Gate::Y => None,
        }
    }

    /// Transform one amplitude pair.
    ///
    /// `a` is the amplitude of the `|0⟩` branch of the target qubit and `b`
    /// the amplitude of the `|1⟩` branch.
    #[inline]
    pub fn transform(self, a: Complex64, b: Complex64) -> (Complex64, Complex64) {
        match self {
            Gate::I => (a, b),
            Gate::H => ((a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2),
            Gate::X => (b, a),
            Gate::Y => (-I * b, I * a),
            Gate::Z => (a, -b),
            Gate::S => (a, I * b),
            Gate::Sdg => (a, -I * b),
            Gate::T => (a, T_PHASE * b),
            Gate::Tdg => (a, T_PHASE.conj() * b),
        }
    }

    /// The 2×2 unitary matrix, row-major.
    pub fn matrix(self) -> [[Complex64; 2]; 2] {
        let (c00, c10) = self.transform(ONE, ZERO);
        let (c01, c11) = self.transform(ZERO, ONE);
        [[c00, c01], [c10, c11]]
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" | "i" => Ok(Gate::I),
            "h" => Ok(Gate::H),
            "x" | "not" => Ok(Gate::X),
            "y" => Ok(Gate::Y),
            "z" => Ok(Gate::Z),
            "s" => Ok(Gate::S),
            "sdg" => Ok(Gate::Sdg),
            "t" => Ok(Gate::T),
            "tdg" => Ok(Gate::Tdg),
            other => Err(format!("Unknown gate: '{other}'")),
        }
    }
}
