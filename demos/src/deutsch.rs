//! Deutsch and Deutsch–Jozsa algorithms.
//!
//! For an oracle over `k` input qubits the circuit is:
//!
//! ```text
//! |0…0⟩|1⟩ ─ H^(k+1) ─ U_f ─ H^k ⊗ I ─ measure inputs
//! ```
//!
//! The inputs read all zeros with probability 1 when `f` is constant and
//! with probability 0 when `f` is balanced.

use std::fmt;

use clap::ValueEnum;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use qreg_core::{Complex64, Gate, Oracle, Register};

use crate::error::DemoResult;

/// The four one-bit functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OracleKind {
    /// `f(x) = 0`
    Constant0,
    /// `f(x) = 1`
    Constant1,
    /// `f(x) = x`
    Identity,
    /// `f(x) = ¬x`
    Not,
}

impl OracleKind {
    /// Every one-bit function.
    pub const ALL: [OracleKind; 4] = [
        OracleKind::Constant0,
        OracleKind::Constant1,
        OracleKind::Identity,
        OracleKind::Not,
    ];

    /// Build the oracle for this function.
    pub fn oracle(self) -> Oracle {
        match self {
            OracleKind::Constant0 => Oracle::one_bit([false, false]),
            OracleKind::Constant1 => Oracle::one_bit([true, true]),
            OracleKind::Identity => Oracle::identity(),
            OracleKind::Not => Oracle::negation(),
        }
    }

    /// Whether the function is constant.
    pub fn is_constant(self) -> bool {
        matches!(self, OracleKind::Constant0 | OracleKind::Constant1)
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OracleKind::Constant0 => "constant-0",
            OracleKind::Constant1 => "constant-1",
            OracleKind::Identity => "identity",
            OracleKind::Not => "not",
        };
        f.write_str(name)
    }
}

/// Classification produced by the algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// All input qubits read zero.
    Constant,
    /// At least one input qubit read one.
    Balanced,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Constant => f.write_str("constant"),
            Verdict::Balanced => f.write_str("balanced"),
        }
    }
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeutschOutcome {
    /// Measured input qubits, big-endian.
    pub measured: String,
    /// Classification derived from `measured`.
    pub verdict: Verdict,
    /// Born probability of the verdict before sampling.
    pub confidence: f64,
}

/// Build the pre-measurement state for `oracle`.
pub fn prepare(oracle: &Oracle) -> DemoResult<Register> {
    let k = oracle.input_qubits();
    let start = format!("{}1", "0".repeat(k));
    let mut reg = Register::with_amplitudes(k + 1, [(start.as_str(), Complex64::new(1.0, 0.0))])?;

    reg.apply(Gate::H, None)?;
    oracle.apply(&mut reg)?;
    for q in 0..k {
        reg.apply(Gate::H, Some(q))?;
    }
    Ok(reg)
}

/// Run the algorithm once and classify `oracle`.
pub fn run_deutsch_jozsa<R: Rng + ?Sized>(
    oracle: &Oracle,
    rng: &mut R,
) -> DemoResult<DeutschOutcome> {
    let k = oracle.input_qubits();
    let reg = prepare(oracle)?;
    debug!(input_qubits = k, state = %reg, "prepared Deutsch–Jozsa register");

    // Inputs all zero ⇔ index 0 or 1 (ancilla either way).
    let p_constant = reg.probability_of(0)? + reg.probability_of(1)?;

    let outcome = reg.sample(rng);
    let measured = outcome[..k].to_string();
    let verdict = if measured.chars().all(|c| c == '0') {
        Verdict::Constant
    } else {
        Verdict::Balanced
    };
    let confidence = match verdict {
        Verdict::Constant => p_constant,
        Verdict::Balanced => 1.0 - p_constant,
    };

    info!(%measured, %verdict, confidence, "Deutsch–Jozsa run complete");
    Ok(DeutschOutcome {
        measured,
        verdict,
        confidence,
    })
}
