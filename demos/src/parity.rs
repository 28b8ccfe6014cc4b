//! Classical versus sampled parity checking.
//!
//! The classical checker walks every input bitstring and counts ones. The
//! quantum checker spreads a register over all basis states with a
//! Hadamard layer and measures fresh copies of it, tallying the parity of each
//! observed state.

use std::fmt;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use qreg_core::{Counts, Gate, Register};

use crate::error::DemoResult;
use crate::export::{ComparisonRow, MeasurementRecord, Method};

/// Parity of the number of ones in a bitstring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Parity {
    /// Even number of ones.
    Even,
    /// Odd number of ones.
    Odd,
}

impl Parity {
    /// Parity of `bitstring`, counting `'1'` characters.
    pub fn of(bitstring: &str) -> Parity {
        if ones(bitstring) % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Even => f.write_str("EVEN"),
            Parity::Odd => f.write_str("ODD"),
        }
    }
}

/// Number of `'1'` characters.
pub fn ones(bitstring: &str) -> usize {
    bitstring.chars().filter(|&c| c == '1').count()
}

/// Every bitstring of width `n`, in index order.
pub fn all_bitstrings(n: usize) -> Vec<String> {
    if n == 0 {
        return vec![String::new()];
    }
    (0..1usize << n).map(|i| format!("{i:0n$b}")).collect()
}

/// Even/odd tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParityTally {
    /// Inputs with even parity.
    pub even: u64,
    /// Inputs with odd parity.
    pub odd: u64,
}

impl ParityTally {
    /// Count one more input of the given parity.
    pub fn record(&mut self, parity: Parity) {
        match parity {
            Parity::Even => self.even += 1,
            Parity::Odd => self.odd += 1,
        }
    }

    /// Total recorded.
    pub fn total(&self) -> u64 {
        self.even + self.odd
    }
}

/// Result of the classical pass.
#[derive(Debug, Clone)]
pub struct ClassicalReport {
    /// Parity counts.
    pub tally: ParityTally,
    /// Wall-clock time.
    pub elapsed: Duration,
}

/// Result of the sampling pass.
#[derive(Debug, Clone)]
pub struct QuantumReport {
    /// State after the Hadamard layer.
    pub superposition: Register,
    /// Parity counts over all shots.
    pub tally: ParityTally,
    /// Frequency of each observed state.
    pub counts: Counts,
    /// Per-shot records, in shot order.
    pub records: Vec<MeasurementRecord>,
    /// Wall-clock time.
    pub elapsed: Duration,
}

/// Check the parity of every input sequentially.
pub fn classical_parity<S: AsRef<str>>(inputs: &[S]) -> ClassicalReport {
    let start = Instant::now();
    let mut tally = ParityTally::default();
    for input in inputs {
        tally.record(Parity::of(input.as_ref()));
    }
    let elapsed = start.elapsed();
    debug!(inputs = inputs.len(), ?elapsed, "classical parity pass done");
    ClassicalReport { tally, elapsed }
}

/// Apply H to every qubit of `initial` and measure `shots` fresh copies.
///
/// `on_shot` is called after each shot with its zero-based index, for
/// progress reporting.
pub fn quantum_parity<R, F>(
    initial: &Register,
    shots: usize,
    rng: &mut R,
    mut on_shot: F,
) -> DemoResult<QuantumReport>
where
    R: Rng + ?Sized,
    F: FnMut(usize),
{
    let start = Instant::now();

    let mut superposition = initial.clone();
    superposition.apply(Gate::H, None)?;

    let mut tally = ParityTally::default();
    let mut counts = Counts::new();
    let mut records = Vec::with_capacity(shots);

    for shot in 0..shots {
        // Non-destructive draw: each shot sees a fresh copy of the state.
        let index = superposition.sample_index(rng);
        let state = superposition.bitstring(index);
        let parity = Parity::of(&state);

        tally.record(parity);
        records.push(MeasurementRecord {
            measurement: shot + 1,
            ones: ones(&state),
            parity,
            probability: superposition.probability_of(index)?,
            state: state.clone(),
        });
        counts.insert(state, 1);
        on_shot(shot);
    }

    let elapsed = start.elapsed();
    debug!(shots, distinct = counts.len(), ?elapsed, "quantum parity pass done");
    Ok(QuantumReport {
        superposition,
        tally,
        counts,
        records,
        elapsed,
    })
}

/// Largest input size timed by the default sweep.
pub const SWEEP_SIZE: usize = 8;

/// Time both methods for every input size `1..=max_size`.
///
/// The classical pass checks the first `n` of `inputs` (all of them once
/// `n` exceeds the list); the quantum pass takes `2n` shots from `initial`.
/// Rows come back with every classical size first, then every quantum size.
pub fn scaling_sweep<S, R>(
    initial: &Register,
    inputs: &[S],
    max_size: usize,
    rng: &mut R,
) -> DemoResult<Vec<ComparisonRow>>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut rows = Vec::with_capacity(2 * max_size);
    for n in 1..=max_size {
        let report = classical_parity(&inputs[..n.min(inputs.len())]);
        rows.push(ComparisonRow {
            method: Method::Classical,
            input_size: n,
            time_microseconds: report.elapsed.as_micros(),
        });
    }
    for n in 1..=max_size {
        let report = quantum_parity(initial, 2 * n, rng, |_| {})?;
        rows.push(ComparisonRow {
            method: Method::Quantum,
            input_size: n,
            time_microseconds: report.elapsed.as_micros(),
        });
    }
    debug!(max_size, rows = rows.len(), "scaling sweep done");
    Ok(rows)
}
