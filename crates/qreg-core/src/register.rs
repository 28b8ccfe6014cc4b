//! Multi-qubit register backed by a dense state vector.

use std::fmt;

use num_complex::Complex64;
use rand::Rng;
use tracing::{debug, trace};

use crate::amplitude::{self, NEGLIGIBLE_AMPLITUDE};
use crate::error::{StateError, StateResult};
use crate::gate::Gate;
use crate::measure::{self, Counts};
use crate::qubit::Qubit;

/// Largest register that can be allocated (2^30 amplitudes ≈ 16 GiB).
pub const MAX_QUBITS: usize = 30;

/// A register of `n` qubits holding `2^n` complex amplitudes.
///
/// Index `i` of the vector is the basis state whose bitstring is the
/// big-endian binary form of `i`: qubit 0 is the leftmost character and the
/// most-significant bit. The vector is normalized after every public
/// operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Register {
    /// Number of qubits.
    num_qubits: usize,
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
}

impl Register {
    /// Create a register initialized to `|0...0⟩`.
    ///
    /// # Panics
    ///
    /// Panics if `num_qubits` exceeds [`MAX_QUBITS`]; use
    /// [`Register::try_new`] to get an error instead.
    pub fn new(num_qubits: usize) -> Self {
        match Self::try_new(num_qubits) {
            Ok(reg) => reg,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a register initialized to `|0...0⟩`, rejecting sizes above
    /// [`MAX_QUBITS`].
    pub fn try_new(num_qubits: usize) -> StateResult<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        debug!(num_qubits, "allocated register in |0…0⟩");
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Create a register from a partial map of bitstrings to amplitudes.
    ///
    /// Unlisted basis states start at zero; the whole vector is normalized
    /// jointly once every entry is placed. A later duplicate key overwrites
    /// an earlier one.
    ///
    /// ```
    /// use num_complex::Complex64;
    /// use qreg_core::Register;
    ///
    /// let reg = Register::with_amplitudes(
    ///     2,
    ///     [("00", Complex64::new(1.0, 0.0)), ("11", Complex64::new(1.0, 0.0))],
    /// )?;
    /// assert!((reg.probability_of(3)? - 0.5).abs() < 1e-12);
    /// # Ok::<(), qreg_core::StateError>(())
    /// ```
    pub fn with_amplitudes<I, S>(num_qubits: usize, entries: I) -> StateResult<Self>
    where
        I: IntoIterator<Item = (S, Complex64)>,
        S: AsRef<str>,
    {
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }

        let size = 1usize << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        for (bitstring, amp) in entries {
            let index = parse_bitstring(bitstring.as_ref(), num_qubits)?;
            if index >= size {
                return Err(StateError::IndexOutOfRange { index, len: size });
            }
            amplitudes[index] = amp;
        }

        let total = amplitude::normalize(&mut amplitudes)?;
        debug!(num_qubits, total, "built register from amplitude map");
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (`2^n`).
    #[inline]
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false: even a zero-qubit register holds one amplitude.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// The raw amplitude vector.
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude of a single basis state.
    pub fn amplitude(&self, index: usize) -> StateResult<Complex64> {
        self.amplitudes
            .get(index)
            .copied()
            .ok_or(StateError::IndexOutOfRange {
                index,
                len: self.amplitudes.len(),
            })
    }

    /// Born-rule probability `|aᵢ|²` of basis state `index`.
    pub fn probability_of(&self, index: usize) -> StateResult<f64> {
        self.amplitude(index).map(|a| a.norm_sqr())
    }

    /// Probabilities of every basis state, in index order.
    pub fn probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        self.amplitudes.iter().map(Complex64::norm_sqr)
    }

    /// Marginal probability that `qubit` reads `1`.
    pub fn qubit_probability(&self, qubit: usize) -> StateResult<f64> {
        let mask = self.mask(qubit)?;
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum())
    }

    /// Total probability; stays at 1 within floating-point tolerance.
    pub fn norm_sqr(&self) -> f64 {
        amplitude::norm_sqr_sum(&self.amplitudes)
    }

    /// `⟨self|other⟩`
    pub fn inner_product(&self, other: &Register) -> StateResult<Complex64> {
        amplitude::inner_product(&self.amplitudes, &other.amplitudes)
    }

    // =========================================================================
    // Gate application
    // =========================================================================

    /// Apply `gate` to one qubit, or to every qubit in ascending order when
    /// `qubit` is `None`.
    pub fn apply(&mut self, gate: Gate, qubit: Option<usize>) -> StateResult<()> {
        match qubit {
            Some(q) => self.apply_to(gate, q),
            None => {
                self.apply_all(gate);
                Ok(())
            }
        }
    }

    /// Apply `gate` to `qubit`.
    pub fn apply_to(&mut self, gate: Gate, qubit: usize) -> StateResult<()> {
        let mask = self.mask(qubit)?;
        trace!(gate = %gate, qubit, "applying gate");
        self.apply_masked(gate, mask);
        Ok(())
    }

    /// Apply `gate` to every qubit, `0..n` in order.
    pub fn apply_all(&mut self, gate: Gate) {
        trace!(gate = %gate, num_qubits = self.num_qubits, "applying gate to all qubits");
        for q in 0..self.num_qubits {
            let mask = 1 << (self.num_qubits - 1 - q);
            self.apply_masked(gate, mask);
        }
    }

    /// Apply a list of gates in order.
    ///
    /// Every qubit index is checked before the first gate runs, so an
    /// invalid entry leaves the register unchanged.
    pub fn apply_sequence(&mut self, ops: &[(Gate, Option<usize>)]) -> StateResult<()> {
        for &(_, qubit) in ops {
            if let Some(q) = qubit {
                self.mask(q)?;
            }
        }
        for &(gate, qubit) in ops {
            self.apply(gate, qubit)?;
        }
        Ok(())
    }

    fn apply_masked(&mut self, gate: Gate, mask: usize) {
        match gate {
            Gate::I => {}
            Gate::X => self.apply_x(mask),
            Gate::H | Gate::Y => self.apply_pairwise(gate, mask),
            Gate::Z | Gate::S | Gate::Sdg | Gate::T | Gate::Tdg => {
                if let Some(phase) = gate.diagonal_phase() {
                    self.apply_phase(mask, phase);
                }
            }
        }
    }

    /// General 2×2 transform over the pairs `(i, i | mask)`.
    fn apply_pairwise(&mut self, gate: Gate, mask: usize) {
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let (a, b) = gate.transform(self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = a;
                self.amplitudes[j] = b;
            }
        }
    }

    /// NOT via XOR pairing; each pair is swapped once.
    fn apply_x(&mut self, mask: usize) {
        for i in 0..self.amplitudes.len() {
            let j = i ^ mask;
            if i < j {
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Diagonal gates only touch the `|1⟩` half.
    fn apply_phase(&mut self, mask: usize, phase: Complex64) {
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    /// Bit mask of `qubit` within a basis index.
    fn mask(&self, qubit: usize) -> StateResult<usize> {
        if qubit >= self.num_qubits {
            return Err(StateError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(1 << (self.num_qubits - 1 - qubit))
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Sample a basis index without disturbing the state.
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        measure::sample_with(self.probabilities(), rng)
    }

    /// Sample a measurement outcome without disturbing the state.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.bitstring(self.sample_index(rng))
    }

    /// Measure every qubit and project onto the observed basis state.
    pub fn collapse<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        let outcome = self.sample_index(rng);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp = if i == outcome {
                Complex64::new(1.0, 0.0)
            } else {
                Complex64::new(0.0, 0.0)
            };
        }
        let bitstring = self.bitstring(outcome);
        debug!(outcome = %bitstring, "register collapsed");
        bitstring
    }

    /// Sample `shots` outcomes into a histogram; the state is unchanged.
    pub fn sample_counts<R: Rng + ?Sized>(&self, shots: u64, rng: &mut R) -> Counts {
        let mut counts = Counts::new();
        for shot in 0..shots {
            counts.insert(self.sample(rng), 1);
            if shot > 0 && shot % 10_000 == 0 {
                trace!(shot, "sampling");
            }
        }
        debug!(num_qubits = self.num_qubits, shots, distinct = counts.len(), "sampled register");
        counts
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Bitstring label of basis index `index`.
    #[inline]
    pub fn bitstring(&self, index: usize) -> String {
        measure::index_to_bitstring(index, self.num_qubits)
    }

    /// Non-negligible terms of the state as `(bitstring, amplitude)` pairs.
    pub fn describe(&self) -> Vec<(String, Complex64)> {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.norm() >= NEGLIGIBLE_AMPLITUDE)
            .map(|(i, a)| (self.bitstring(i), *a))
            .collect()
    }
}

impl Default for Register {
    fn default() -> Self {
        Self::new(1)
    }
}

impl From<Qubit> for Register {
    fn from(qubit: Qubit) -> Self {
        Self {
            num_qubits: 1,
            amplitudes: qubit.amplitudes().to_vec(),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        amplitude::write_ket(f, self.describe())
    }
}

/// Parse a big-endian bitstring of exactly `width` characters.
fn parse_bitstring(bitstring: &str, width: usize) -> StateResult<usize> {
    let got = bitstring.chars().count();
    if got != width {
        return Err(StateError::DimensionMismatch {
            expected: width,
            got,
        });
    }
    bitstring.chars().try_fold(0usize, |acc, c| match c {
        '0' => Ok(acc << 1),
        '1' => Ok((acc << 1) | 1),
        _ => Err(StateError::InvalidBitstring(bitstring.to_string())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_initial_state() {
        let reg = Register::new(2);
        assert_eq!(reg.len(), 4);
        assert!(approx_eq(reg.amplitudes[0], c(1.0, 0.0)));
        assert!(reg.amplitudes[1..].iter().all(|a| approx_eq(*a, c(0.0, 0.0))));
    }

    #[test]
    fn test_qubit_zero_is_most_significant() {
        let mut reg = Register::new(3);
        reg.apply_to(Gate::X, 0).unwrap();
        assert_eq!(reg.describe(), vec![("100".to_string(), c(1.0, 0.0))]);
        reg.apply_to(Gate::X, 2).unwrap();
        assert_eq!(reg.describe(), vec![("101".to_string(), c(1.0, 0.0))]);
    }

    #[test]
    fn test_hadamard() {
        let mut reg = Register::new(1);
        reg.apply_to(Gate::H, 0).unwrap();
        assert!(approx_eq(reg.amplitudes[0], c(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(reg.amplitudes[1], c(FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn test_pairwise_matches_diagonal_path() {
        // Z through the generic pair loop must match the phase-only loop.
        let mut a = Register::new(2);
        a.apply_all(Gate::H);
        let mut b = a.clone();
        a.apply_to(Gate::Z, 1).unwrap();
        b.apply_pairwise(Gate::Z, b.mask(1).unwrap());
        for (x, y) in a.amplitudes().iter().zip(b.amplitudes()) {
            assert!(approx_eq(*x, *y));
        }
    }

    #[test]
    fn test_x_matches_pairwise_path() {
        let mut a = Register::with_amplitudes(2, [("00", c(0.6, 0.0)), ("01", c(0.0, 0.8))])
            .unwrap();
        let mut b = a.clone();
        a.apply_to(Gate::X, 1).unwrap();
        b.apply_pairwise(Gate::X, b.mask(1).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_qubit_out_of_range_leaves_state() {
        let mut reg = Register::new(2);
        let before = reg.clone();
        assert_eq!(
            reg.apply(Gate::H, Some(2)),
            Err(StateError::QubitOutOfRange {
                qubit: 2,
                num_qubits: 2
            })
        );
        assert_eq!(reg, before);
    }

    #[test]
    fn test_apply_sequence_validates_first() {
        let mut reg = Register::new(2);
        let before = reg.clone();
        let err = reg.apply_sequence(&[(Gate::H, Some(0)), (Gate::X, Some(5))]);
        assert!(err.is_err());
        assert_eq!(reg, before);
    }

    #[test]
    fn test_parse_bitstring() {
        assert_eq!(parse_bitstring("101", 3), Ok(5));
        assert_eq!(parse_bitstring("", 0), Ok(0));
        assert_eq!(
            parse_bitstring("10", 3),
            Err(StateError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        );
        assert_eq!(
            parse_bitstring("1x1", 3),
            Err(StateError::InvalidBitstring("1x1".to_string()))
        );
        assert!(parse_bitstring("+11", 3).is_err());
    }

    #[test]
    fn test_too_many_qubits() {
        let err = Register::with_amplitudes(MAX_QUBITS + 1, [("0", c(1.0, 0.0))]).unwrap_err();
        assert!(matches!(err, StateError::TooManyQubits { .. }));
    }

    #[test]
    fn test_try_new_rejects_oversized_register() {
        assert_eq!(
            Register::try_new(MAX_QUBITS + 1),
            Err(StateError::TooManyQubits {
                requested: MAX_QUBITS + 1,
                max: MAX_QUBITS
            })
        );
        assert_eq!(Register::try_new(3).unwrap(), Register::new(3));
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn test_new_panics_when_oversized() {
        let _ = Register::new(MAX_QUBITS + 1);
    }

    #[test]
    fn test_zero_qubit_register() {
        let reg = Register::new(0);
        assert_eq!(reg.len(), 1);
        assert!((reg.probability_of(0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let mut reg = Register::new(2);
        assert_eq!(reg.to_string(), "|ψ⟩ = 1|00⟩");
        reg.apply_to(Gate::H, 0).unwrap();
        assert_eq!(reg.to_string(), "|ψ⟩ = 0.7071|00⟩ + 0.7071|10⟩");
        reg.apply_to(Gate::Z, 0).unwrap();
        assert_eq!(reg.to_string(), "|ψ⟩ = 0.7071|00⟩ - 0.7071|10⟩");
    }

    #[test]
    fn test_from_qubit() {
        let reg = Register::from(Qubit::one());
        assert_eq!(reg.num_qubits(), 1);
        assert!((reg.probability_of(1).unwrap() - 1.0).abs() < 1e-12);
    }
}
