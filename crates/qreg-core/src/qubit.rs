//! Standalone single-qubit state.

use std::fmt;

use num_complex::Complex64;
use rand::Rng;
use tracing::trace;

use crate::amplitude::{self, NEGLIGIBLE_AMPLITUDE};
use crate::error::StateResult;
use crate::gate::Gate;
use crate::measure;

/// A normalized two-amplitude state `α|0⟩ + β|1⟩`.
///
/// Unlike a one-qubit [`Register`](crate::Register), measurement reports a
/// single bit instead of a bitstring, and gate application is pure: it
/// returns a new state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Qubit {
    amplitudes: [Complex64; 2],
}

impl Qubit {
    /// Build a qubit from the `|0⟩` and `|1⟩` amplitudes, normalizing them.
    pub fn new(alpha: Complex64, beta: Complex64) -> StateResult<Self> {
        let mut amplitudes = [alpha, beta];
        amplitude::normalize(&mut amplitudes)?;
        Ok(Self { amplitudes })
    }

    /// The `|0⟩` basis state.
    pub fn zero() -> Self {
        Self {
            amplitudes: [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        }
    }

    /// The `|1⟩` basis state.
    pub fn one() -> Self {
        Self {
            amplitudes: [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        }
    }

    /// `[α, β]`.
    pub fn amplitudes(&self) -> [Complex64; 2] {
        self.amplitudes
    }

    /// `|α|²`
    pub fn probability_of_zero(&self) -> f64 {
        self.amplitudes[0].norm_sqr()
    }

    /// `|β|²`
    pub fn probability_of_one(&self) -> f64 {
        self.amplitudes[1].norm_sqr()
    }

    /// `⟨self|other⟩`
    pub fn inner_product(&self, other: &Qubit) -> Complex64 {
        self.amplitudes[0].conj() * other.amplitudes[0]
            + self.amplitudes[1].conj() * other.amplitudes[1]
    }

    /// Return the state after applying `gate`.
    #[must_use]
    pub fn apply(&self, gate: Gate) -> Qubit {
        let (a, b) = gate.transform(self.amplitudes[0], self.amplitudes[1]);
        Qubit { amplitudes: [a, b] }
    }

    /// Sample a bit without disturbing the state.
    pub fn measure_without_collapse<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        let probabilities = self.amplitudes.iter().map(Complex64::norm_sqr);
        u8::from(measure::sample_with(probabilities, rng) == 1)
    }

    /// Measure and project onto the observed basis state.
    ///
    /// Returns `true` when the outcome is `|1⟩`.
    pub fn collapse<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let one = self.measure_without_collapse(rng) == 1;
        *self = if one { Qubit::one() } else { Qubit::zero() };
        trace!(outcome = u8::from(one), "qubit collapsed");
        one
    }
}

impl Default for Qubit {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.norm() >= NEGLIGIBLE_AMPLITUDE)
            .map(|(bit, a)| (bit, *a));
        amplitude::write_ket(f, terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_normalizes() {
        let q = Qubit::new(Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)).unwrap();
        assert!((q.probability_of_zero() - 0.5).abs() < 1e-12);
        assert!((q.probability_of_one() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_new_degenerate() {
        let zero = Complex64::new(0.0, 0.0);
        assert_eq!(Qubit::new(zero, zero), Err(StateError::DegenerateState));
    }

    #[test]
    fn test_apply_is_pure() {
        let q = Qubit::zero();
        let flipped = q.apply(Gate::X);
        assert_eq!(q, Qubit::zero());
        assert_eq!(flipped, Qubit::one());
    }

    #[test]
    fn test_collapse_sets_both_amplitudes() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut q = Qubit::zero().apply(Gate::H);
            let one = q.collapse(&mut rng);
            if one {
                assert_eq!(q, Qubit::one());
            } else {
                assert_eq!(q, Qubit::zero());
            }
        }
    }

    #[test]
    fn test_measure_basis_states_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(Qubit::zero().measure_without_collapse(&mut rng), 0);
            assert_eq!(Qubit::one().measure_without_collapse(&mut rng), 1);
        }
    }

    #[test]
    fn test_measure_does_not_disturb() {
        let mut rng = StdRng::seed_from_u64(3);
        let q = Qubit::zero().apply(Gate::H);
        let before = q;
        for _ in 0..20 {
            q.measure_without_collapse(&mut rng);
        }
        assert_eq!(q, before);
    }

    #[test]
    fn test_inner_product_orthogonal() {
        let plus = Qubit::zero().apply(Gate::H);
        let minus = Qubit::one().apply(Gate::H);
        assert!(plus.inner_product(&minus).norm() < 1e-12);
        assert!((plus.inner_product(&plus).re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Qubit::zero().to_string(), "|ψ⟩ = 1|0⟩");
        let q = Qubit::zero().apply(Gate::H).apply(Gate::Z);
        assert_eq!(q.to_string(), "|ψ⟩ = 0.7071|0⟩ - 0.7071|1⟩");
        let q = Qubit::one().apply(Gate::H);
        assert_eq!(q.to_string(), "|ψ⟩ = 0.7071|0⟩ - 0.7071|1⟩");
        let q = Qubit::zero().apply(Gate::H).apply(Gate::Sdg);
        assert_eq!(q.to_string(), "|ψ⟩ = 0.7071|0⟩ - 0.7071i|1⟩");
        let q = Qubit::new(Complex64::new(-1.0, 0.0), Complex64::new(1.0, 0.0)).unwrap();
        assert_eq!(q.to_string(), "|ψ⟩ = -0.7071|0⟩ + 0.7071|1⟩");
    }
}
