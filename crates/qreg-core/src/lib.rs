//! State-vector simulation of small quantum registers.
//!
//! A register of `n` qubits is a vector of `2^n` complex amplitudes. Gates
//! are applied by pairing up amplitudes that differ in one qubit, so no
//! `2^n × 2^n` matrix is ever built.
//!
//! - **Exact state**: full amplitude vector, normalized after every operation
//! - **Qubit-local gates**: I, H, X, Y, Z, S, S†, T, T†
//! - **Oracles**: `|x⟩|y⟩ → |x⟩|y ⊕ f(x)⟩` for any boolean truth table
//! - **Measurement**: Born-rule sampling, destructive or not, with an
//!   injected random number generator
//!
//! # Memory
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 20 | ~16 MB |
//! | 25 | ~512 MB |
//! | 30 | ~16 GB |
//!
//! # Quick start
//!
//! ```rust
//! use qreg_core::{Gate, Oracle, Register};
//! use rand::SeedableRng;
//!
//! // Bell state: H on qubit 0, then the identity oracle acts as CNOT.
//! let mut reg = Register::new(2);
//! reg.apply(Gate::H, Some(0))?;
//! Oracle::identity().apply(&mut reg)?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let outcome = reg.sample(&mut rng);
//! assert!(outcome == "00" || outcome == "11");
//! # Ok::<(), qreg_core::StateError>(())
//! ```

pub mod amplitude;
pub mod error;
pub mod gate;
pub mod measure;
pub mod oracle;
pub mod qubit;
pub mod register;

pub use error::{StateError, StateResult};
pub use gate::Gate;
pub use measure::Counts;
pub use oracle::Oracle;
pub use qubit::Qubit;
pub use register::{MAX_QUBITS, Register};

pub use num_complex::Complex64;
