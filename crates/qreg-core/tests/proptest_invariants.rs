//! Property-based tests for state-vector invariants.
//!
//! Random registers and random gate sequences must keep the total
//! probability at one, and undoing a sequence must restore the state.

use proptest::prelude::*;

use qreg_core::{Complex64, Gate, Oracle, Register};

/// Random register of 1-5 qubits with at least one non-zero amplitude.
fn arb_register() -> impl Strategy<Value = Register> {
    (1_usize..=5).prop_flat_map(|n| {
        prop::collection::vec((-1.0_f64..1.0, -1.0_f64..1.0), 1 << n).prop_filter_map(
            "all-zero amplitude vector",
            move |amps| {
                let entries: Vec<(String, Complex64)> = amps
                    .into_iter()
                    .enumerate()
                    .map(|(i, (re, im))| (format!("{i:0n$b}"), Complex64::new(re, im)))
                    .collect();
                Register::with_amplitudes(n, entries).ok()
            },
        )
    })
}

fn arb_gate() -> impl Strategy<Value = Gate> {
    prop::sample::select(Gate::ALL.to_vec())
}

/// Register plus a gate sequence whose qubit indices fit it.
fn arb_circuit() -> impl Strategy<Value = (Register, Vec<(Gate, Option<usize>)>)> {
    arb_register().prop_flat_map(|reg| {
        let n = reg.num_qubits();
        let op = (arb_gate(), prop::option::of(0..n));
        (Just(reg), prop::collection::vec(op, 0..=20))
    })
}

proptest! {
    #[test]
    fn construction_normalizes(reg in arb_register()) {
        prop_assert!((reg.norm_sqr() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn gate_sequences_preserve_norm((mut reg, ops) in arb_circuit()) {
        reg.apply_sequence(&ops).unwrap();
        prop_assert!((reg.norm_sqr() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn inverse_sequence_restores_state((mut reg, ops) in arb_circuit()) {
        let original = reg.clone();
        reg.apply_sequence(&ops).unwrap();
        let undo: Vec<(Gate, Option<usize>)> =
            ops.iter().rev().map(|&(g, q)| (g.inverse(), q)).collect();
        reg.apply_sequence(&undo).unwrap();
        for (a, b) in reg.amplitudes().iter().zip(original.amplitudes()) {
            prop_assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn oracle_preserves_norm(reg in arb_register(), seed in any::<u64>()) {
        let mut reg = reg;
        let k = reg.num_qubits() - 1;
        let oracle = Oracle::from_fn(k, |x| (seed >> (x % 64)) & 1 == 1).unwrap();
        oracle.apply(&mut reg).unwrap();
        prop_assert!((reg.norm_sqr() - 1.0).abs() < 1e-9);
    }
}
