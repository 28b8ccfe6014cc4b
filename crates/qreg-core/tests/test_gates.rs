//! Tests for gate application on registers.

use std::f64::consts::FRAC_1_SQRT_2;

use qreg_core::{Complex64, Gate, Oracle, Qubit, Register};

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn assert_same_state(a: &Register, b: &Register) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.amplitudes().iter().zip(b.amplitudes()).enumerate() {
        assert!((x - y).norm() < 1e-10, "amplitude {i} differs: {x} vs {y}");
    }
}

/// A non-trivial three-qubit state with distinct phases everywhere.
fn scrambled() -> Register {
    Register::with_amplitudes(
        3,
        [
            ("000", c(0.7, 0.0)),
            ("001", c(0.1, 0.0)),
            ("010", c(0.2, 0.0)),
            ("011", c(0.5, 0.6)),
            ("100", c(0.3, 0.0)),
            ("101", c(0.5, 0.8)),
            ("110", c(0.5, 0.9)),
            ("111", c(0.0, 0.1)),
        ],
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Gate table
// ---------------------------------------------------------------------------

#[test]
fn gate_table_on_single_qubit() {
    let plus_i = |g: Gate| {
        let mut reg = Register::with_amplitudes(1, [("0", c(0.6, 0.0)), ("1", c(0.0, 0.8))]).unwrap();
        reg.apply(g, Some(0)).unwrap();
        (reg.amplitude(0).unwrap(), reg.amplitude(1).unwrap())
    };
    let a = c(0.6, 0.0);
    let b = c(0.0, 0.8);
    let i = c(0.0, 1.0);

    let cases = [
        (Gate::I, a, b),
        (Gate::H, (a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2),
        (Gate::X, b, a),
        (Gate::Y, -i * b, i * a),
        (Gate::Z, a, -b),
        (Gate::S, a, i * b),
        (Gate::T, a, Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4) * b),
    ];
    for (gate, ea, eb) in cases {
        let (ga, gb) = plus_i(gate);
        assert!((ga - ea).norm() < 1e-12, "{gate}: |0⟩ branch");
        assert!((gb - eb).norm() < 1e-12, "{gate}: |1⟩ branch");
    }
}

#[test]
fn register_and_qubit_agree() {
    let q = Qubit::new(c(0.6, 0.0), c(0.0, 0.8)).unwrap();
    for gate in Gate::ALL {
        let mut reg = Register::from(q);
        reg.apply(gate, Some(0)).unwrap();
        let expected = Register::from(q.apply(gate));
        assert_same_state(&reg, &expected);
    }
}

// ---------------------------------------------------------------------------
// Inverses
// ---------------------------------------------------------------------------

#[test]
fn self_inverse_gates_twice_restore_state() {
    for gate in [Gate::H, Gate::X, Gate::Y, Gate::Z] {
        for qubit in 0..3 {
            let original = scrambled();
            let mut reg = original.clone();
            reg.apply(gate, Some(qubit)).unwrap();
            reg.apply(gate, Some(qubit)).unwrap();
            assert_same_state(&reg, &original);
        }
    }
}

#[test]
fn every_gate_is_undone_by_its_inverse() {
    for gate in Gate::ALL {
        let original = scrambled();
        let mut reg = original.clone();
        reg.apply(gate, None).unwrap();
        reg.apply(gate.inverse(), None).unwrap();
        assert_same_state(&reg, &original);
    }
}

// ---------------------------------------------------------------------------
// Multi-qubit behaviour
// ---------------------------------------------------------------------------

#[test]
fn hadamard_on_both_qubits_gives_uniform_superposition() {
    let mut reg = Register::new(2);
    reg.apply(Gate::H, Some(0)).unwrap();
    reg.apply(Gate::H, Some(1)).unwrap();
    for amp in reg.amplitudes() {
        assert!((amp.norm() - 0.5).abs() < 1e-12);
    }
}

#[test]
fn apply_all_equals_per_qubit_loop() {
    let mut all = scrambled();
    all.apply(Gate::H, None).unwrap();

    let mut manual = scrambled();
    for q in 0..3 {
        manual.apply(Gate::H, Some(q)).unwrap();
    }
    assert_same_state(&all, &manual);
}

#[test]
fn qubit_local_gates_commute_across_qubits() {
    let mut forward = scrambled();
    forward
        .apply_sequence(&[(Gate::H, Some(0)), (Gate::Y, Some(2))])
        .unwrap();
    let mut backward = scrambled();
    backward
        .apply_sequence(&[(Gate::Y, Some(2)), (Gate::H, Some(0))])
        .unwrap();
    assert_same_state(&forward, &backward);
}

#[test]
fn bell_state_via_xor_pairing() {
    let mut reg = Register::new(2);
    reg.apply(Gate::H, Some(0)).unwrap();
    // The identity oracle flips qubit 1 when qubit 0 is set: a CNOT.
    Oracle::identity().apply(&mut reg).unwrap();

    assert!((reg.amplitude(0b00).unwrap() - c(FRAC_1_SQRT_2, 0.0)).norm() < 1e-12);
    assert!(reg.amplitude(0b01).unwrap().norm() < 1e-12);
    assert!(reg.amplitude(0b10).unwrap().norm() < 1e-12);
    assert!((reg.amplitude(0b11).unwrap() - c(FRAC_1_SQRT_2, 0.0)).norm() < 1e-12);
}

#[test]
fn x_on_all_qubits_inverts_the_index() {
    let mut reg = Register::with_amplitudes(3, [("001", c(1.0, 0.0))]).unwrap();
    reg.apply(Gate::X, None).unwrap();
    assert_eq!(reg.describe(), vec![("110".to_string(), c(1.0, 0.0))]);
}

#[test]
fn gates_preserve_norm_without_renormalizing() {
    let mut reg = scrambled();
    let ops: Vec<(Gate, Option<usize>)> = (0..60)
        .map(|k| (Gate::ALL[k % Gate::ALL.len()], Some(k % 3)))
        .collect();
    reg.apply_sequence(&ops).unwrap();
    assert!((reg.norm_sqr() - 1.0).abs() < 1e-9);
}
