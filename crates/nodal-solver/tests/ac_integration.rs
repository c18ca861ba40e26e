//! End-to-end AC analysis tests.

use std::f64::consts::FRAC_1_SQRT_2;

use nodal_core::CircuitBuilder;
use nodal_solver::{Error, solve_ac};

#[test]
fn test_capacitor_phase_lag() {
    // 2 A injected into a 1 µF capacitor at ω = 1000 rad/s:
    // V = I / (jωC), so |V| = I/(ωC) = 2000 V at -90° relative to the current.
    let omega = 1000.0;
    let c = 1e-6;
    let i = 2.0;

    let mut builder = CircuitBuilder::new();
    let gnd = builder.add_ground("0").unwrap();
    let n1 = builder.add_node("1");
    builder.add_current_source("I1", gnd, n1, i, omega).unwrap();
    builder.add_capacitor("C1", n1, gnd, c).unwrap();

    let circuit = builder.finalize().unwrap();
    let solution = solve_ac(&circuit).unwrap();

    assert!((solution.magnitude("1").unwrap() - i / (omega * c)).abs() < 1e-9);
    assert!((solution.phase_deg("1").unwrap() + 90.0).abs() < 1e-9);
}

#[test]
fn test_inductor_phase_lead() {
    // Same drive into a 0.1 H inductor: V = I·jωL, so |V| = IωL at +90°.
    let omega = 1000.0;
    let l = 0.1;
    let i = 2.0;

    let mut builder = CircuitBuilder::new();
    let gnd = builder.add_ground("0").unwrap();
    let n1 = builder.add_node("1");
    builder.add_current_source("I1", gnd, n1, i, omega).unwrap();
    builder.add_inductor("L1", n1, gnd, l).unwrap();

    let circuit = builder.finalize().unwrap();
    let solution = solve_ac(&circuit).unwrap();

    assert!((solution.magnitude("1").unwrap() - i * omega * l).abs() < 1e-9);
    assert!((solution.phase_deg("1").unwrap() - 90.0).abs() < 1e-9);
}

#[test]
fn test_rc_lowpass_at_corner() {
    // V1 --- node1 --- R --- node2 --- C --- GND
    // At ω = 1/(RC): H = 1/(1 + j), so |V(2)| = 1/√2 at -45°.
    let r = 1000.0;
    let c = 1e-6;
    let omega = 1.0 / (r * c);

    let mut builder = CircuitBuilder::new();
    let gnd = builder.add_ground("0").unwrap();
    let n1 = builder.add_node("1");
    let n2 = builder.add_node("2");
    builder.add_voltage_source("V1", n1, gnd, 1.0, omega).unwrap();
    builder.add_resistor("R1", n1, n2, r).unwrap();
    builder.add_capacitor("C1", n2, gnd, c).unwrap();

    let circuit = builder.finalize().unwrap();
    let solution = solve_ac(&circuit).unwrap();

    assert!((solution.magnitude("2").unwrap() - FRAC_1_SQRT_2).abs() < 1e-9);
    assert!((solution.phase_deg("2").unwrap() + 45.0).abs() < 1e-9);
}

#[test]
fn test_ac_source_branch_current() {
    // 1 V source across 50 Ω: 20 mA around the loop, measured negative
    // through the source (positive terminal to negative terminal).
    let mut builder = CircuitBuilder::new();
    let gnd = builder.add_ground("0").unwrap();
    let n1 = builder.add_node("1");
    builder.add_voltage_source("V1", n1, gnd, 1.0, 1e3).unwrap();
    builder.add_resistor("R1", n1, gnd, 50.0).unwrap();

    let circuit = builder.finalize().unwrap();
    let solution = solve_ac(&circuit).unwrap();

    let i = solution.current("V1").unwrap();
    assert!((i.re + 0.02).abs() < 1e-10);
    assert!(i.im.abs() < 1e-10);
}

#[test]
fn test_ac_resolve_is_deterministic() {
    let build = || {
        let mut builder = CircuitBuilder::new();
        let gnd = builder.add_ground("0").unwrap();
        let n1 = builder.add_node("1");
        let n2 = builder.add_node("2");
        builder.add_voltage_source("V1", n1, gnd, 1.0, 1e4).unwrap();
        builder.add_resistor("R1", n1, n2, 1000.0).unwrap();
        builder.add_capacitor("C1", n2, gnd, 1e-7).unwrap();
        builder.add_inductor("L1", n2, gnd, 1e-2).unwrap();
        builder.finalize().unwrap()
    };

    let circuit = build();
    let first = solve_ac(&circuit).unwrap();
    let second = solve_ac(&circuit).unwrap();

    for ((la, va), (lb, vb)) in first.voltages().zip(second.voltages()) {
        assert_eq!(la, lb);
        assert_eq!(va.re.to_bits(), vb.re.to_bits());
        assert_eq!(va.im.to_bits(), vb.im.to_bits());
    }
}

#[test]
fn test_ac_floating_node_is_singular() {
    let mut builder = CircuitBuilder::new();
    let gnd = builder.add_ground("0").unwrap();
    let n1 = builder.add_node("1");
    let n2 = builder.add_node("2");
    let n3 = builder.add_node("3");
    builder.add_voltage_source("V1", n1, gnd, 1.0, 1e3).unwrap();
    builder.add_resistor("R1", n1, gnd, 1000.0).unwrap();
    builder.add_capacitor("C1", n2, n3, 1e-6).unwrap();

    let circuit = builder.finalize().unwrap();
    assert!(matches!(solve_ac(&circuit), Err(Error::SingularMatrix)));
}
