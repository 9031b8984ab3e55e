//! Side-by-side run of the two simulation engines.
//!
//! The state-vector engine writes codewords and phases in closed form;
//! the circuit engine reaches the same states through H/CNOT/Pauli gate
//! programs. This example injects identical errors into both and prints
//! how closely they agree, ending with a seeded Monte Carlo estimate
//! that must match bit for bit.

use steane_code_sim::prelude::*;

fn main() {
    env_logger::init();

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║     Steane Code: statevector vs circuit engine       ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let sv = StateVectorEngine::new();
    let circuit = CircuitEngine::new();

    // ═══ 1. Encoded states ═══
    let zero_sv = sv.encode_zero().expect("encoding is exact");
    let zero_circuit = circuit.encode_zero().expect("encoding is exact");
    println!("═══ 1. Encoded |0̄⟩ ═══");
    println!(
        "  max amplitude difference: {:.2e}",
        max_amplitude_delta(&zero_sv, &zero_circuit)
    );
    println!("  fidelity: {:.12}", zero_sv.fidelity(&zero_circuit));
    println!();

    // ═══ 2. Syndromes under single-qubit errors ═══
    println!("═══ 2. Syndromes under single-qubit errors ═══");
    println!();
    println!("  error   statevector  circuit");
    println!("  ─────   ───────────  ───────");
    for (label, qubit, pauli) in [("X2", 2usize, Pauli::X), ("Y4", 4, Pauli::Y), ("Z6", 6, Pauli::Z)]
    {
        let error = PauliString::single(N_QUBITS, qubit, pauli);
        let mut a = sv.encode_zero().expect("encoding is exact");
        let mut b = circuit.encode_zero().expect("encoding is exact");
        sv.apply_error(&mut a, &error).expect("pauli application is exact");
        circuit
            .apply_error(&mut b, &error)
            .expect("pauli application is exact");
        let sa = sv.measure_syndrome(&a).expect("state is a syndrome eigenstate");
        let sb = circuit
            .measure_syndrome(&b)
            .expect("state is a syndrome eigenstate");
        println!("  {}      {}      {}", label, sa, sb);
    }
    println!();

    // ═══ 3. Pauli spectra ═══
    println!("═══ 3. Pauli spectrum agreement ═══");
    let code_sv = SteaneCode::with_backend(BackendKind::StateVector);
    let code_circuit = SteaneCode::with_backend(BackendKind::Circuit);
    let mut state_a = code_sv.encode_logical_zero().expect("encoding is exact");
    let mut state_b = code_circuit.encode_logical_zero().expect("encoding is exact");
    let mut pattern = PauliString::identity(N_QUBITS);
    pattern.set(1, Pauli::X);
    pattern.set(5, Pauli::Z);
    state_a.apply_pauli_string(&pattern);
    state_b.apply_pauli_string(&pattern);
    let spectrum_a = code_sv
        .compute_pauli_spectrum(&state_a)
        .expect("spectrum readout is exact");
    let spectrum_b = code_circuit
        .compute_pauli_spectrum(&state_b)
        .expect("spectrum readout is exact");
    let max_delta = spectrum_a
        .iter()
        .zip(spectrum_b.iter())
        .map(|((_, a), (_, b))| (a - b).abs())
        .fold(0.0f64, f64::max);
    println!("  observables compared: {}", spectrum_a.len());
    println!("  max spectrum difference after error X1·Z5: {:.2e}", max_delta);
    println!();

    // ═══ 4. Seeded Monte Carlo estimates ═══
    println!("═══ 4. Seeded Monte Carlo estimates ═══");
    let code_sv = code_sv.with_seed(314).with_trials(1500);
    let code_circuit = code_circuit.with_seed(314).with_trials(1500);
    let p = 0.1;
    let rate_sv = code_sv
        .calculate_logical_error_rate(p, 1500)
        .expect("configuration is valid");
    let rate_circuit = code_circuit
        .calculate_logical_error_rate(p, 1500)
        .expect("configuration is valid");
    println!("  p = {p}");
    println!("  statevector: P_L = {rate_sv}");
    println!("  circuit:     P_L = {rate_circuit}");
    println!(
        "  estimates identical: {}",
        if rate_sv == rate_circuit { "yes" } else { "NO" }
    );
}

fn max_amplitude_delta(a: &QuantumState, b: &QuantumState) -> f64 {
    (0..a.amplitudes().len())
        .map(|i| (a.amplitude(i) - b.amplitude(i)).norm())
        .fold(0.0f64, f64::max)
}
