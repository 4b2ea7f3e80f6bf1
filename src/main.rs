use log::info;
use signal_net::circuit::{GateId, GateType};
use signal_net::netlist::Circuit;

/// Builds `(a | !b) & b`, with input `b` fanning out to both the inverter and the AND.
fn mixed_network() -> signal_net::Result<(Circuit, GateId, GateId, GateId)> {
    let mut circuit = Circuit::new("mixed_network");

    // i/o buffers are gates too
    let in_a = circuit.create_gate(GateType::In);
    let in_b = circuit.create_gate(GateType::In);
    let or = circuit.create_gate(GateType::Or);
    let not = circuit.create_gate(GateType::Not);
    let and = circuit.create_gate(GateType::And);
    let out = circuit.create_gate(GateType::Out);

    circuit.connect(in_a, or, 2)?;
    circuit.connect(in_b, not, 1)?;
    circuit.connect(not, or, 2)?;
    circuit.connect(or, and, 2)?;
    circuit.connect(in_b, and, 2)?;
    circuit.connect(and, out, 1)?;

    Ok((circuit, in_a, in_b, out))
}

fn main() -> signal_net::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Simple Truth Table Solver");

    let (mut circuit, a, b, out) = mixed_network()?;
    circuit.settle()?;

    for (x, y) in [(false, false), (false, true), (true, false), (true, true)] {
        circuit.set_input_state(a, x)?;
        circuit.set_input_state(b, y)?;
        info!(
            "inputs are {} and {}, the output is {}",
            circuit.get_output_state(a)?,
            circuit.get_output_state(b)?,
            circuit.get_output_state(out)?
        );
    }

    println!("{circuit}");
    Ok(())
}

#[test]
fn test_mixed_network() {
    let (mut circuit, a, b, out) = mixed_network().unwrap();
    assert_eq!(circuit.gate_count(), 6);
    assert_eq!(circuit.wires().count(), 5);
    for (x, y) in [(false, false), (false, true), (true, false), (true, true)] {
        circuit.set_input_state(a, x).unwrap();
        circuit.set_input_state(b, y).unwrap();
        assert_eq!(circuit.get_output_state(out), Ok(x && y));
    }
}
