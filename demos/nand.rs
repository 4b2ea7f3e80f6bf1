use signal_net::circuit::GateType;
use signal_net::netlist::Circuit;

fn main() -> Result<(), signal_net::Error> {
    let mut circuit = Circuit::new("nand");

    // Two inputs into an AND, inverted into the output buffer
    let a = circuit.create_gate(GateType::In);
    let b = circuit.create_gate(GateType::In);
    let and = circuit.create_gate(GateType::And);
    let not = circuit.create_gate(GateType::Not);
    let out = circuit.create_gate(GateType::Out);

    circuit.connect(a, and, 2)?;
    circuit.connect(b, and, 2)?;
    circuit.connect(and, not, 1)?;
    circuit.connect(not, out, 1)?;

    circuit.set_input_state(a, true)?;
    circuit.set_input_state(b, false)?;
    assert!(circuit.get_output_state(out)?);

    circuit.set_input_state(b, true)?;
    assert!(!circuit.get_output_state(out)?);

    // Print the circuit
    println!("{circuit}");
    Ok(())
}
