use signal_net::circuit::GateType;
use signal_net::netlist::Circuit;

fn main() -> Result<(), signal_net::Error> {
    let mut circuit = Circuit::new("fanout");

    // One input drives three output buffers through a single wire
    let a = circuit.create_gate(GateType::In);
    let outs: Vec<_> = (0..3).map(|_| circuit.create_gate(GateType::Out)).collect();
    for out in outs.iter() {
        circuit.connect(a, *out, 1)?;
    }

    circuit.set_input_state(a, true)?;
    for out in outs.iter() {
        println!("{}", circuit.describe(*out)?);
    }
    println!("{}", circuit.describe(a)?);
    Ok(())
}
