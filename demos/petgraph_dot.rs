use signal_net::circuit::GateType;
use signal_net::graph::MultiDiGraph;
use signal_net::netlist::Circuit;

fn half_adder() -> Result<Circuit, signal_net::Error> {
    let mut circuit = Circuit::new("half_adder");
    let a = circuit.create_gate(GateType::In);
    let b = circuit.create_gate(GateType::In);
    let xor = circuit.create_gate(GateType::Xor);
    let and = circuit.create_gate(GateType::And);
    let sum = circuit.create_gate(GateType::Out);
    let carry = circuit.create_gate(GateType::Out);

    for gate in [xor, and] {
        circuit.connect(a, gate, 2)?;
        circuit.connect(b, gate, 2)?;
    }
    circuit.connect(xor, sum, 1)?;
    circuit.connect(and, carry, 1)?;
    Ok(circuit)
}

fn main() -> Result<(), signal_net::Error> {
    let circuit = half_adder()?;
    eprintln!("{circuit}");
    let analysis = circuit.get_analysis::<MultiDiGraph>()?;
    let graph = analysis.get_graph();
    let dot = petgraph::dot::Dot::with_config(graph, &[]);
    println!("{dot}");
    Ok(())
}
