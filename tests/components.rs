use signal_net::Error;
use signal_net::circuit::{ComponentId, GateId, GateType};
use signal_net::netlist::Circuit;

fn nand_component() -> (Circuit, ComponentId, [GateId; 5]) {
    let mut circuit = Circuit::new("nand");
    let a = circuit.create_gate(GateType::In);
    let b = circuit.create_gate(GateType::In);
    let and = circuit.create_gate(GateType::And);
    let not = circuit.create_gate(GateType::Not);
    let out = circuit.create_gate(GateType::Out);
    circuit.connect(a, and, 2).unwrap();
    circuit.connect(b, and, 2).unwrap();
    circuit.connect(and, not, 1).unwrap();
    circuit.connect(not, out, 1).unwrap();

    let gates = [a, b, and, not, out];
    let c = circuit.build_component("NAND Gate", &gates).unwrap();
    (circuit, c, gates)
}

#[test]
fn test_component_boundary() {
    let (circuit, c, gates) = nand_component();
    let component = circuit.component(c).unwrap();
    assert_eq!(component.get_name(), "NAND Gate");
    assert_eq!(component.gates().len(), 5);
    assert_eq!(component.exposed_inputs().len(), 2);
    assert_eq!(component.input_gates(), &gates[..2]);
    assert_eq!(component.tag(), "COMPONENT");
    assert!(component.exposed_output().is_none());
}

#[test]
fn test_components_are_numbered() {
    let (mut circuit, first, [a, b, ..]) = nand_component();
    let second = circuit.build_component("inputs", &[a, b]).unwrap();
    assert_ne!(first, second);
    assert_eq!(second.index(), first.index() + 1);
    assert_eq!(circuit.components().count(), 2);

    // Each component gets its own boundary pins
    let p1 = circuit.component(first).unwrap().exposed_inputs().to_vec();
    let p2 = circuit.component(second).unwrap().exposed_inputs().to_vec();
    assert!(p1.iter().all(|p| !p2.contains(p)));
}

#[test]
fn test_members_are_shared() {
    let (mut circuit, c, [a, b, _, _, out]) = nand_component();
    // Driving the member gate directly is visible through the component
    circuit.set_input_state(a, true).unwrap();
    circuit.set_input_state(b, true).unwrap();
    assert_eq!(circuit.component_outputs(c), Ok(vec![false]));
    assert_eq!(circuit.get_output_state(out), Ok(false));
}

#[test]
fn test_drive_component() {
    let (mut circuit, c, _) = nand_component();
    for (x, y) in [(false, false), (false, true), (true, false), (true, true)] {
        circuit.set_component_input(c, 0, x).unwrap();
        circuit.set_component_input(c, 1, y).unwrap();
        assert_eq!(circuit.component_outputs(c), Ok(vec![!(x && y)]));
    }
}

#[test]
fn test_component_errors() {
    let (mut circuit, c, _) = nand_component();
    let missing = ComponentId::from(3);
    assert_eq!(
        circuit.set_component_input(missing, 0, true),
        Err(Error::InvalidComponent(missing))
    );
    assert_eq!(
        circuit.set_component_input(c, 2, true),
        Err(Error::InvalidPort {
            component: c,
            index: 2
        })
    );
    assert_eq!(
        circuit.component_outputs(missing),
        Err(Error::InvalidComponent(missing))
    );
}

#[test]
fn test_component_without_inputs() {
    let mut circuit = Circuit::new("no_inputs");
    let not = circuit.create_gate(GateType::Not);
    let out = circuit.create_gate(GateType::Out);
    circuit.connect(not, out, 1).unwrap();
    let c = circuit.build_component("constant", &[not, out]).unwrap();
    assert!(circuit.component(c).unwrap().exposed_inputs().is_empty());

    circuit.settle().unwrap();
    assert_eq!(circuit.component_outputs(c), Ok(vec![true]));
}
