use signal_net::Error;
use signal_net::assert_dump_eq;
use signal_net::circuit::{GateId, GateType};
use signal_net::describe::Snapshot;
use signal_net::netlist::Circuit;

fn get_simple_example() -> (Circuit, [GateId; 4]) {
    let mut circuit = Circuit::new("example");

    let a = circuit.create_gate(GateType::In);
    let b = circuit.create_gate(GateType::In);
    let and = circuit.create_gate(GateType::And);
    let out = circuit.create_gate(GateType::Out);

    circuit.connect(a, and, 2).unwrap();
    circuit.connect(b, and, 2).unwrap();
    circuit.connect(and, out, 1).unwrap();

    (circuit, [a, b, and, out])
}

#[test]
fn test_io() {
    let (circuit, [a, b, _, out]) = get_simple_example();
    assert_eq!(circuit.inputs().collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(circuit.outputs().collect::<Vec<_>>(), vec![out]);
    assert_eq!(circuit.gate_count(), 4);
    assert_eq!(circuit.pins().len(), 3);
    assert_eq!(circuit.wires().count(), 3);
}

#[test]
fn test_gate_arity() {
    let mut circuit = Circuit::new("arity");
    for ty in GateType::ALL {
        let gate = circuit.create_gate(ty);
        assert_eq!(circuit.gate(gate).unwrap().pins().len(), ty.arity());
        assert_eq!(circuit.gate(gate).unwrap().name(), ty.name());
    }
    // IN=0, OUT=1, NOT=1, AND=2, OR=2, XOR=2
    assert_eq!(circuit.pins().len(), 8);
}

#[test]
fn test_unknown_gate_type() {
    let mut circuit = Circuit::new("unknown");
    let err = circuit.create_gate_named("LATCH").unwrap_err();
    assert_eq!(err, Error::UnknownGateType("LATCH".to_string()));
    assert_eq!(err.to_string(), "unknown gate type `LATCH`");
    assert_eq!(circuit.gate_count(), 0);
}

#[test]
fn test_uninitialized_default() {
    let (circuit, gates) = get_simple_example();
    for gate in gates {
        assert_eq!(circuit.get_output_state(gate), Ok(false));
        let snap = circuit.describe_gate(gate).unwrap();
        assert!(snap.pins.iter().all(|p| !p.state));
    }
}

#[test]
fn test_read_unknown_gate() {
    let (circuit, _) = get_simple_example();
    assert_eq!(
        circuit.get_output_state(GateId::from(10)),
        Err(Error::InvalidGate(GateId::from(10)))
    );
}

#[test]
fn test_saturation() {
    let (mut circuit, [a, b, and, out]) = get_simple_example();
    let before = circuit.to_string();

    assert!(circuit.is_saturated(and));
    assert_eq!(circuit.connect(a, and, 2), Err(Error::NoAvailablePin(and)));
    assert_eq!(circuit.connect(b, and, 1), Err(Error::NoAvailablePin(and)));
    assert_eq!(circuit.connect(and, out, 1), Err(Error::NoAvailablePin(out)));
    // IN gates take no inputs
    assert_eq!(circuit.connect(a, b, 1), Err(Error::NoAvailablePin(b)));

    assert_eq!(circuit.to_string(), before);
}

#[test]
fn test_pin_claim_order() {
    let mut circuit = Circuit::new("order");
    let a = circuit.create_gate(GateType::In);
    let b = circuit.create_gate(GateType::In);
    let xor = circuit.create_gate(GateType::Xor);
    let pins = circuit.gate(xor).unwrap().pins().to_vec();

    assert_eq!(circuit.free_pin(xor), Some(pins[0]));
    assert_eq!(circuit.connect(b, xor, 2), Ok(pins[0]));
    assert_eq!(circuit.free_pin(xor), Some(pins[1]));
    assert_eq!(circuit.connect(a, xor, 2), Ok(pins[1]));
    assert_eq!(circuit.free_pin(xor), None);
    assert_eq!(circuit.pin_owner(pins[1]), Some(xor));
    assert_eq!(circuit.pin_is_connected(pins[0]), Some(true));
}

#[test]
fn test_describe_component() {
    let (mut circuit, gates) = get_simple_example();
    let c = circuit.build_component("and2", &gates).unwrap();
    match circuit.describe(c).unwrap() {
        Snapshot::Component(snap) => {
            assert_eq!(snap.name, "and2");
            assert_eq!(snap.tag, "COMPONENT");
            assert_eq!(snap.gates, gates.to_vec());
            assert_eq!(snap.exposed_inputs.len(), 2);
            assert!(snap.exposed_output.is_none());
        }
        Snapshot::Gate(_) => panic!("Expected a component snapshot"),
    }
}

#[test]
fn test_dump() {
    let (mut circuit, [a, b, _, _]) = get_simple_example();
    circuit.set_input_state(a, true).unwrap();
    circuit.set_input_state(b, true).unwrap();
    circuit.build_component("and2", &[a, b]).unwrap();

    assert_dump_eq!(
        circuit.to_string(),
        "circuit example
         g0 IN = 1
           w0 = 1 -> p0
         g1 IN = 1
           w1 = 1 -> p1
         g2 AND = 1
           p0 = 1 (connected)
           p1 = 1 (connected)
           w2 = 1 -> p2
         g3 OUT = 1
           p2 = 1 (connected)
         c0 COMPONENT and2 [g0, g1]
           p3 = 0 (open)
           p4 = 0 (open)
         end\n"
    );
}
