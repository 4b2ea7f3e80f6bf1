use signal_net::circuit::{GateId, GateType};
use signal_net::graph::iter::DfsIterator;
use signal_net::graph::{CombDepth, FanOutTable};
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
fn test_detect_cycles() {
    let mut circuit = Circuit::new("example");
    let a = circuit.create_gate(GateType::In);
    let and = circuit.create_gate(GateType::And);
    let not = circuit.create_gate(GateType::Not);
    circuit.connect(a, and, 2).unwrap();
    circuit.connect(and, not, 1).unwrap();

    // No cycles yet.
    assert!(!DfsIterator::new(&circuit, a).detect_cycles());

    // Feed the inverter back into the AND
    circuit.connect(not, and, 2).unwrap();
    assert!(DfsIterator::new(&circuit, a).detect_cycles());
    assert!(circuit.has_cycles());
}

#[test]
fn test_dfs_order() {
    let (circuit, [a, b, and, out]) = get_simple_example();
    assert_eq!(circuit.dfs(a).collect::<Vec<_>>(), vec![a, and, out]);
    assert_eq!(circuit.dfs(b).collect::<Vec<_>>(), vec![b, and, out]);
    assert_eq!(circuit.dfs(out).collect::<Vec<_>>(), vec![out]);
    assert_eq!(circuit.dfs(GateId::from(99)).count(), 0);
}

#[test]
fn test_fanout_users() {
    let (circuit, [a, b, and, out]) = get_simple_example();
    let fan_out = circuit.get_analysis::<FanOutTable>().unwrap();
    assert_eq!(fan_out.get_gate_users(a).collect::<Vec<_>>(), vec![and]);
    assert_eq!(fan_out.get_gate_users(b).collect::<Vec<_>>(), vec![and]);
    assert!(fan_out.gate_has_uses(and));
    assert!(!fan_out.gate_has_uses(out));
}

#[cfg(feature = "graph")]
#[test]
fn test_petgraph() {
    use signal_net::graph::MultiDiGraph;

    let (circuit, [a, _, and, _]) = get_simple_example();

    let petgraph = circuit.get_analysis::<MultiDiGraph>();
    assert!(petgraph.is_ok());
    let petgraph = petgraph.unwrap();
    let graph = petgraph.get_graph();
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    let (s, t) = (petgraph.get_node(a).unwrap(), petgraph.get_node(and).unwrap());
    assert!(graph.contains_edge(s, t));
}

#[test]
fn test_comb_depth() {
    let (circuit, [a, _, and, out]) = get_simple_example();
    let depth_info = circuit.get_analysis::<CombDepth>();
    assert!(depth_info.is_ok());
    let depth_info = depth_info.unwrap();

    assert_eq!(depth_info.get_comb_depth(a), Some(0));
    assert_eq!(depth_info.get_comb_depth(and), Some(1));
    assert_eq!(depth_info.get_comb_depth(out), Some(2));
    assert_eq!(depth_info.get_max_depth(), 2);
}
