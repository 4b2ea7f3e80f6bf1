/*!

  Structural analyses over the wiring of a circuit.

*/

use crate::circuit::{GateId, PinId, WireId};
use crate::error::{Error, Result};
use crate::netlist::Circuit;
#[cfg(feature = "graph")]
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, VecDeque};

/// A common trait of analyses than can be performed on a circuit.
/// An analysis becomes stale when the circuit is rewired.
pub trait Analysis<'a>
where
    Self: Sized + 'a,
{
    /// Construct the analysis to the current state of the circuit.
    fn build(circuit: &'a Circuit) -> Result<Self>;
}

/// A table that maps gates to the gates they drive, and pins to the wires that drive them
pub struct FanOutTable<'a> {
    // A reference to the underlying circuit
    _circuit: &'a Circuit,
    // Maps a gate to the gates reading its wire, one entry per pin
    gate_fan_out: HashMap<GateId, Vec<GateId>>,
    /// Maps a pin to the wire driving it
    pin_driver: HashMap<PinId, WireId>,
}

impl FanOutTable<'_> {
    /// Returns an iterator to the gates that read the output of `gate`.
    pub fn get_gate_users(&self, gate: GateId) -> impl Iterator<Item = GateId> {
        self.gate_fan_out
            .get(&gate)
            .into_iter()
            .flat_map(|users| users.iter().copied())
    }

    /// Returns the wire driving `pin`, if any
    pub fn get_driver(&self, pin: PinId) -> Option<WireId> {
        self.pin_driver.get(&pin).copied()
    }

    /// Returns `true` if the output of `gate` is wired to anything
    pub fn gate_has_uses(&self, gate: GateId) -> bool {
        self.gate_fan_out
            .get(&gate)
            .is_some_and(|users| !users.is_empty())
    }
}

impl<'a> Analysis<'a> for FanOutTable<'a> {
    fn build(circuit: &'a Circuit) -> Result<Self> {
        let mut gate_fan_out: HashMap<GateId, Vec<GateId>> = HashMap::new();
        let mut pin_driver: HashMap<PinId, WireId> = HashMap::new();

        for wire in circuit.wires() {
            let users = gate_fan_out.entry(wire.source()).or_default();
            for pin in wire.destinations() {
                users.push(circuit.pins().owner(*pin));
                pin_driver.insert(*pin, wire.id());
            }
        }

        Ok(FanOutTable {
            _circuit: circuit,
            gate_fan_out,
            pin_driver,
        })
    }
}

/// The logic level of every gate: IN gates and undriven gates sit at level 0,
/// every other gate one level above its deepest driver.
/// Building it fails on circuits with feedback loops.
pub struct CombDepth<'a> {
    // A reference to the underlying circuit
    _circuit: &'a Circuit,
    // Logic level per gate
    comb_depth: HashMap<GateId, usize>,
    /// The maximum depth of the circuit
    max_depth: usize,
}

impl CombDepth<'_> {
    /// Returns the logic level of a gate in the circuit.
    pub fn get_comb_depth(&self, gate: GateId) -> Option<usize> {
        self.comb_depth.get(&gate).cloned()
    }

    /// Returns the maximum logic level of the circuit.
    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }
}

impl<'a> Analysis<'a> for CombDepth<'a> {
    fn build(circuit: &'a Circuit) -> Result<Self> {
        // Kahn's algorithm, counting one edge per wired pin
        let mut pending: HashMap<GateId, usize> = circuit
            .gates()
            .map(|g| (g.id(), circuit.pins_driving(g.id())))
            .collect();
        let mut comb_depth: HashMap<GateId, usize> = HashMap::new();
        let mut ready: VecDeque<GateId> = circuit
            .gates()
            .map(|g| g.id())
            .filter(|g| pending[g] == 0)
            .collect();
        for g in ready.iter() {
            comb_depth.insert(*g, 0);
        }

        while let Some(gate) = ready.pop_front() {
            let level = comb_depth[&gate];
            for user in circuit.downstream(gate) {
                let entry = comb_depth.entry(user).or_insert(0);
                *entry = (*entry).max(level + 1);
                if let Some(count) = pending.get_mut(&user) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(user);
                    }
                }
            }
        }

        if let Some((gate, _)) = pending.iter().filter(|(_, n)| **n > 0).min_by_key(|(g, _)| **g) {
            return Err(Error::CombinationalLoop(*gate));
        }

        let max_depth = comb_depth.values().max().cloned().unwrap_or(0);

        Ok(CombDepth {
            _circuit: circuit,
            comb_depth,
            max_depth,
        })
    }
}

impl Circuit {
    /// Returns the number of connected input pins of `gate`
    fn pins_driving(&self, gate: GateId) -> usize {
        self.gate(gate)
            .map(|g| {
                g.pins()
                    .iter()
                    .filter(|p| self.pins().is_connected(**p))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Constructs an analysis of the circuit.
    pub fn get_analysis<'a, A: Analysis<'a>>(&'a self) -> Result<A> {
        A::build(self)
    }

    /// Returns a depth-first search iterator over the gates downstream of `from`.
    pub fn dfs(&self, from: GateId) -> impl Iterator<Item = GateId> {
        iter::DfsIterator::new(self, from)
    }

    /// Returns `true` if any wiring forms a feedback loop
    pub fn has_cycles(&self) -> bool {
        self.gates()
            .any(|g| iter::DfsIterator::new(self, g.id()).detect_cycles())
    }
}

/// Iterators over the wiring of a circuit
pub mod iter {
    use crate::circuit::GateId;
    use crate::netlist::Circuit;
    use std::collections::HashSet;

    /// A depth-first iterator over the gates downstream of a starting gate, in preorder.
    /// # Examples
    ///
    /// ```
    /// use signal_net::circuit::GateType;
    /// use signal_net::graph::iter::DfsIterator;
    /// use signal_net::netlist::Circuit;
    ///
    /// let mut circuit = Circuit::new("example");
    /// let a = circuit.create_gate(GateType::In);
    /// let not = circuit.create_gate(GateType::Not);
    /// circuit.connect(a, not, 1).unwrap();
    /// let mut gates = Vec::new();
    /// let mut dfs = DfsIterator::new(&circuit, a);
    /// while let Some(g) = dfs.next() {
    ///     if dfs.check_cycles() {
    ///         panic!("Cycle detected in the circuit");
    ///     }
    ///     gates.push(g);
    /// }
    /// assert_eq!(gates, vec![a, not]);
    /// ```
    pub struct DfsIterator<'a> {
        circuit: &'a Circuit,
        root: Option<GateId>,
        /// The current path, with the position of the next user to visit
        stack: Vec<(GateId, usize)>,
        on_path: HashSet<GateId>,
        visited: HashSet<GateId>,
        cycles: bool,
    }

    impl<'a> DfsIterator<'a> {
        /// Create a new DFS iterator for the circuit starting at `from`.
        pub fn new(circuit: &'a Circuit, from: GateId) -> Self {
            Self {
                circuit,
                root: Some(from),
                stack: Vec::new(),
                on_path: HashSet::new(),
                visited: HashSet::new(),
                cycles: false,
            }
        }

        /// Check if the DFS traversal has run into a loop yet.
        pub fn check_cycles(&self) -> bool {
            self.cycles
        }

        /// Consumes the iterator to detect loops reachable from the start.
        pub fn detect_cycles(mut self) -> bool {
            while self.next().is_some() {
                if self.cycles {
                    return true;
                }
            }
            self.cycles
        }

        fn enter(&mut self, gate: GateId) -> GateId {
            self.visited.insert(gate);
            self.on_path.insert(gate);
            self.stack.push((gate, 0));
            gate
        }
    }

    impl Iterator for DfsIterator<'_> {
        type Item = GateId;

        fn next(&mut self) -> Option<Self::Item> {
            if let Some(root) = self.root.take() {
                if !self.circuit.contains_gate(root) {
                    return None;
                }
                return Some(self.enter(root));
            }

            while let Some((gate, pos)) = self.stack.last_mut() {
                let gate = *gate;
                let Some(user) = self.circuit.downstream(gate).nth(*pos) else {
                    self.on_path.remove(&gate);
                    self.stack.pop();
                    continue;
                };
                *pos += 1;
                if self.on_path.contains(&user) {
                    self.cycles = true;
                } else if !self.visited.contains(&user) {
                    return Some(self.enter(user));
                }
            }

            None
        }
    }
}

/// Returns a petgraph representation of the circuit with one node per gate
/// and one edge per wired pin, labelled with that pin.
#[cfg(feature = "graph")]
pub struct MultiDiGraph<'a> {
    _circuit: &'a Circuit,
    graph: DiGraph<GateId, PinId>,
    nodes: HashMap<GateId, NodeIndex>,
}

#[cfg(feature = "graph")]
impl MultiDiGraph<'_> {
    /// Return a reference to the graph constructed by this analysis
    pub fn get_graph(&self) -> &DiGraph<GateId, PinId> {
        &self.graph
    }

    /// Returns the graph node of `gate`
    pub fn get_node(&self, gate: GateId) -> Option<NodeIndex> {
        self.nodes.get(&gate).copied()
    }
}

#[cfg(feature = "graph")]
impl<'a> Analysis<'a> for MultiDiGraph<'a> {
    fn build(circuit: &'a Circuit) -> Result<Self> {
        let mut nodes = HashMap::new();
        let mut graph = DiGraph::new();

        for gate in circuit.gates() {
            let id = graph.add_node(gate.id());
            nodes.insert(gate.id(), id);
        }

        for wire in circuit.wires() {
            let s_id = nodes[&wire.source()];
            for pin in wire.destinations() {
                let t_id = nodes[&circuit.pins().owner(*pin)];
                graph.add_edge(s_id, t_id, *pin);
            }
        }

        Ok(Self {
            _circuit: circuit,
            graph,
            nodes,
        })
    }
}
