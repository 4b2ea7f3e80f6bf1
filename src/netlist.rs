/*!

  The circuit arena and the connection protocol.

*/

use crate::{
    circuit::{ComponentId, Gate, GateId, GateKind, GateType, PinId, PinTable, Wire, WireId},
    component::Component,
    error::{Error, Result},
    graph::iter::DfsIterator,
    sim::SimConfig,
};
use log::{debug, warn};

/// The widest fan-in of any primitive, which bounds the `max_fanin` argument of [Circuit::connect]
pub const MAX_FANIN: usize = 2;

/// A circuit owns every gate, pin, wire and component in flat arenas.
/// Entities refer to each other by index, so ids from one circuit mean nothing in another.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// The name of the circuit
    name: String,
    /// Simulation settings
    config: SimConfig,
    /// Gates in creation order
    gates: Vec<Gate>,
    /// Every input pin, including component boundary pins
    pins: PinTable,
    /// Wires in creation order
    wires: Vec<Wire>,
    /// Components in creation order
    components: Vec<Component>,
}

impl Circuit {
    /// Creates an empty circuit with the default [SimConfig]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, SimConfig::default())
    }

    /// Creates an empty circuit with the given settings
    pub fn with_config(name: impl Into<String>, config: SimConfig) -> Self {
        Self {
            name: name.into(),
            config,
            gates: Vec::new(),
            pins: PinTable::default(),
            wires: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Returns the name of the circuit
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Returns the simulation settings
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Replaces the simulation settings
    pub fn set_config(&mut self, config: SimConfig) {
        self.config = config;
    }

    /// Allocates a gate of type `gate_type` with its input pins.
    pub fn create_gate(&mut self, gate_type: GateType) -> GateId {
        let id = GateId::from(self.gates.len());
        let pins = &mut self.pins;
        let kind = GateKind::new(gate_type, || pins.alloc(id));
        debug!("created {} {} with {} pins", gate_type, id, kind.pins().len());
        self.gates.push(Gate::new(id, kind));
        id
    }

    /// Allocates a gate from a type tag like `"AND"`.
    /// Fails with [Error::UnknownGateType] and creates nothing if the tag is not recognized.
    pub fn create_gate_named(&mut self, tag: &str) -> Result<GateId> {
        let gate_type = tag.parse::<GateType>()?;
        Ok(self.create_gate(gate_type))
    }

    /// Connects the output of `src` to the first unconnected input pin of `dst`.
    ///
    /// The first connection from `src` creates its wire. Later ones append to the same wire.
    /// `max_fanin` must lie in `1..=MAX_FANIN`; each call claims exactly one pin regardless.
    /// Returns the claimed pin. On error the circuit is left unchanged.
    pub fn connect(&mut self, src: GateId, dst: GateId, max_fanin: usize) -> Result<PinId> {
        if !(1..=MAX_FANIN).contains(&max_fanin) {
            return Err(Error::InvalidConnection(format!(
                "fan-in bound {max_fanin} is outside 1..={MAX_FANIN}"
            )));
        }
        if !self.contains_gate(src) {
            return Err(Error::InvalidConnection(format!(
                "source gate {src} does not exist"
            )));
        }
        if !self.contains_gate(dst) {
            return Err(Error::InvalidConnection(format!(
                "target gate {dst} does not exist"
            )));
        }

        let pin = match self.free_pin(dst) {
            Some(pin) => pin,
            None => {
                warn!("cannot connect {src} to {dst}: all inputs are wired");
                return Err(Error::NoAvailablePin(dst));
            }
        };

        if self.config.reject_cycles && self.reaches(dst, src) {
            return Err(Error::CombinationalLoop(src));
        }

        match self.gates[src.index()].wire() {
            Some(wire) => self.wires[wire.index()].push_destination(pin),
            None => {
                let wire = WireId::from(self.wires.len());
                self.wires.push(Wire::new(wire, src, pin));
                self.gates[src.index()].set_wire(wire);
                debug!("created wire {wire} from {src}");
            }
        }
        self.pins.mark_connected(pin);
        debug!("connected {src} to pin {pin} of {dst}");
        Ok(pin)
    }

    /// Returns `true` if `to` is `from` or lies downstream of it
    fn reaches(&self, from: GateId, to: GateId) -> bool {
        DfsIterator::new(self, from).any(|g| g == to)
    }

    /// Returns the first unconnected input pin of `gate` in declaration order
    pub fn free_pin(&self, gate: GateId) -> Option<PinId> {
        self.gate(gate)?
            .pins()
            .iter()
            .copied()
            .find(|p| !self.pins.is_connected(*p))
    }

    /// Returns `true` if every input pin of `gate` is wired.
    /// IN gates have no pins, so they are always saturated. Unknown gates are not.
    pub fn is_saturated(&self, gate: GateId) -> bool {
        self.contains_gate(gate) && self.free_pin(gate).is_none()
    }

    pub(crate) fn gate_mut(&mut self, gate: GateId) -> &mut Gate {
        &mut self.gates[gate.index()]
    }

    pub(crate) fn wire_mut(&mut self, wire: WireId) -> &mut Wire {
        &mut self.wires[wire.index()]
    }

    pub(crate) fn pins_mut(&mut self) -> &mut PinTable {
        &mut self.pins
    }

    pub(crate) fn push_component(&mut self, component: Component) {
        self.components.push(component);
    }
}

impl Circuit {
    /// Returns `true` if `gate` was allocated by this circuit
    pub fn contains_gate(&self, gate: GateId) -> bool {
        gate.index() < self.gates.len()
    }

    /// Returns the gate with id `gate`
    pub fn gate(&self, gate: GateId) -> Option<&Gate> {
        self.gates.get(gate.index())
    }

    /// Returns the gate with id `gate`, or [Error::InvalidGate]
    pub fn req_gate(&self, gate: GateId) -> Result<&Gate> {
        self.gate(gate).ok_or(Error::InvalidGate(gate))
    }

    /// Returns an iterator over the gates in creation order
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.iter()
    }

    /// Returns the number of gates
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Returns the pin table
    pub fn pins(&self) -> &PinTable {
        &self.pins
    }

    /// Returns the state of `pin`, if it exists
    pub fn pin_state(&self, pin: PinId) -> Option<bool> {
        self.pins.contains(pin).then(|| self.pins.state(pin))
    }

    /// Returns `true` if a wire targets `pin`
    pub fn pin_is_connected(&self, pin: PinId) -> Option<bool> {
        self.pins.contains(pin).then(|| self.pins.is_connected(pin))
    }

    /// Returns the gate that reads `pin`
    pub fn pin_owner(&self, pin: PinId) -> Option<GateId> {
        self.pins.contains(pin).then(|| self.pins.owner(pin))
    }

    /// Returns the wire with id `wire`
    pub fn wire(&self, wire: WireId) -> Option<&Wire> {
        self.wires.get(wire.index())
    }

    /// Returns the wire driven by `gate`, if it has been connected
    pub fn wire_of(&self, gate: GateId) -> Option<&Wire> {
        self.gate(gate)?.wire().and_then(|w| self.wire(w))
    }

    /// Returns an iterator over the wires in creation order
    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.iter()
    }

    /// Returns the gates that read the output of `gate`, in fan-out order.
    /// A gate appears once per pin it has wired to `gate`.
    pub fn downstream(&self, gate: GateId) -> impl Iterator<Item = GateId> {
        self.wire_of(gate)
            .into_iter()
            .flat_map(move |w| w.destinations().iter().map(move |p| self.pins.owner(*p)))
    }

    /// Returns the components in creation order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Returns the component with id `component`
    pub fn component(&self, component: ComponentId) -> Option<&Component> {
        self.components.get(component.index())
    }

    /// Returns the number of components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Returns an iterator over the gates whose variant satisfies `filter`
    pub fn matches<F>(&self, filter: F) -> impl Iterator<Item = &Gate>
    where
        F: Fn(&GateKind) -> bool,
    {
        self.gates.iter().filter(move |g| filter(g.kind()))
    }

    /// Returns the IN gates, the stimulus points of the circuit
    pub fn inputs(&self) -> impl Iterator<Item = GateId> {
        self.matches(|k| matches!(k, GateKind::Input))
            .map(|g| g.id())
    }

    /// Returns the OUT gates, the observation points of the circuit
    pub fn outputs(&self) -> impl Iterator<Item = GateId> {
        self.matches(|k| matches!(k, GateKind::Output(_)))
            .map(|g| g.id())
    }
}

/// Filter the gates of a circuit by variant. Use it like you would `matches!`.
/// Example: ```filter_gates!(circuit, GateKind::And(_));```
#[macro_export]
macro_rules! filter_gates {
    ($circuit:ident, $pattern:pat $(if $guard:expr)? $(,)?) => {
        $circuit.matches(|k| match k {
            $pattern $(if $guard)? => true,
            _ => false
        })
    };
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "circuit {}", self.name)?;
        for gate in self.gates.iter() {
            write!(f, "{}", self.snapshot_gate(gate))?;
        }
        for component in self.components.iter() {
            write!(f, "{}", self.snapshot_component(component))?;
        }
        writeln!(f, "end")
    }
}
