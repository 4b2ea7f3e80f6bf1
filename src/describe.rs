/*!

  Read-only snapshots of gates and components for diagnostics.

*/

use crate::{
    circuit::{ComponentId, Gate, GateId, GateType, PinId, WireId},
    component::{COMPONENT_TAG, Component},
    error::Result,
    netlist::Circuit,
};

/// Addresses either kind of describable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// A primitive gate
    Gate(GateId),
    /// A component
    Component(ComponentId),
}

impl From<GateId> for Handle {
    fn from(value: GateId) -> Self {
        Handle::Gate(value)
    }
}

impl From<ComponentId> for Handle {
    fn from(value: ComponentId) -> Self {
        Handle::Component(value)
    }
}

/// The state of a single pin
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
pub struct PinSnapshot {
    /// Pin id
    pub id: PinId,
    /// Last received value
    pub state: bool,
    /// Whether a wire targets the pin
    pub connected: bool,
}

/// The state and fan-out of a wire
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
pub struct WireSnapshot {
    /// Wire id
    pub id: WireId,
    /// Last value pushed onto the wire
    pub state: bool,
    /// Destination pins in fan-out order
    pub destinations: Vec<PinId>,
}

/// Everything observable about a gate
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
pub struct GateSnapshot {
    /// Gate id
    pub id: GateId,
    /// Gate type
    pub gate_type: GateType,
    /// Output value
    pub state: bool,
    /// Input pins in declaration order
    pub pins: Vec<PinSnapshot>,
    /// Outgoing wire, if connected
    pub wire: Option<WireSnapshot>,
}

/// Everything observable about a component
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
pub struct ComponentSnapshot {
    /// Component id
    pub id: ComponentId,
    /// Component name
    pub name: String,
    /// Always [COMPONENT_TAG]
    pub tag: &'static str,
    /// Member gates
    pub gates: Vec<GateId>,
    /// Boundary pins
    pub exposed_inputs: Vec<PinSnapshot>,
    /// Boundary output wire
    pub exposed_output: Option<WireSnapshot>,
}

/// A snapshot of whatever a [Handle] addressed
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
pub enum Snapshot {
    /// A gate snapshot
    Gate(GateSnapshot),
    /// A component snapshot
    Component(ComponentSnapshot),
}

fn bit(b: bool) -> char {
    if b { '1' } else { '0' }
}

impl std::fmt::Display for PinSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let link = if self.connected { "connected" } else { "open" };
        write!(f, "{} = {} ({})", self.id, bit(self.state), link)
    }
}

impl std::fmt::Display for WireSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {} ->", self.id, bit(self.state))?;
        for (i, pin) in self.destinations.iter().enumerate() {
            if i == 0 {
                write!(f, " {pin}")?;
            } else {
                write!(f, ", {pin}")?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for GateSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} {} = {}", self.id, self.gate_type, bit(self.state))?;
        let indent = " ".repeat(2);
        for pin in self.pins.iter() {
            writeln!(f, "{indent}{pin}")?;
        }
        if let Some(wire) = &self.wire {
            writeln!(f, "{indent}{wire}")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for ComponentSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} [", self.id, self.tag, self.name)?;
        for (i, gate) in self.gates.iter().enumerate() {
            if i == self.gates.len() - 1 {
                write!(f, "{gate}")?;
            } else {
                write!(f, "{gate}, ")?;
            }
        }
        writeln!(f, "]")?;
        let indent = " ".repeat(2);
        for pin in self.exposed_inputs.iter() {
            writeln!(f, "{indent}{pin}")?;
        }
        if let Some(wire) = &self.exposed_output {
            writeln!(f, "{indent}{wire}")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Snapshot::Gate(g) => g.fmt(f),
            Snapshot::Component(c) => c.fmt(f),
        }
    }
}

impl Circuit {
    fn snapshot_pin(&self, pin: PinId) -> PinSnapshot {
        PinSnapshot {
            id: pin,
            state: self.pins().state(pin),
            connected: self.pins().is_connected(pin),
        }
    }

    fn snapshot_wire(&self, wire: WireId) -> Option<WireSnapshot> {
        self.wire(wire).map(|w| WireSnapshot {
            id: w.id(),
            state: w.state(),
            destinations: w.destinations().to_vec(),
        })
    }

    pub(crate) fn snapshot_gate(&self, gate: &Gate) -> GateSnapshot {
        GateSnapshot {
            id: gate.id(),
            gate_type: gate.gate_type(),
            state: gate.state(),
            pins: gate.pins().iter().map(|p| self.snapshot_pin(*p)).collect(),
            wire: gate.wire().and_then(|w| self.snapshot_wire(w)),
        }
    }

    pub(crate) fn snapshot_component(&self, component: &Component) -> ComponentSnapshot {
        ComponentSnapshot {
            id: component.id(),
            name: component.get_name().to_string(),
            tag: COMPONENT_TAG,
            gates: component.gates().to_vec(),
            exposed_inputs: component
                .exposed_inputs()
                .iter()
                .map(|p| self.snapshot_pin(*p))
                .collect(),
            exposed_output: component
                .exposed_output()
                .and_then(|w| self.snapshot_wire(w)),
        }
    }

    /// Returns a snapshot of a gate
    pub fn describe_gate(&self, gate: GateId) -> Result<GateSnapshot> {
        Ok(self.snapshot_gate(self.req_gate(gate)?))
    }

    /// Returns a snapshot of a component
    pub fn describe_component(&self, component: ComponentId) -> Result<ComponentSnapshot> {
        Ok(self.snapshot_component(self.req_component(component)?))
    }

    /// Returns a snapshot of the entity behind `handle`
    pub fn describe(&self, handle: impl Into<Handle>) -> Result<Snapshot> {
        match handle.into() {
            Handle::Gate(g) => self.describe_gate(g).map(Snapshot::Gate),
            Handle::Component(c) => self.describe_component(c).map(Snapshot::Component),
        }
    }

    #[cfg(feature = "serde")]
    /// Writes a snapshot of every gate and component as pretty JSON
    pub fn dump_json(&self, writer: impl std::io::Write) -> std::result::Result<(), serde_json::Error> {
        let snapshots: Vec<Snapshot> = self
            .gates()
            .map(|g| Snapshot::Gate(self.snapshot_gate(g)))
            .chain(
                self.components()
                    .map(|c| Snapshot::Component(self.snapshot_component(c))),
            )
            .collect();
        serde_json::to_writer_pretty(writer, &snapshots)
    }
}
