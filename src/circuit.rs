/*!

  Primitive entities of a logic circuit: gates, pins and wires.

*/

use crate::error::Error;
use bitvec::vec::BitVec;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
        pub struct $name(usize);

        impl $name {
            /// Returns the position of the entity in its arena
            pub fn index(&self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

arena_id!(
    /// Ordinal identifier of a gate within its circuit
    GateId,
    "g"
);
arena_id!(
    /// Ordinal identifier of a pin within its circuit
    PinId,
    "p"
);
arena_id!(
    /// Ordinal identifier of a wire within its circuit
    WireId,
    "w"
);
arena_id!(
    /// Ordinal identifier of a component within its circuit
    ComponentId,
    "c"
);

/// The kinds of primitive gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub enum GateType {
    /// An input buffer, driven by an external stimulus
    In,
    /// An output buffer, a sink whose state is observed from outside
    Out,
    /// Logical negation
    Not,
    /// Logical conjunction
    And,
    /// Logical disjunction
    Or,
    /// Logical inequality
    Xor,
}

impl GateType {
    /// All gate types, in declaration order
    pub const ALL: [GateType; 6] = [
        GateType::In,
        GateType::Out,
        GateType::Not,
        GateType::And,
        GateType::Or,
        GateType::Xor,
    ];

    /// Returns the number of input pins a gate of this type owns
    pub fn arity(&self) -> usize {
        match self {
            GateType::In => 0,
            GateType::Out | GateType::Not => 1,
            GateType::And | GateType::Or | GateType::Xor => 2,
        }
    }

    /// Returns the human-readable type name
    pub fn name(&self) -> &'static str {
        match self {
            GateType::In => "IN",
            GateType::Out => "OUT",
            GateType::Not => "NOT",
            GateType::And => "AND",
            GateType::Or => "OR",
            GateType::Xor => "XOR",
        }
    }
}

impl std::fmt::Display for GateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for GateType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN" | "INPUT" => Ok(GateType::In),
            "OUT" | "OUTPUT" => Ok(GateType::Out),
            "NOT" | "INV" => Ok(GateType::Not),
            "AND" => Ok(GateType::And),
            "OR" => Ok(GateType::Or),
            "XOR" => Ok(GateType::Xor),
            _ => Err(Error::UnknownGateType(s.to_string())),
        }
    }
}

/// A gate variant carrying exactly the input pins its type needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateKind {
    /// Externally driven, no input pins
    Input,
    /// Passes its single input through
    Output([PinId; 1]),
    /// Inverts its single input
    Not([PinId; 1]),
    /// Conjunction of two inputs
    And([PinId; 2]),
    /// Disjunction of two inputs
    Or([PinId; 2]),
    /// Inequality of two inputs
    Xor([PinId; 2]),
}

impl GateKind {
    /// Builds the variant for `gate_type`, pulling fresh pins from `alloc` in declaration order.
    pub(crate) fn new(gate_type: GateType, mut alloc: impl FnMut() -> PinId) -> Self {
        match gate_type {
            GateType::In => GateKind::Input,
            GateType::Out => GateKind::Output([alloc()]),
            GateType::Not => GateKind::Not([alloc()]),
            GateType::And => GateKind::And([alloc(), alloc()]),
            GateType::Or => GateKind::Or([alloc(), alloc()]),
            GateType::Xor => GateKind::Xor([alloc(), alloc()]),
        }
    }

    /// Returns the type tag of this variant
    pub fn gate_type(&self) -> GateType {
        match self {
            GateKind::Input => GateType::In,
            GateKind::Output(_) => GateType::Out,
            GateKind::Not(_) => GateType::Not,
            GateKind::And(_) => GateType::And,
            GateKind::Or(_) => GateType::Or,
            GateKind::Xor(_) => GateType::Xor,
        }
    }

    /// Returns the input pins in declaration order
    pub fn pins(&self) -> &[PinId] {
        match self {
            GateKind::Input => &[],
            GateKind::Output(p) | GateKind::Not(p) => p.as_slice(),
            GateKind::And(p) | GateKind::Or(p) | GateKind::Xor(p) => p.as_slice(),
        }
    }

    /// Computes the output from the current pin states.
    /// Returns [None] for [GateKind::Input], whose state only changes by stimulus.
    pub fn evaluate(&self, pin: impl Fn(PinId) -> bool) -> Option<bool> {
        match self {
            GateKind::Input => None,
            GateKind::Output([a]) => Some(pin(*a)),
            GateKind::Not([a]) => Some(!pin(*a)),
            GateKind::And([a, b]) => Some(pin(*a) && pin(*b)),
            GateKind::Or([a, b]) => Some(pin(*a) || pin(*b)),
            GateKind::Xor([a, b]) => Some(pin(*a) != pin(*b)),
        }
    }
}

/// A primitive gate in the circuit
#[derive(Debug, Clone)]
pub struct Gate {
    id: GateId,
    kind: GateKind,
    /// The current output value
    state: bool,
    /// The outgoing wire, created on first connection
    wire: Option<WireId>,
}

impl Gate {
    pub(crate) fn new(id: GateId, kind: GateKind) -> Self {
        Self {
            id,
            kind,
            state: false,
            wire: None,
        }
    }

    /// Returns the id of the gate
    pub fn id(&self) -> GateId {
        self.id
    }

    /// Returns the variant of the gate
    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    /// Returns the type of the gate
    pub fn gate_type(&self) -> GateType {
        self.kind.gate_type()
    }

    /// Returns the type name of the gate, like `AND`
    pub fn name(&self) -> &'static str {
        self.gate_type().name()
    }

    /// Returns the input pins of the gate
    pub fn pins(&self) -> &[PinId] {
        self.kind.pins()
    }

    /// Returns the current output value of the gate
    pub fn state(&self) -> bool {
        self.state
    }

    /// Returns the outgoing wire, if the gate drives anything
    pub fn wire(&self) -> Option<WireId> {
        self.wire
    }

    pub(crate) fn set_state(&mut self, state: bool) {
        self.state = state;
    }

    pub(crate) fn set_wire(&mut self, wire: WireId) {
        self.wire = Some(wire);
    }
}

/// A single-source, multi-destination signal carrier
#[derive(Debug, Clone)]
pub struct Wire {
    id: WireId,
    source: GateId,
    state: bool,
    /// Order of destinations is the order they are re-evaluated in
    destinations: Vec<PinId>,
}

impl Wire {
    pub(crate) fn new(id: WireId, source: GateId, first: PinId) -> Self {
        Self {
            id,
            source,
            state: false,
            destinations: vec![first],
        }
    }

    /// Returns the id of the wire
    pub fn id(&self) -> WireId {
        self.id
    }

    /// Returns the gate driving this wire
    pub fn source(&self) -> GateId {
        self.source
    }

    /// Returns the last value pushed onto this wire
    pub fn state(&self) -> bool {
        self.state
    }

    /// Returns the fan-out list
    pub fn destinations(&self) -> &[PinId] {
        &self.destinations
    }

    /// Returns the number of pins this wire drives
    pub fn fan_out(&self) -> usize {
        self.destinations.len()
    }

    pub(crate) fn set_state(&mut self, state: bool) {
        self.state = state;
    }

    pub(crate) fn push_destination(&mut self, pin: PinId) {
        self.destinations.push(pin);
    }
}

/// Flat storage for every pin in a circuit.
/// Pin `i` is owned by `owners[i]`, and its state and connectivity live in bit `i` of the bit vectors.
#[derive(Debug, Clone, Default)]
pub struct PinTable {
    owners: Vec<GateId>,
    states: BitVec,
    connected: BitVec,
}

impl PinTable {
    /// Allocates a new disconnected pin with state `false`
    pub(crate) fn alloc(&mut self, owner: GateId) -> PinId {
        let id = PinId(self.owners.len());
        self.owners.push(owner);
        self.states.push(false);
        self.connected.push(false);
        id
    }

    /// Returns the number of pins
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Returns `true` if no pins were allocated
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Returns `true` if `pin` belongs to this table
    pub fn contains(&self, pin: PinId) -> bool {
        pin.0 < self.owners.len()
    }

    /// Returns the gate that reads this pin
    pub fn owner(&self, pin: PinId) -> GateId {
        self.owners[pin.0]
    }

    /// Returns the last value the pin received
    pub fn state(&self, pin: PinId) -> bool {
        self.states[pin.0]
    }

    /// Returns `true` once a wire targets the pin
    pub fn is_connected(&self, pin: PinId) -> bool {
        self.connected[pin.0]
    }

    pub(crate) fn set_state(&mut self, pin: PinId, state: bool) {
        self.states.set(pin.0, state);
    }

    pub(crate) fn mark_connected(&mut self, pin: PinId) {
        self.connected.set(pin.0, true);
    }

    /// Returns the number of pins that are wired
    pub fn connected_count(&self) -> usize {
        self.connected.count_ones()
    }
}
