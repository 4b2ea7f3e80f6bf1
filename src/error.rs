/*!

  Errors reported by circuit construction and simulation.

*/

use crate::circuit::{ComponentId, GateId};
use thiserror::Error;

/// A specialized result type for circuit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building or driving a [crate::netlist::Circuit].
///
/// All variants are recoverable. Apart from [Error::CyclicWiringOverflow],
/// an operation that fails leaves the circuit exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A connection named a gate that does not exist, or the fan-in bound was out of range
    #[error("invalid connection: {0}")]
    InvalidConnection(String),
    /// Every input pin of the target gate is already wired
    #[error("gate {0} has no unconnected input pin")]
    NoAvailablePin(GateId),
    /// Gate creation was requested with an unsupported type tag
    #[error("unknown gate type `{0}`")]
    UnknownGateType(String),
    /// Propagation went deeper than the configured bound, which only happens on cyclic wiring
    #[error("propagation through gate {gate} exceeded the depth limit of {depth} wire hops")]
    CyclicWiringOverflow {
        /// The gate being evaluated when the limit was hit
        gate: GateId,
        /// The hop limit that was reached
        depth: usize,
    },
    /// A connection would close a loop through the given gate
    #[error("connecting gate {0} would create a combinational loop")]
    CombinationalLoop(GateId),
    /// An external stimulus was applied to a gate that is not an IN gate
    #[error("gate {0} is not an IN gate")]
    NotAnInput(GateId),
    /// The gate id does not belong to this circuit
    #[error("gate {0} does not exist")]
    InvalidGate(GateId),
    /// The component id does not belong to this circuit
    #[error("component {0} does not exist")]
    InvalidComponent(ComponentId),
    /// An exposed port index is out of bounds for a component
    #[error("component {component} has no exposed input {index}")]
    InvalidPort {
        /// The component that was addressed
        component: ComponentId,
        /// The requested port position
        index: usize,
    },
}
