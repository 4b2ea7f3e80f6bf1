/*!

  Push-based state propagation.

  Driving an IN gate stores the value on its outgoing wire, hands it to every
  destination pin, and re-evaluates each owning gate from all of its pins.
  Whenever a re-evaluated gate has a wire of its own the same happens one level
  further down. The walk is depth-first and settles the whole downstream graph
  before [Circuit::set_input_state] returns.

  The walk runs on an explicit stack rather than the call stack. A stack item
  records how many wire hops separate it from the stimulus; once that count
  would exceed the hop limit the walk stops with [Error::CyclicWiringOverflow].
  The limit is the larger of [SimConfig::max_depth] and the gate count. A path
  through an acyclic circuit visits each gate at most once, so only a feedback
  loop can reach it, and every loop does because gates push their state even
  when it did not change.

*/

use crate::{
    circuit::{GateId, GateType, PinId},
    error::{Error, Result},
    netlist::Circuit,
};
use log::{trace, warn};

/// Default bound on wire hops per propagation
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Settings for simulating a [Circuit]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(default)
)]
pub struct SimConfig {
    /// The longest chain of wire hops a single stimulus may travel.
    /// Circuits with more gates than this raise the limit to their gate count.
    pub max_depth: usize,
    /// Refuse connections that would close a loop, instead of failing later at propagation
    pub reject_cycles: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_cycles: false,
        }
    }
}

impl SimConfig {
    /// Returns the config with a different depth bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the config with loop rejection on [Circuit::connect] toggled
    pub fn with_reject_cycles(mut self, reject_cycles: bool) -> Self {
        self.reject_cycles = reject_cycles;
        self
    }
}

/// A value in flight towards a pin
#[derive(Debug, Clone, Copy)]
struct Delivery {
    pin: PinId,
    value: bool,
    /// Wire hops travelled from the stimulus
    depth: usize,
}

impl Circuit {
    /// Applies an external stimulus to an IN gate and propagates it until the circuit settles.
    ///
    /// Fails with [Error::NotAnInput] for other gate types. When the walk overflows on a
    /// feedback loop, the states updated before the overflow keep their new values.
    pub fn set_input_state(&mut self, gate: GateId, value: bool) -> Result<()> {
        if self.req_gate(gate)?.gate_type() != GateType::In {
            return Err(Error::NotAnInput(gate));
        }
        trace!("stimulus {gate} <- {value}");
        let mut stack = Vec::new();
        self.update_state(gate, value, 0, &mut stack)?;
        self.propagate(stack)
    }

    /// Returns the current output value of `gate`.
    /// Gates that no propagation has reached yet read `false`.
    pub fn get_output_state(&self, gate: GateId) -> Result<bool> {
        Ok(self.req_gate(gate)?.state())
    }

    /// Re-evaluates every gate in creation order and pushes its value downstream.
    ///
    /// Freshly built circuits start with every state `false`, which is wrong for a NOT gate
    /// nobody has driven yet. Settling resolves that without touching any stimulus.
    pub fn settle(&mut self) -> Result<()> {
        for index in 0..self.gate_count() {
            let gate = GateId::from(index);
            let value = match self.evaluate(gate) {
                Some(value) => value,
                None => self.req_gate(gate)?.state(),
            };
            let mut stack = Vec::new();
            self.update_state(gate, value, 0, &mut stack)?;
            self.propagate(stack)?;
        }
        Ok(())
    }

    /// Returns the number of wire hops after which propagation is considered looping
    pub fn hop_limit(&self) -> usize {
        self.config().max_depth.max(self.gate_count())
    }

    /// Computes what `gate` should output from its current pins
    fn evaluate(&self, gate: GateId) -> Option<bool> {
        let pins = self.pins();
        self.gate(gate)?.kind().evaluate(|p| pins.state(p))
    }

    /// Stores `value` as the state of `gate` and schedules delivery to its fan-out
    fn update_state(
        &mut self,
        gate: GateId,
        value: bool,
        depth: usize,
        stack: &mut Vec<Delivery>,
    ) -> Result<()> {
        let Some(wire) = self.gate_mut(gate).wire() else {
            self.gate_mut(gate).set_state(value);
            return Ok(());
        };

        // Nothing is written on overflow
        let limit = self.hop_limit();
        if depth >= limit {
            warn!("propagation through {gate} overflowed after {limit} wire hops");
            return Err(Error::CyclicWiringOverflow { gate, depth: limit });
        }

        self.gate_mut(gate).set_state(value);
        let wire = self.wire_mut(wire);
        wire.set_state(value);
        // Reversed so the first destination is popped first
        stack.extend(wire.destinations().iter().rev().map(|&pin| Delivery {
            pin,
            value,
            depth: depth + 1,
        }));
        Ok(())
    }

    /// Drains the delivery stack depth-first
    fn propagate(&mut self, mut stack: Vec<Delivery>) -> Result<()> {
        while let Some(Delivery { pin, value, depth }) = stack.pop() {
            self.pins_mut().set_state(pin, value);
            let owner = self.pins().owner(pin);
            trace!("{pin} of {owner} <- {value}");
            if let Some(next) = self.evaluate(owner) {
                self.update_state(owner, next, depth, &mut stack)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inverter_chain(len: usize, config: SimConfig) -> (Circuit, GateId, GateId) {
        let mut circuit = Circuit::with_config("chain", config);
        let input = circuit.create_gate(GateType::In);
        let mut last = input;
        for _ in 0..len {
            let not = circuit.create_gate(GateType::Not);
            circuit.connect(last, not, 1).unwrap();
            last = not;
        }
        (circuit, input, last)
    }

    #[test]
    fn unreached_gates_read_false() {
        let (circuit, input, last) = inverter_chain(3, SimConfig::default());
        assert_eq!(circuit.get_output_state(input), Ok(false));
        assert_eq!(circuit.get_output_state(last), Ok(false));
    }

    #[test]
    fn chain_parity() {
        let (mut circuit, input, last) = inverter_chain(5, SimConfig::default());
        circuit.set_input_state(input, false).unwrap();
        assert_eq!(circuit.get_output_state(last), Ok(true));
        circuit.set_input_state(input, true).unwrap();
        assert_eq!(circuit.get_output_state(last), Ok(false));
    }

    #[test]
    fn hop_limit_covers_every_gate() {
        let (circuit, _, _) = inverter_chain(5, SimConfig::default().with_max_depth(4));
        assert_eq!(circuit.hop_limit(), 6);
        let (circuit, _, _) = inverter_chain(5, SimConfig::default());
        assert_eq!(circuit.hop_limit(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn small_bound_still_settles_acyclic_chains() {
        let (mut circuit, input, last) = inverter_chain(9, SimConfig::default().with_max_depth(2));
        circuit.set_input_state(input, true).unwrap();
        assert_eq!(circuit.get_output_state(last), Ok(false));
    }

    #[test]
    fn chain_longer_than_default_bound() {
        let (mut circuit, input, last) = inverter_chain(DEFAULT_MAX_DEPTH + 76, SimConfig::default());
        assert!(!circuit.has_cycles());
        circuit.set_input_state(input, true).unwrap();
        // 1100 inverters, even parity
        assert_eq!(circuit.get_output_state(last), Ok(true));
        circuit.set_input_state(input, false).unwrap();
        assert_eq!(circuit.get_output_state(last), Ok(false));
    }

    #[test]
    fn overflow_keeps_wire_in_step_with_gate() {
        let mut circuit = Circuit::with_config("ring", SimConfig::default().with_max_depth(8));
        let a = circuit.create_gate(GateType::In);
        let xor = circuit.create_gate(GateType::Xor);
        circuit.connect(a, xor, 2).unwrap();
        circuit.connect(xor, xor, 2).unwrap();

        assert_eq!(
            circuit.set_input_state(a, true),
            Err(Error::CyclicWiringOverflow {
                gate: xor,
                depth: 8
            })
        );
        let state = circuit.get_output_state(xor).unwrap();
        assert_eq!(circuit.wire_of(xor).map(|w| w.state()), Some(state));
    }

    #[test]
    fn stimulus_only_on_inputs() {
        let (mut circuit, _, last) = inverter_chain(1, SimConfig::default());
        assert_eq!(
            circuit.set_input_state(last, true),
            Err(Error::NotAnInput(last))
        );
        assert_eq!(
            circuit.set_input_state(GateId::from(42), true),
            Err(Error::InvalidGate(GateId::from(42)))
        );
    }

    #[test]
    fn settle_resolves_initial_state() {
        let (mut circuit, input, last) = inverter_chain(1, SimConfig::default());
        assert_eq!(circuit.get_output_state(last), Ok(false));
        circuit.settle().unwrap();
        assert_eq!(circuit.get_output_state(last), Ok(true));
        assert_eq!(circuit.get_output_state(input), Ok(false));
    }
}
