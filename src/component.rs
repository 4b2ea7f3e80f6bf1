/*!

  Named aggregates of gates with an exposed input boundary.

*/

use crate::{
    circuit::{ComponentId, GateId, GateType, PinId, WireId},
    error::{Error, Result},
    netlist::Circuit,
};
use log::debug;

/// Type tag distinguishing a component from a primitive gate in diagnostics
pub const COMPONENT_TAG: &str = "COMPONENT";

/// A named group of gates that exposes one boundary pin per contained IN gate
#[derive(Debug, Clone)]
pub struct Component {
    id: ComponentId,
    name: String,
    /// Member gates in the order they were supplied
    gates: Vec<GateId>,
    /// The IN members, parallel to `exposed_in`
    input_gates: Vec<GateId>,
    /// Boundary pins, one per IN member
    exposed_in: Vec<PinId>,
    /// Never populated, composition of components is not supported
    exposed_out: Option<WireId>,
}

impl Component {
    /// Returns the id of the component
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Returns the name of the component
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Returns the type tag of the component
    pub fn tag(&self) -> &'static str {
        COMPONENT_TAG
    }

    /// Returns the member gates
    pub fn gates(&self) -> &[GateId] {
        &self.gates
    }

    /// Returns the IN members, in the same order as [Component::exposed_inputs]
    pub fn input_gates(&self) -> &[GateId] {
        &self.input_gates
    }

    /// Returns the boundary pins
    pub fn exposed_inputs(&self) -> &[PinId] {
        &self.exposed_in
    }

    /// Returns the boundary output wire, which is always [None]
    pub fn exposed_output(&self) -> Option<WireId> {
        self.exposed_out
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} \"{}\"", COMPONENT_TAG, self.id, self.name)
    }
}

impl Circuit {
    /// Wraps already constructed gates into a named component.
    ///
    /// Every IN member gets a fresh boundary pin. The members are referenced, not copied,
    /// and membership is fixed afterwards. Fails with [Error::InvalidGate] before changing
    /// anything if a member does not exist.
    pub fn build_component(
        &mut self,
        name: impl Into<String>,
        members: &[GateId],
    ) -> Result<ComponentId> {
        let mut input_gates = Vec::new();
        for member in members {
            if self.req_gate(*member)?.gate_type() == GateType::In {
                input_gates.push(*member);
            }
        }

        let id = ComponentId::from(self.component_count());
        let exposed_in = input_gates
            .iter()
            .map(|g| self.pins_mut().alloc(*g))
            .collect::<Vec<_>>();
        let component = Component {
            id,
            name: name.into(),
            gates: members.to_vec(),
            input_gates,
            exposed_in,
            exposed_out: None,
        };
        debug!(
            "built {} with {} gates and {} exposed inputs",
            component,
            component.gates.len(),
            component.exposed_in.len()
        );
        self.push_component(component);
        Ok(id)
    }

    /// Returns the component with id `component`, or [Error::InvalidComponent]
    pub fn req_component(&self, component: ComponentId) -> Result<&Component> {
        self.component(component)
            .ok_or(Error::InvalidComponent(component))
    }

    /// Drives the `index`th boundary pin of a component.
    ///
    /// The value is stored on the boundary pin and then applied to the matching IN member
    /// exactly like [Circuit::set_input_state].
    pub fn set_component_input(
        &mut self,
        component: ComponentId,
        index: usize,
        value: bool,
    ) -> Result<()> {
        let c = self.req_component(component)?;
        let (Some(pin), Some(gate)) = (c.exposed_in.get(index), c.input_gates.get(index)) else {
            return Err(Error::InvalidPort { component, index });
        };
        let (pin, gate) = (*pin, *gate);
        self.pins_mut().set_state(pin, value);
        self.set_input_state(gate, value)
    }

    /// Reads the states of the OUT members of a component, in member order
    pub fn component_outputs(&self, component: ComponentId) -> Result<Vec<bool>> {
        let c = self.req_component(component)?;
        Ok(c.gates
            .iter()
            .filter_map(|g| self.gate(*g))
            .filter(|g| g.gate_type() == GateType::Out)
            .map(|g| g.state())
            .collect())
    }
}
