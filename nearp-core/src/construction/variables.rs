#[cfg(test)]
#[path = "../../tests/unit/construction/variables_test.rs"]
mod variables_test;

use crate::mip::{LinearExpr, MipEngine, Variable};
use crate::models::*;
use crate::utils::{Float, GenericResult};

/// Keeps decision variables of all vehicles: exactly one variable per (vehicle, entity) pair.
///
/// Variables are stored densely per vehicle and addressed by dense ids of the formulation graph.
/// A lookup outside of the declared index set panics.
#[derive(Clone, Debug, Default)]
pub struct VariableIndex {
    services: Vec<Vec<Variable>>,
    node_services: Vec<Vec<Variable>>,
    deadheads: Vec<Vec<Variable>>,
    flows: Vec<Vec<Variable>>,
    turns: Vec<Vec<Variable>>,
    has_turns: bool,
}

impl VariableIndex {
    /// Declares all variable families in the engine: x, z, y, f and, with turn penalties, w.
    pub fn declare<E: MipEngine>(
        engine: &mut E,
        graph: &FormulationGraph,
        formulation: Formulation,
    ) -> GenericResult<Self> {
        let vehicles = 0..graph.fleet().size;

        let services = vehicles
            .clone()
            .map(|k| {
                graph
                    .required_arcs()
                    .iter()
                    .map(|&arc_id| {
                        let arc = graph.arc(arc_id);
                        engine.add_binary(&format!("x({k},{},{})", arc.from, arc.to))
                    })
                    .collect::<GenericResult<Vec<_>>>()
            })
            .collect::<GenericResult<Vec<_>>>()?;

        let node_services = vehicles
            .clone()
            .map(|k| {
                graph
                    .required_nodes()
                    .iter()
                    .map(|node| engine.add_binary(&format!("z({k},{})", node.id)))
                    .collect::<GenericResult<Vec<_>>>()
            })
            .collect::<GenericResult<Vec<_>>>()?;

        let deadheads = vehicles
            .clone()
            .map(|k| {
                graph
                    .arcs()
                    .iter()
                    .map(|arc| engine.add_integer(&format!("y({k},{},{})", arc.from, arc.to), 0., Float::INFINITY))
                    .collect::<GenericResult<Vec<_>>>()
            })
            .collect::<GenericResult<Vec<_>>>()?;

        let flows = vehicles
            .clone()
            .map(|k| {
                graph
                    .arcs()
                    .iter()
                    .map(|arc| engine.add_continuous(&format!("f({k},{},{})", arc.from, arc.to), 0., Float::INFINITY))
                    .collect::<GenericResult<Vec<_>>>()
            })
            .collect::<GenericResult<Vec<_>>>()?;

        let has_turns = formulation.has_turn_penalties();
        let turns = if has_turns {
            vehicles
                .map(|k| {
                    graph
                        .turns()
                        .iter()
                        .map(|turn| {
                            let name = format!("w({k},{},{},{})", turn.from, turn.via, turn.to);
                            engine.add_integer(&name, 0., Float::INFINITY)
                        })
                        .collect::<GenericResult<Vec<_>>>()
                })
                .collect::<GenericResult<Vec<_>>>()?
        } else {
            vec![]
        };

        Ok(Self { services, node_services, deadheads, flows, turns, has_turns })
    }

    /// Returns amount of vehicles.
    pub fn vehicles(&self) -> usize {
        self.deadheads.len()
    }

    /// Returns true if turn variables are declared.
    pub fn has_turns(&self) -> bool {
        self.has_turns
    }

    /// Returns x for the arc, none if the arc is not in R_A.
    pub fn service(&self, graph: &FormulationGraph, vehicle: usize, arc_id: ArcId) -> Option<Variable> {
        let services = &self.services[vehicle];
        graph.required_arc_position(arc_id).map(|position| services[position])
    }

    /// Returns z for the node, none if the node is not in R_V.
    pub fn node_service(&self, graph: &FormulationGraph, vehicle: usize, node: NodeId) -> Option<Variable> {
        let node_services = &self.node_services[vehicle];
        graph.required_node_position(node).map(|position| node_services[position])
    }

    /// Returns x variables of the vehicle ordered as R_A.
    pub fn services(&self, vehicle: usize) -> &[Variable] {
        self.services[vehicle].as_slice()
    }

    /// Returns z variables of the vehicle ordered as R_V.
    pub fn node_services(&self, vehicle: usize) -> &[Variable] {
        self.node_services[vehicle].as_slice()
    }

    /// Returns y of the arc.
    pub fn deadhead(&self, vehicle: usize, arc_id: ArcId) -> Variable {
        self.deadheads[vehicle][arc_id]
    }

    /// Returns f of the arc.
    pub fn flow(&self, vehicle: usize, arc_id: ArcId) -> Variable {
        self.flows[vehicle][arc_id]
    }

    /// Returns w of the turn. Panics when the formulation has no turn penalties.
    pub fn turn(&self, vehicle: usize, turn_id: TurnId) -> Variable {
        self.turns[vehicle][turn_id]
    }

    /// Returns `x + y` of the arc: how many times the vehicle traverses it.
    pub fn arc_usage(&self, graph: &FormulationGraph, vehicle: usize, arc_id: ArcId) -> LinearExpr {
        let mut expr = LinearExpr::from(self.deadhead(vehicle, arc_id));
        if let Some(service) = self.service(graph, vehicle, arc_id) {
            expr.add_term(service, 1.);
        }

        expr
    }

    /// Returns `s x + t y` of the arc: time spent by the vehicle on it.
    pub fn arc_time(&self, graph: &FormulationGraph, vehicle: usize, arc_id: ArcId) -> LinearExpr {
        let arc = graph.arc(arc_id);
        let mut expr = LinearExpr::empty();
        expr.add_term(self.deadhead(vehicle, arc_id), arc.traversal_cost as Float);
        if let Some(service) = self.service(graph, vehicle, arc_id) {
            expr.add_term(service, arc.service_cost as Float);
        }

        expr
    }

    /// Returns variable counts per family as (symbol, count) pairs.
    pub fn family_sizes(&self) -> Vec<(&'static str, usize)> {
        let count = |family: &Vec<Vec<Variable>>| family.iter().map(|variables| variables.len()).sum::<usize>();

        let mut sizes = vec![
            ("x", count(&self.services)),
            ("z", count(&self.node_services)),
            ("y", count(&self.deadheads)),
            ("f", count(&self.flows)),
        ];
        if self.has_turns {
            sizes.push(("w", count(&self.turns)));
        }

        sizes
    }
}
