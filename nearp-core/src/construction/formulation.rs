#[cfg(test)]
#[path = "../../tests/unit/construction/formulation_test.rs"]
mod formulation_test;

use super::VariableIndex;
use crate::mip::{Constraint, LinearExpr, MipEngine, ObjectiveDirection};
use crate::models::*;
use crate::utils::{Environment, Float, GenericResult};

/// A posted model: variables, per vehicle cost expressions and statistics.
#[derive(Clone, Debug)]
pub struct FormulationModel {
    /// Decision variables.
    pub variables: VariableIndex,
    /// Route cost expression Z_k per vehicle.
    pub costs: Vec<LinearExpr>,
    /// Variable and constraint counts.
    pub statistics: ModelStatistics,
}

/// Keeps amount of declared variables and posted constraints per family.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelStatistics {
    /// Amount of vehicles.
    pub vehicles: usize,
    /// Variable counts as (family, count) in declaration order.
    pub variables: Vec<(&'static str, usize)>,
    /// Constraint counts as (family, count) in posting order.
    pub constraints: Vec<(&'static str, usize)>,
}

impl ModelStatistics {
    /// Returns total amount of variables.
    pub fn total_variables(&self) -> usize {
        self.variables.iter().map(|(_, count)| count).sum()
    }

    /// Returns total amount of constraints.
    pub fn total_constraints(&self) -> usize {
        self.constraints.iter().map(|(_, count)| count).sum()
    }

    /// Returns amount of constraints of the given family, zero if the family is not posted.
    pub fn constraints_of(&self, family: &str) -> usize {
        self.constraints.iter().find(|(name, _)| *name == family).map_or(0, |(_, count)| *count)
    }

    /// Returns amount of variables of the given family, zero if the family is not declared.
    pub fn variables_of(&self, family: &str) -> usize {
        self.variables.iter().find(|(name, _)| *name == family).map_or(0, |(_, count)| *count)
    }
}

/// Posts the NEARP or NEARP-TP formulation of the graph into the engine.
pub struct ModelBuilder<'a> {
    graph: &'a FormulationGraph,
    formulation: Formulation,
    environment: &'a Environment,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a new instance of `ModelBuilder`.
    pub fn new(graph: &'a FormulationGraph, formulation: Formulation, environment: &'a Environment) -> Self {
        Self { graph, formulation, environment }
    }

    /// Declares variables, sets the objective and posts all constraint families.
    pub fn build<E: MipEngine>(&self, engine: &mut E) -> GenericResult<FormulationModel> {
        let fleet = self.graph.fleet();
        if fleet.size == 0 && self.graph.has_requirements() {
            return Err(format!(
                "fleet is empty while there are required entities (total service time {}, capacity {})",
                self.graph.total_service_cost(),
                fleet.capacity
            )
            .into());
        }

        self.log(&format!("building {} model for {} vehicle(s)", self.formulation, fleet.size));

        let variables = VariableIndex::declare(engine, self.graph, self.formulation)?;
        for (family, count) in variables.family_sizes() {
            self.log(&format!("  {family} variables: {count}"));
        }

        let costs = (0..fleet.size).map(|k| self.route_cost(&variables, k)).collect::<Vec<_>>();
        let objective = costs.iter().fold(LinearExpr::empty(), |mut acc, cost| {
            acc.add_expr(cost);
            acc
        });
        engine.set_objective(objective, ObjectiveDirection::Minimize)?;

        let mut statistics =
            ModelStatistics { vehicles: fleet.size, variables: variables.family_sizes(), constraints: vec![] };

        let families: Vec<(&'static str, Vec<Constraint>)> = vec![
            ("arc_assignment", self.arc_assignment(&variables)),
            ("edge_assignment", self.edge_assignment(&variables)),
            ("node_assignment", self.node_assignment(&variables)),
            ("flow_conservation", self.flow_conservation(&variables)),
            ("depot_departure", self.depot_departure(&variables)),
            ("time_flow", self.time_flow(&variables)),
            ("depot_time", self.depot_time(&variables, &costs)),
            ("time_link", self.time_link(&variables)),
            ("flow_lower_bound", self.flow_lower_bound(&variables)),
            ("turn_linking", self.turn_linking(&variables)),
            ("symmetry", self.symmetry(&costs)),
        ];

        for (family, constraints) in families {
            if family == "turn_linking" && !self.formulation.has_turn_penalties() {
                continue;
            }

            let count = constraints.len();
            constraints.into_iter().try_for_each(|constraint| engine.add_constraint(constraint))?;

            self.log(&format!("  {family} constraints: {count}"));
            statistics.constraints.push((family, count));
        }

        self.log(&format!(
            "model is built: {} variables, {} constraints",
            statistics.total_variables(),
            statistics.total_constraints()
        ));

        Ok(FormulationModel { variables, costs, statistics })
    }

    /// Z_k: service of arcs and nodes, deadheading and, with turn penalties, turns.
    fn route_cost(&self, variables: &VariableIndex, k: usize) -> LinearExpr {
        let graph = self.graph;
        let mut cost = LinearExpr::empty();

        graph.required_arcs().iter().zip(variables.services(k)).for_each(|(&arc_id, &x)| {
            cost.add_term(x, graph.arc(arc_id).service_cost as Float);
        });

        graph.required_nodes().iter().zip(variables.node_services(k)).for_each(|(node, &z)| {
            cost.add_term(z, node.service_cost as Float);
        });

        graph.arcs().iter().enumerate().for_each(|(arc_id, arc)| {
            cost.add_term(variables.deadhead(k, arc_id), arc.traversal_cost as Float);
        });

        if variables.has_turns() {
            graph.turns().iter().enumerate().for_each(|(turn_id, turn)| {
                cost.add_term(variables.turn(k, turn_id), turn.cost as Float);
            });
        }

        cost
    }

    fn vehicles(&self) -> std::ops::Range<usize> {
        0..self.graph.fleet().size
    }

    fn non_depot_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        let depot = self.graph.depot();
        self.graph.nodes().filter(move |&node| node != depot)
    }

    fn arc_assignment(&self, variables: &VariableIndex) -> Vec<Constraint> {
        self.graph
            .original_required_arcs()
            .iter()
            .map(|&arc_id| {
                let arc = self.graph.arc(arc_id);
                let lhs = self.vehicles().filter_map(|k| variables.service(self.graph, k, arc_id)).map(|x| (x, 1.));

                Constraint::eq(format!("assign_arc_{}_{}", arc.from, arc.to), lhs.collect::<LinearExpr>(), 1.)
            })
            .collect()
    }

    fn edge_assignment(&self, variables: &VariableIndex) -> Vec<Constraint> {
        self.graph
            .required_edges()
            .iter()
            .map(|edge| {
                let arc = self.graph.arc(edge.forward);
                // a loop edge is expanded into a single arc
                let directions =
                    if edge.forward == edge.backward { vec![edge.forward] } else { vec![edge.forward, edge.backward] };

                let lhs = self
                    .vehicles()
                    .flat_map(|k| directions.iter().filter_map(move |&arc_id| variables.service(self.graph, k, arc_id)))
                    .map(|x| (x, 1.))
                    .collect::<LinearExpr>();

                Constraint::eq(format!("assign_edge_{}_{}", arc.from, arc.to), lhs, 1.)
            })
            .collect()
    }

    fn node_assignment(&self, variables: &VariableIndex) -> Vec<Constraint> {
        self.graph
            .required_nodes()
            .iter()
            .map(|node| {
                let lhs = self
                    .vehicles()
                    .filter_map(|k| variables.node_service(self.graph, k, node.id))
                    .map(|z| (z, 1.))
                    .collect::<LinearExpr>();

                Constraint::eq(format!("assign_node_{}", node.id), lhs, 1.)
            })
            .collect()
    }

    fn flow_conservation(&self, variables: &VariableIndex) -> Vec<Constraint> {
        self.vehicles()
            .flat_map(|k| {
                self.non_depot_nodes().map(move |node| {
                    let inflow = self.sum_usage(variables, k, self.graph.incoming(node));
                    let outflow = self.sum_usage(variables, k, self.graph.outgoing(node));

                    Constraint::eq(format!("flow_{k}_{node}"), inflow - outflow, 0.)
                })
            })
            .collect()
    }

    fn depot_departure(&self, variables: &VariableIndex) -> Vec<Constraint> {
        let depot = self.graph.depot();

        self.vehicles()
            .map(|k| {
                let outflow = self.sum_usage(variables, k, self.graph.outgoing(depot));
                Constraint::le(format!("depot_leave_{k}"), outflow, 1.)
            })
            .collect()
    }

    fn time_flow(&self, variables: &VariableIndex) -> Vec<Constraint> {
        self.vehicles()
            .flat_map(|k| {
                self.non_depot_nodes().map(move |node| {
                    let graph = self.graph;
                    let mut balance = self.sum_flows(variables, k, graph.incoming(node));
                    balance.add_scaled(&self.sum_flows(variables, k, graph.outgoing(node)), -1.);
                    balance.add_scaled(&self.sum_times(variables, k, graph.incoming(node)), -1.);

                    if let Some(position) = graph.required_node_position(node) {
                        let service_cost = graph.required_nodes()[position].service_cost as Float;
                        balance.add_term(variables.node_services(k)[position], -service_cost);
                    }

                    if variables.has_turns() {
                        graph.turns_at(node).iter().for_each(|&turn_id| {
                            balance.add_term(variables.turn(k, turn_id), -(graph.turns()[turn_id].cost as Float));
                        });
                    }

                    Constraint::eq(format!("time_flow_{k}_{node}"), balance, 0.)
                })
            })
            .collect()
    }

    fn depot_time(&self, variables: &VariableIndex, costs: &[LinearExpr]) -> Vec<Constraint> {
        let depot = self.graph.depot();

        self.vehicles()
            .flat_map(|k| {
                let start = Constraint::eq(
                    format!("depot_time_start_{k}"),
                    self.sum_flows(variables, k, self.graph.outgoing(depot)),
                    &costs[k],
                );
                let end = Constraint::eq(
                    format!("depot_time_end_{k}"),
                    self.sum_flows(variables, k, self.graph.incoming(depot)),
                    self.sum_times(variables, k, self.graph.incoming(depot)),
                );

                [start, end]
            })
            .collect()
    }

    fn time_link(&self, variables: &VariableIndex) -> Vec<Constraint> {
        let capacity = self.graph.fleet().capacity as Float;

        self.per_vehicle_arc(|k, arc_id, arc| {
            Constraint::le(
                format!("time_link_{k}_{}_{}", arc.from, arc.to),
                variables.flow(k, arc_id),
                variables.arc_usage(self.graph, k, arc_id).scaled(capacity),
            )
        })
    }

    fn flow_lower_bound(&self, variables: &VariableIndex) -> Vec<Constraint> {
        self.per_vehicle_arc(|k, arc_id, arc| {
            let flow = variables.flow(k, arc_id);

            match variables.service(self.graph, k, arc_id) {
                Some(x) => Constraint::ge(
                    format!("flow_lb_service_{k}_{}_{}", arc.from, arc.to),
                    flow,
                    LinearExpr::from_iter([(x, arc.service_cost as Float)]),
                ),
                None => Constraint::ge(
                    format!("flow_lb_deadhead_{k}_{}_{}", arc.from, arc.to),
                    flow,
                    LinearExpr::from_iter([(variables.deadhead(k, arc_id), arc.traversal_cost as Float)]),
                ),
            }
        })
    }

    fn turn_linking(&self, variables: &VariableIndex) -> Vec<Constraint> {
        if !variables.has_turns() {
            return vec![];
        }

        self.vehicles()
            .flat_map(|k| {
                self.graph.arcs().iter().enumerate().flat_map(move |(arc_id, arc)| {
                    let usage = variables.arc_usage(self.graph, k, arc_id);
                    let turn_out = Constraint::eq(
                        format!("turn_out_{k}_{}_{}", arc.from, arc.to),
                        self.sum_turns(variables, k, self.graph.turns_starting_with(arc_id)),
                        &usage,
                    );
                    let turn_in = Constraint::eq(
                        format!("turn_in_{k}_{}_{}", arc.from, arc.to),
                        self.sum_turns(variables, k, self.graph.turns_ending_with(arc_id)),
                        usage,
                    );

                    [turn_out, turn_in]
                })
            })
            .collect()
    }

    fn symmetry(&self, costs: &[LinearExpr]) -> Vec<Constraint> {
        costs
            .windows(2)
            .enumerate()
            .map(|(k, pair)| Constraint::ge(format!("symmetry_{k}"), &pair[0], &pair[1]))
            .collect()
    }

    fn per_vehicle_arc<F>(&self, create: F) -> Vec<Constraint>
    where
        F: Fn(usize, ArcId, &Arc) -> Constraint,
    {
        self.vehicles()
            .flat_map(|k| self.graph.arcs().iter().enumerate().map(move |(arc_id, arc)| (k, arc_id, arc)))
            .map(|(k, arc_id, arc)| create(k, arc_id, arc))
            .collect()
    }

    fn sum_usage(&self, variables: &VariableIndex, k: usize, arcs: &[ArcId]) -> LinearExpr {
        arcs.iter().fold(LinearExpr::empty(), |mut acc, &arc_id| {
            acc.add_expr(&variables.arc_usage(self.graph, k, arc_id));
            acc
        })
    }

    fn sum_flows(&self, variables: &VariableIndex, k: usize, arcs: &[ArcId]) -> LinearExpr {
        arcs.iter().map(|&arc_id| (variables.flow(k, arc_id), 1.)).collect()
    }

    fn sum_times(&self, variables: &VariableIndex, k: usize, arcs: &[ArcId]) -> LinearExpr {
        arcs.iter().fold(LinearExpr::empty(), |mut acc, &arc_id| {
            acc.add_expr(&variables.arc_time(self.graph, k, arc_id));
            acc
        })
    }

    fn sum_turns(&self, variables: &VariableIndex, k: usize, turns: &[TurnId]) -> LinearExpr {
        turns.iter().map(|&turn_id| (variables.turn(k, turn_id), 1.)).collect()
    }

    fn log(&self, message: &str) {
        (self.environment.logger)(message)
    }
}
