#[cfg(test)]
#[path = "../../tests/unit/models/solution_test.rs"]
mod solution_test;

use crate::models::{ArcId, Cost, Demand, FormulationGraph, NodeId, ServiceId, TurnId};
use crate::utils::Float;
use std::fmt::{Display, Formatter};

/// A threshold to consider binary or integer variable value as set.
pub const VALUE_THRESHOLD: Float = 0.5;

/// Represents a single step of the route.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RouteSegment {
    /// A depot visit.
    Depot {
        /// Depot service id, zero for the real depot.
        service_id: ServiceId,
        /// Node id.
        from: NodeId,
        /// Node id.
        to: NodeId,
    },
    /// A service of a required node (`from` equals `to`), arc or edge.
    Service {
        /// Service id.
        service_id: ServiceId,
        /// Tail node.
        from: NodeId,
        /// Head node.
        to: NodeId,
    },
    /// A deadheading traversal.
    Traversal {
        /// Tail node.
        from: NodeId,
        /// Head node.
        to: NodeId,
    },
}

impl RouteSegment {
    /// Returns true if the segment counts as a visit (a depot or a service).
    pub fn is_visit(&self) -> bool {
        !matches!(self, RouteSegment::Traversal { .. })
    }
}

impl Display for RouteSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteSegment::Depot { service_id, from, to } => write!(f, "(D {service_id},{from},{to})"),
            RouteSegment::Service { service_id, from, to } => write!(f, "(S {service_id},{from},{to})"),
            RouteSegment::Traversal { from, to } => write!(f, "(T {from},{to})"),
        }
    }
}

/// A route of a single vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Vehicle index.
    pub vehicle: usize,
    /// Total demand of serviced entities.
    pub demand: Demand,
    /// Route cost (Z_k).
    pub cost: Cost,
    /// Ordered segments, starting and ending at the depot.
    pub segments: Vec<RouteSegment>,
}

impl Route {
    /// Returns amount of depot and service segments.
    pub fn visits(&self) -> usize {
        self.segments.iter().filter(|segment| segment.is_visit()).count()
    }

    /// Returns true if the vehicle never leaves the depot.
    pub fn is_idle(&self) -> bool {
        self.segments.iter().all(|segment| matches!(segment, RouteSegment::Depot { .. }))
    }
}

/// Solved values of all variables of one vehicle, copied out of the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleAssignment {
    /// Vehicle index.
    pub vehicle: usize,
    /// Values of x, ordered as R_A.
    pub arc_services: Vec<Float>,
    /// Values of z, ordered as R_V.
    pub node_services: Vec<Float>,
    /// Values of y, ordered as A.
    pub deadheads: Vec<Float>,
    /// Values of f, ordered as A.
    pub flows: Vec<Float>,
    /// Values of w, ordered as turns. Empty without turn penalties.
    pub turns: Vec<Float>,
    /// Value of Z_k.
    pub cost: Float,
}

impl VehicleAssignment {
    /// Returns true if the vehicle services the arc.
    pub fn services_arc(&self, graph: &FormulationGraph, arc_id: ArcId) -> bool {
        graph.required_arc_position(arc_id).is_some_and(|position| self.arc_services[position] > VALUE_THRESHOLD)
    }

    /// Returns true if the vehicle services the node.
    pub fn services_node(&self, graph: &FormulationGraph, node: NodeId) -> bool {
        graph.required_node_position(node).is_some_and(|position| self.node_services[position] > VALUE_THRESHOLD)
    }

    /// Returns how many times the vehicle deadheads the arc.
    pub fn deadhead_count(&self, arc_id: ArcId) -> usize {
        self.deadheads[arc_id].round().max(0.) as usize
    }

    /// Returns how many times the vehicle executes the turn.
    pub fn turn_count(&self, turn_id: TurnId) -> usize {
        self.turns.get(turn_id).map_or(0, |value| value.round().max(0.) as usize)
    }

    /// Returns how many times the vehicle uses the arc: one service plus deadheads.
    pub fn arc_uses(&self, graph: &FormulationGraph, arc_id: ArcId) -> usize {
        usize::from(self.services_arc(graph, arc_id)) + self.deadhead_count(arc_id)
    }
}

/// A solution of the routing instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Rounded objective value.
    pub objective: Cost,
    /// One route per declared vehicle, idle vehicles included.
    pub routes: Vec<Route>,
    /// Total wall-clock time in milliseconds.
    pub total_time_millis: u64,
    /// Wall-clock time until the best incumbent in milliseconds.
    pub time_to_best_millis: u64,
    /// Solved variable values per vehicle.
    pub assignments: Vec<VehicleAssignment>,
}

impl Solution {
    /// Returns routes which leave the depot.
    pub fn used_routes(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.iter().filter(|route| !route.is_idle())
    }

    /// Returns amount of vehicles which leave the depot.
    pub fn vehicles_used(&self) -> usize {
        self.used_routes().count()
    }
}
