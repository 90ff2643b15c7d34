use crate::models::{Cost, Demand, NodeId, Turn};
use rustc_hash::FxHashMap;

/// Dense arc index in the formulation graph.
pub type ArcId = usize;

/// Dense turn index, the position of the turn in the instance.
pub type TurnId = usize;

/// Service identifier used in route segments, starts from 1.
pub type ServiceId = usize;

/// A directed arc of the formulation graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Arc {
    /// Tail node.
    pub from: NodeId,
    /// Head node.
    pub to: NodeId,
    /// Deadheading time.
    pub traversal_cost: Cost,
    /// Service time, zero when the arc is not required.
    pub service_cost: Cost,
    /// Demand, unit when required.
    pub demand: Demand,
    /// True if the arc belongs to R_A.
    pub is_required: bool,
    /// Service id of the original required arc or edge.
    pub service_id: Option<ServiceId>,
}

/// A required node (R_V).
#[derive(Clone, Debug, PartialEq)]
pub struct RequiredNode {
    /// Node id.
    pub id: NodeId,
    /// Service time.
    pub service_cost: Cost,
    /// Demand.
    pub demand: Demand,
    /// Service id.
    pub service_id: ServiceId,
}

/// A required edge (E_R) expanded into two opposite arcs of R_A.
#[derive(Clone, Debug, PartialEq)]
pub struct RequiredEdge {
    /// Arc in the input direction.
    pub forward: ArcId,
    /// Arc in the opposite direction, same as `forward` for a loop.
    pub backward: ArcId,
    /// Service id shared by both directions.
    pub service_id: ServiceId,
}

/// A fleet of identical vehicles.
#[derive(Clone, Debug, PartialEq)]
pub struct Fleet {
    /// Amount of vehicles (K).
    pub size: usize,
    /// Route duration limit (T_max).
    pub capacity: Cost,
}

/// A fully directed graph used by the formulation: every edge is expanded into two opposite arcs.
/// It is built once by preprocessing and stays read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct FormulationGraph {
    pub(crate) depot: NodeId,
    pub(crate) node_count: usize,
    pub(crate) arcs: Vec<Arc>,
    pub(crate) arc_lookup: FxHashMap<(NodeId, NodeId), ArcId>,
    pub(crate) required_arcs: Vec<ArcId>,
    pub(crate) required_arc_positions: Vec<Option<usize>>,
    pub(crate) outgoing: Vec<Vec<ArcId>>,
    pub(crate) incoming: Vec<Vec<ArcId>>,
    pub(crate) required_nodes: Vec<RequiredNode>,
    pub(crate) required_node_positions: Vec<Option<usize>>,
    pub(crate) original_required_arcs: Vec<ArcId>,
    pub(crate) required_edges: Vec<RequiredEdge>,
    pub(crate) turns: Vec<Turn>,
    pub(crate) turns_starting_with: Vec<Vec<TurnId>>,
    pub(crate) turns_ending_with: Vec<Vec<TurnId>>,
    pub(crate) turns_at: Vec<Vec<TurnId>>,
    pub(crate) fleet: Fleet,
    pub(crate) total_service_cost: Cost,
}

impl FormulationGraph {
    /// Returns depot node.
    pub fn depot(&self) -> NodeId {
        self.depot
    }

    /// Returns all node ids (1..=N).
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        1..=self.node_count
    }

    /// Returns amount of nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the arc set A.
    pub fn arcs(&self) -> &[Arc] {
        self.arcs.as_slice()
    }

    /// Returns arc by its id.
    pub fn arc(&self, arc_id: ArcId) -> &Arc {
        &self.arcs[arc_id]
    }

    /// Finds arc id by its end nodes.
    pub fn find_arc(&self, from: NodeId, to: NodeId) -> Option<ArcId> {
        self.arc_lookup.get(&(from, to)).copied()
    }

    /// Returns R_A: ids of required arcs including edge expansions.
    pub fn required_arcs(&self) -> &[ArcId] {
        self.required_arcs.as_slice()
    }

    /// Returns position of the arc inside R_A, none if the arc is not required.
    pub fn required_arc_position(&self, arc_id: ArcId) -> Option<usize> {
        self.required_arc_positions[arc_id]
    }

    /// Returns arcs leaving the node.
    pub fn outgoing(&self, node: NodeId) -> &[ArcId] {
        self.outgoing[node].as_slice()
    }

    /// Returns arcs entering the node.
    pub fn incoming(&self, node: NodeId) -> &[ArcId] {
        self.incoming[node].as_slice()
    }

    /// Returns R_V.
    pub fn required_nodes(&self) -> &[RequiredNode] {
        self.required_nodes.as_slice()
    }

    /// Returns position of the node inside R_V, none if the node is not required.
    pub fn required_node_position(&self, node: NodeId) -> Option<usize> {
        self.required_node_positions[node]
    }

    /// Returns A'_R: arcs which were required arcs in the instance.
    pub fn original_required_arcs(&self) -> &[ArcId] {
        self.original_required_arcs.as_slice()
    }

    /// Returns E_R.
    pub fn required_edges(&self) -> &[RequiredEdge] {
        self.required_edges.as_slice()
    }

    /// Returns turns.
    pub fn turns(&self) -> &[Turn] {
        self.turns.as_slice()
    }

    /// Returns turns (i, j, l) whose first arc is (i, j).
    pub fn turns_starting_with(&self, arc_id: ArcId) -> &[TurnId] {
        self.turns_starting_with[arc_id].as_slice()
    }

    /// Returns turns (i', i, j) whose second arc is (i, j).
    pub fn turns_ending_with(&self, arc_id: ArcId) -> &[TurnId] {
        self.turns_ending_with[arc_id].as_slice()
    }

    /// Returns turns which pass through the node.
    pub fn turns_at(&self, node: NodeId) -> &[TurnId] {
        self.turns_at[node].as_slice()
    }

    /// Returns the fleet.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Returns total service time of required entities, edges counted once.
    pub fn total_service_cost(&self) -> Cost {
        self.total_service_cost
    }

    /// Returns true if there is anything to service.
    pub fn has_requirements(&self) -> bool {
        !self.required_arcs.is_empty() || !self.required_nodes.is_empty()
    }
}
