#[cfg(test)]
#[path = "../../tests/unit/models/problem_test.rs"]
mod problem_test;

use crate::utils::{GenericError, GenericResult};
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Node identifier, instances number their nodes from 1 to N.
pub type NodeId = usize;

/// Time or cost unit. Service and traversal times are the same as costs.
pub type Cost = i64;

/// Demand unit.
pub type Demand = i64;

/// Specifies which formulation is built for the instance.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Formulation {
    /// Node, edge and arc routing problem.
    #[default]
    Nearp,
    /// Node, edge and arc routing problem with turn penalties.
    NearpTp,
}

impl Formulation {
    /// Returns true if turn variables and turn linking constraints are part of the model.
    pub fn has_turn_penalties(&self) -> bool {
        matches!(self, Formulation::NearpTp)
    }
}

impl FromStr for Formulation {
    type Err = GenericError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "nearp" => Ok(Formulation::Nearp),
            "nearptp" | "nearp-tp" | "nearp_tp" => Ok(Formulation::NearpTp),
            _ => Err(format!("unknown formulation: '{value}'").into()),
        }
    }
}

impl Display for Formulation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Formulation::Nearp => write!(f, "NEARP"),
            Formulation::NearpTp => write!(f, "NEARP-TP"),
        }
    }
}

/// Represents a node of the instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Node id.
    pub id: NodeId,
    /// Service time, charged only when the node is required.
    pub service_cost: Cost,
    /// Demand, unit when the node is required.
    pub demand: Demand,
    /// True if the node has to be serviced.
    pub is_required: bool,
}

impl Node {
    /// Creates a required node with unit demand.
    pub fn required(id: NodeId, service_cost: Cost) -> Self {
        Self { id, service_cost, demand: 1, is_required: true }
    }

    /// Creates a node which has no service.
    pub fn optional(id: NodeId) -> Self {
        Self { id, service_cost: 0, demand: 0, is_required: false }
    }
}

/// Represents an edge or an arc of the instance. Edges are undirected, arcs are directed from `from` to `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    /// Tail node.
    pub from: NodeId,
    /// Head node.
    pub to: NodeId,
    /// Deadheading time.
    pub traversal_cost: Cost,
    /// Service time, zero if not required.
    pub service_cost: Cost,
    /// Demand, unit when required.
    pub demand: Demand,
    /// True if the link has to be serviced.
    pub is_required: bool,
}

impl Link {
    /// Creates a required link with unit demand.
    pub fn required(from: NodeId, to: NodeId, traversal_cost: Cost, service_cost: Cost) -> Self {
        Self { from, to, traversal_cost, service_cost, demand: 1, is_required: true }
    }

    /// Creates a link which can only be deadheaded.
    pub fn optional(from: NodeId, to: NodeId, traversal_cost: Cost) -> Self {
        Self { from, to, traversal_cost, service_cost: 0, demand: 0, is_required: false }
    }
}

/// A turn classification.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TurnKind {
    /// Going straight through the node.
    Straight,
    /// Turning left or right.
    Turn,
    /// Returning along the same street.
    UTurn,
    /// Any other label found in the instance.
    Other(String),
}

impl FromStr for TurnKind {
    type Err = GenericError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.to_ascii_lowercase().as_str() {
            "s" | "straight" => TurnKind::Straight,
            "t" | "l" | "r" | "turn" | "left" | "right" => TurnKind::Turn,
            "u" | "u-turn" | "uturn" => TurnKind::UTurn,
            "" => return Err("empty turn type".into()),
            _ => TurnKind::Other(value.to_string()),
        })
    }
}

impl Display for TurnKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnKind::Straight => write!(f, "straight"),
            TurnKind::Turn => write!(f, "turn"),
            TurnKind::UTurn => write!(f, "u-turn"),
            TurnKind::Other(label) => write!(f, "{label}"),
        }
    }
}

/// A turn (i, j, l): arrive at `via` from `from` and leave it towards `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Turn {
    /// Node i.
    pub from: NodeId,
    /// Node j.
    pub via: NodeId,
    /// Node l.
    pub to: NodeId,
    /// Turn penalty.
    pub cost: Cost,
    /// Turn classification.
    pub kind: TurnKind,
}

/// Specifies amount of identical vehicles.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FleetSize {
    /// Exact upper bound on vehicles.
    Fixed(usize),
    /// Fleet size is derived from total service time and vehicle capacity.
    Unbounded,
}

/// An immutable routing instance as read from the input.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    /// Instance name.
    pub name: String,
    /// Fleet size.
    pub fleet: FleetSize,
    /// Maximum route duration (T_max).
    pub capacity: Cost,
    /// Depot node.
    pub depot: NodeId,
    /// All nodes ordered by id, ids are 1..=N.
    pub nodes: Vec<Node>,
    /// Edges in input order.
    pub edges: Vec<Link>,
    /// Arcs in input order.
    pub arcs: Vec<Link>,
    /// Turns in input order, empty for instances without turn penalties.
    pub turns: Vec<Turn>,
}

impl Instance {
    /// Checks the instance consistency and returns it back if it is valid.
    pub fn validate(self) -> GenericResult<Self> {
        if let Some((idx, node)) = self.nodes.iter().enumerate().find(|(idx, node)| node.id != idx + 1) {
            return Err(format!("node at position {} has id {}, expected {}", idx + 1, node.id, idx + 1).into());
        }

        let is_known = |id: NodeId| id >= 1 && id <= self.nodes.len();

        if !is_known(self.depot) {
            return Err(format!("depot node {} is not in 1..={}", self.depot, self.nodes.len()).into());
        }

        if self.capacity <= 0 {
            return Err(format!("vehicle capacity must be positive, got {}", self.capacity).into());
        }

        let mut required_pairs = FxHashSet::default();
        for (link, is_edge) in self.edges.iter().map(|e| (e, true)).chain(self.arcs.iter().map(|a| (a, false))) {
            if !is_known(link.from) || !is_known(link.to) {
                return Err(format!("link ({},{}) refers to unknown node", link.from, link.to).into());
            }

            if link.traversal_cost < 0 || link.service_cost < 0 {
                return Err(format!("link ({},{}) has negative cost", link.from, link.to).into());
            }

            if !link.is_required {
                continue;
            }

            let pairs = if is_edge && link.from != link.to {
                vec![(link.from, link.to), (link.to, link.from)]
            } else {
                vec![(link.from, link.to)]
            };
            for pair in pairs {
                if !required_pairs.insert(pair) {
                    return Err(format!("more than one required link covers ({},{})", pair.0, pair.1).into());
                }
            }
        }

        if let Some(node) = self.nodes.iter().find(|node| node.service_cost < 0) {
            return Err(format!("node {} has negative service cost", node.id).into());
        }

        if let Some(turn) = self.turns.iter().find(|t| !is_known(t.from) || !is_known(t.via) || !is_known(t.to)) {
            return Err(format!("turn ({},{},{}) refers to unknown node", turn.from, turn.via, turn.to).into());
        }

        Ok(self)
    }

    /// Returns required nodes.
    pub fn required_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| node.is_required)
    }

    /// Returns required edges.
    pub fn required_edges(&self) -> impl Iterator<Item = &Link> + '_ {
        self.edges.iter().filter(|edge| edge.is_required)
    }

    /// Returns required arcs.
    pub fn required_arcs(&self) -> impl Iterator<Item = &Link> + '_ {
        self.arcs.iter().filter(|arc| arc.is_required)
    }

    /// Returns total service time of all required entities, each edge is counted once.
    pub fn total_service_cost(&self) -> Cost {
        self.required_nodes().map(|node| node.service_cost).sum::<Cost>()
            + self.required_arcs().map(|arc| arc.service_cost).sum::<Cost>()
            + self.required_edges().map(|edge| edge.service_cost).sum::<Cost>()
    }
}
