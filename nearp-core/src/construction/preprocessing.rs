#[cfg(test)]
#[path = "../../tests/unit/construction/preprocessing_test.rs"]
mod preprocessing_test;

use crate::models::*;
use rustc_hash::FxHashMap;

/// Transforms the instance into a fully directed formulation graph.
///
/// Arcs are inserted first, then every edge is expanded into two opposite arcs. A link which lands on
/// an already known directed pair is merged into the existing arc: the cheapest traversal time is kept
/// and a required link brings its service attributes. When the fleet is unbounded, its size is derived
/// as `floor(total service time / capacity)`.
pub fn preprocess(instance: &Instance) -> FormulationGraph {
    let mut builder = GraphBuilder::new(instance.nodes.len());

    let mut service_id = 0;
    let mut next_service_id = || {
        service_id += 1;
        service_id
    };

    let required_nodes = instance
        .required_nodes()
        .map(|node| RequiredNode {
            id: node.id,
            service_cost: node.service_cost,
            demand: node.demand,
            service_id: next_service_id(),
        })
        .collect::<Vec<_>>();

    let original_required_arcs = instance
        .arcs
        .iter()
        .filter_map(|link| {
            let service_id = if link.is_required { Some(next_service_id()) } else { None };
            let arc_id = builder.insert(link, link.from, link.to, service_id);
            service_id.map(|_| arc_id)
        })
        .collect::<Vec<_>>();

    let required_edges = instance
        .edges
        .iter()
        .filter_map(|link| {
            let service_id = if link.is_required { Some(next_service_id()) } else { None };
            let forward = builder.insert(link, link.from, link.to, service_id);
            let backward = builder.insert(link, link.to, link.from, service_id);
            service_id.map(|service_id| RequiredEdge { forward, backward, service_id })
        })
        .collect::<Vec<_>>();

    let total_service_cost = instance.total_service_cost();
    let fleet = Fleet {
        size: derive_fleet_size(instance.fleet, total_service_cost, instance.capacity),
        capacity: instance.capacity,
    };

    builder.build(instance, required_nodes, original_required_arcs, required_edges, fleet, total_service_cost)
}

/// Returns the fleet size: either the fixed one or `floor(total / capacity)`.
pub fn derive_fleet_size(fleet: FleetSize, total_service_cost: Cost, capacity: Cost) -> usize {
    match fleet {
        FleetSize::Fixed(size) => size,
        FleetSize::Unbounded => total_service_cost.checked_div(capacity).map_or(0, |size| size.max(0) as usize),
    }
}

struct GraphBuilder {
    arcs: Vec<Arc>,
    arc_lookup: FxHashMap<(NodeId, NodeId), ArcId>,
    outgoing: Vec<Vec<ArcId>>,
    incoming: Vec<Vec<ArcId>>,
}

impl GraphBuilder {
    fn new(node_count: usize) -> Self {
        Self {
            arcs: vec![],
            arc_lookup: FxHashMap::default(),
            outgoing: vec![vec![]; node_count + 1],
            incoming: vec![vec![]; node_count + 1],
        }
    }

    fn insert(&mut self, link: &Link, from: NodeId, to: NodeId, service_id: Option<ServiceId>) -> ArcId {
        if let Some(&arc_id) = self.arc_lookup.get(&(from, to)) {
            let arc = &mut self.arcs[arc_id];
            arc.traversal_cost = arc.traversal_cost.min(link.traversal_cost);

            if link.is_required {
                arc.service_cost = link.service_cost;
                arc.demand = link.demand;
                arc.is_required = true;
                arc.service_id = service_id;
            }

            return arc_id;
        }

        let arc_id = self.arcs.len();
        self.arcs.push(Arc {
            from,
            to,
            traversal_cost: link.traversal_cost,
            service_cost: link.service_cost,
            demand: link.demand,
            is_required: link.is_required,
            service_id,
        });
        self.arc_lookup.insert((from, to), arc_id);
        self.outgoing[from].push(arc_id);
        self.incoming[to].push(arc_id);

        arc_id
    }

    fn build(
        self,
        instance: &Instance,
        required_nodes: Vec<RequiredNode>,
        original_required_arcs: Vec<ArcId>,
        required_edges: Vec<RequiredEdge>,
        fleet: Fleet,
        total_service_cost: Cost,
    ) -> FormulationGraph {
        let node_count = instance.nodes.len();

        let required_arcs =
            self.arcs.iter().enumerate().filter(|(_, arc)| arc.is_required).map(|(idx, _)| idx).collect::<Vec<_>>();
        let mut required_arc_positions = vec![None; self.arcs.len()];
        required_arcs.iter().enumerate().for_each(|(position, &arc_id)| {
            required_arc_positions[arc_id] = Some(position);
        });

        let mut required_node_positions = vec![None; node_count + 1];
        required_nodes.iter().enumerate().for_each(|(position, node)| {
            required_node_positions[node.id] = Some(position);
        });

        let mut turns_starting_with = vec![vec![]; self.arcs.len()];
        let mut turns_ending_with = vec![vec![]; self.arcs.len()];
        let mut turns_at = vec![vec![]; node_count + 1];
        instance.turns.iter().enumerate().for_each(|(turn_id, turn)| {
            if let Some(&arc_id) = self.arc_lookup.get(&(turn.from, turn.via)) {
                turns_starting_with[arc_id].push(turn_id);
            }
            if let Some(&arc_id) = self.arc_lookup.get(&(turn.via, turn.to)) {
                turns_ending_with[arc_id].push(turn_id);
            }
            turns_at[turn.via].push(turn_id);
        });

        FormulationGraph {
            depot: instance.depot,
            node_count,
            arcs: self.arcs,
            arc_lookup: self.arc_lookup,
            required_arcs,
            required_arc_positions,
            outgoing: self.outgoing,
            incoming: self.incoming,
            required_nodes,
            required_node_positions,
            original_required_arcs,
            required_edges,
            turns: instance.turns.clone(),
            turns_starting_with,
            turns_ending_with,
            turns_at,
            fleet,
            total_service_cost,
        }
    }
}
