#[cfg(test)]
#[path = "../../tests/unit/solver/routing_test.rs"]
mod routing_test;

use crate::models::*;
use crate::utils::InfoLogger;

/// Reconstructs the route of one vehicle from its solved values.
///
/// Every service contributes one use of its arc and every deadhead contributes `round(y)` uses. The
/// uses form a closed walk through the depot which is traced with Hierholzer's algorithm. When several
/// uses leave a node, the one with the larger time flow goes first as the flow decreases along the route.
pub fn trace_route(graph: &FormulationGraph, assignment: &VehicleAssignment, logger: &InfoLogger) -> Route {
    let depot = graph.depot();
    let depot_segment = RouteSegment::Depot { service_id: 0, from: depot, to: depot };

    let mut pending = create_pending_uses(graph, assignment);
    let walk = walk_from(depot, &mut pending, graph);

    let unreachable = pending.iter().map(|uses| uses.len()).sum::<usize>();
    if unreachable > 0 {
        (logger)(&format!("vehicle {}: {unreachable} arc use(s) are not reachable from the depot", assignment.vehicle));
    }

    let mut serviced_arcs = vec![false; graph.arcs().len()];
    let mut serviced_nodes = vec![false; graph.node_count() + 1];
    let mut segments = vec![depot_segment.clone()];

    let mut visit_node = |node: NodeId, segments: &mut Vec<RouteSegment>| {
        if serviced_nodes[node] || !assignment.services_node(graph, node) {
            return;
        }
        serviced_nodes[node] = true;

        if let Some(position) = graph.required_node_position(node) {
            let service_id = graph.required_nodes()[position].service_id;
            segments.push(RouteSegment::Service { service_id, from: node, to: node });
        }
    };

    if !walk.is_empty() {
        visit_node(depot, &mut segments);
    }

    for arc_id in walk {
        let arc = graph.arc(arc_id);
        let segment = match arc.service_id {
            Some(service_id) if assignment.services_arc(graph, arc_id) && !serviced_arcs[arc_id] => {
                serviced_arcs[arc_id] = true;
                RouteSegment::Service { service_id, from: arc.from, to: arc.to }
            }
            _ => RouteSegment::Traversal { from: arc.from, to: arc.to },
        };

        segments.push(segment);
        visit_node(arc.to, &mut segments);
    }

    segments.push(depot_segment);

    Route {
        vehicle: assignment.vehicle,
        demand: get_demand(graph, assignment),
        cost: assignment.cost.round() as Cost,
        segments,
    }
}

/// Returns per node stacks of arc uses, the preferred one on top.
fn create_pending_uses(graph: &FormulationGraph, assignment: &VehicleAssignment) -> Vec<Vec<ArcId>> {
    let mut pending = vec![Vec::<ArcId>::new(); graph.node_count() + 1];

    graph.arcs().iter().enumerate().for_each(|(arc_id, arc)| {
        let uses = assignment.arc_uses(graph, arc_id);
        pending[arc.from].extend(std::iter::repeat_n(arc_id, uses));
    });

    // ascending by flow, ties are resolved to take the smaller arc id first
    pending.iter_mut().for_each(|uses| {
        uses.sort_by(|&a, &b| assignment.flows[a].total_cmp(&assignment.flows[b]).then_with(|| b.cmp(&a)))
    });

    pending
}

/// Traces an Eulerian walk from the start node consuming pending uses. Returns arcs in visiting order.
fn walk_from(start: NodeId, pending: &mut [Vec<ArcId>], graph: &FormulationGraph) -> Vec<ArcId> {
    let mut stack: Vec<(NodeId, Option<ArcId>)> = vec![(start, None)];
    let mut circuit = Vec::new();

    while let Some(&(node, _)) = stack.last() {
        match pending[node].pop() {
            Some(arc_id) => stack.push((graph.arc(arc_id).to, Some(arc_id))),
            None => {
                if let Some((_, Some(arc_id))) = stack.pop() {
                    circuit.push(arc_id);
                }
            }
        }
    }

    circuit.reverse();
    circuit
}

fn get_demand(graph: &FormulationGraph, assignment: &VehicleAssignment) -> Demand {
    let arcs = graph
        .required_arcs()
        .iter()
        .filter(|&&arc_id| assignment.services_arc(graph, arc_id))
        .map(|&arc_id| graph.arc(arc_id).demand)
        .sum::<Demand>();

    let nodes = graph
        .required_nodes()
        .iter()
        .filter(|node| assignment.services_node(graph, node.id))
        .map(|node| node.demand)
        .sum::<Demand>();

    arcs + nodes
}
