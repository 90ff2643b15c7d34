//! Contains instance statistics.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/solve/summary_test.rs"]
mod summary_test;

use nearp_core::models::{FleetSize, Instance, Link};
use std::collections::BTreeMap;

/// Returns instance statistics: entity counts and turns per classification, one line each.
pub fn get_instance_summary(instance: &Instance) -> Vec<String> {
    let count_required = |links: &[Link]| links.iter().filter(|link| link.is_required).count();
    let fleet = match instance.fleet {
        FleetSize::Fixed(size) => size.to_string(),
        FleetSize::Unbounded => "unbounded".to_string(),
    };

    let required_nodes = instance.nodes.iter().filter(|node| node.is_required).count();

    let mut lines = vec![
        format!("instance '{}': depot {}, capacity {}", instance.name, instance.depot, instance.capacity),
        format!("fleet: {fleet}"),
        format!("nodes: {} ({required_nodes} required)", instance.nodes.len()),
        format!("edges: {} ({} required)", instance.edges.len(), count_required(&instance.edges)),
        format!("arcs: {} ({} required)", instance.arcs.len(), count_required(&instance.arcs)),
        format!("turns: {}", instance.turns.len()),
    ];

    let kinds = instance.turns.iter().fold(BTreeMap::<String, usize>::new(), |mut acc, turn| {
        *acc.entry(turn.kind.to_string()).or_default() += 1;
        acc
    });
    lines.extend(kinds.into_iter().map(|(kind, count)| format!("  {kind}: {count}")));

    lines
}
