use crate::helpers::*;
use crate::nearp::NearpProblem;
use nearp_core::models::{FleetSize, Link, Node};

#[test]
fn can_read_nearp_built_from_builder() {
    let instance = NearpBuilder::default()
        .set_vehicles(2)
        .set_capacity(50)
        .set_nodes(3)
        .add_required_node((3, 1, 4))
        .add_required_edge((1, 2, 3, 1, 2))
        .add_optional_edge((2, 3, 1))
        .add_required_arc((3, 1, 2, 1, 6))
        .add_optional_arc((1, 3, 9))
        .build()
        .read_nearp()
        .unwrap();

    assert_eq!(instance.name, "my-instance");
    assert_eq!(instance.fleet, FleetSize::Fixed(2));
    assert_eq!(instance.capacity, 50);
    assert_eq!(instance.depot, 1);
    assert_eq!(instance.nodes, vec![Node::optional(1), Node::optional(2), Node::required(3, 4)]);
    assert_eq!(instance.edges, vec![Link::required(1, 2, 3, 2), Link::optional(2, 3, 1)]);
    assert_eq!(instance.arcs, vec![Link::required(3, 1, 2, 6), Link::optional(1, 3, 9)]);
    assert!(instance.turns.is_empty());
}

#[test]
fn can_force_unit_demand() {
    let instance = NearpBuilder::default()
        .set_nodes(2)
        .add_required_node((2, 7, 1))
        .add_required_edge((1, 2, 1, 5, 1))
        .build()
        .read_nearp()
        .unwrap();

    assert_eq!(instance.nodes[1].demand, 1);
    assert_eq!(instance.edges[0].demand, 1);
}

#[test]
fn can_read_unbounded_fleet() {
    let instance = NearpBuilder::default()
        .set_vehicles(-1)
        .set_nodes(2)
        .add_required_edge((1, 2, 1, 1, 1))
        .build()
        .read_nearp()
        .unwrap();

    assert_eq!(instance.fleet, FleetSize::Unbounded);
}

#[test]
fn can_read_nearp_format_from_test_file() {
    let instance = create_tiny_nearp_instance();

    assert_eq!(instance.name, "tiny");
    assert_eq!(instance.fleet, FleetSize::Fixed(2));
    assert_eq!(instance.nodes.len(), 4);
    assert_eq!(instance.required_nodes().map(|node| node.id).collect::<Vec<_>>(), vec![3]);
    assert_eq!(instance.edges.len(), 3);
    assert_eq!(instance.arcs, vec![Link::required(4, 1, 4, 5), Link::optional(1, 4, 6)]);
    assert_eq!(instance.total_service_cost(), 9);
}

parameterized_test! {can_reject_invalid_instance, (content_fn, expected), {
    can_reject_invalid_instance_impl(content_fn, expected);
}}

can_reject_invalid_instance! {
    case01_unknown_required_node: (
        || NearpBuilder::default().set_nodes(2).add_required_node((5, 1, 1)).build(),
        "required node 5 is not in 1..=2"
    ),
    case02_unknown_link_node: (
        || NearpBuilder::default().set_nodes(2).add_optional_edge((1, 3, 1)).build(),
        "link (1,3) refers to unknown node"
    ),
    case03_truncated: (
        || NearpBuilder::default().set_nodes(2).add_optional_arc((1, 2, 1)).build().replace("NrA1\t1\t2\t1\n", ""),
        "unexpected end of input in ARC section"
    ),
    case04_bad_cost: (
        || NearpBuilder::default().set_nodes(2).add_optional_arc((1, 2, 1)).build().replace("2\t1\n", "2\tx\n"),
        "cannot parse traversal cost in line 'NrA1\t1\t2\tx'"
    ),
}

fn can_reject_invalid_instance_impl(content_fn: fn() -> String, expected: &str) {
    let result = content_fn().read_nearp();

    assert_eq!(result.map(|_| ()), Err(expected.into()));
}
