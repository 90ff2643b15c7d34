use super::*;
use crate::helpers::models::*;
use std::sync::{Arc, Mutex};

fn create_logger() -> (InfoLogger, Arc<Mutex<Vec<String>>>) {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = messages.clone();

    (Arc::new(move |message: &str| sink.lock().unwrap().push(message.to_string())), messages)
}

fn format_segments(route: &Route) -> String {
    route.segments.iter().map(|segment| segment.to_string()).collect::<Vec<_>>().join(" ")
}

#[test]
fn can_trace_single_arc_route() {
    let graph = create_test_graph(&create_single_arc_instance());
    let (logger, messages) = create_logger();

    let route = trace_route(&graph, &create_single_arc_assignment(), &logger);

    assert_eq!(format_segments(&route), "(D 0,1,1) (S 1,1,2) (T 2,1) (D 0,1,1)");
    assert_eq!((route.vehicle, route.demand, route.cost, route.visits()), (0, 1, 5, 3));
    assert!(messages.lock().unwrap().is_empty());
}

#[test]
fn can_trace_route_with_node_service() {
    let graph = create_test_graph(&create_triangle_instance());
    let assignment =
        create_assignment(0, vec![1., 0.], vec![1.], vec![1., 0., 0., 0., 1., 0.], vec![9., 0., 7., 0., 2., 0.], 9.);
    let (logger, _) = create_logger();

    let route = trace_route(&graph, &assignment, &logger);

    assert_eq!(format_segments(&route), "(D 0,1,1) (T 1,2) (S 2,2,3) (S 1,3,3) (T 3,1) (D 0,1,1)");
    assert_eq!((route.demand, route.cost, route.visits()), (2, 9, 4));
}

#[test]
fn can_trace_route_visiting_node_twice() {
    let instance = InstanceBuilder::default()
        .nodes(3)
        .arc(Link::optional(1, 2, 1))
        .arc(Link::required(2, 3, 1, 1))
        .arc(Link::optional(3, 2, 1))
        .arc(Link::optional(2, 1, 1))
        .build();
    let graph = create_test_graph(&instance);
    let assignment = create_assignment(0, vec![1.], vec![], vec![1., 0., 1., 1.], vec![4., 3., 2., 1.], 4.);
    let (logger, _) = create_logger();

    let route = trace_route(&graph, &assignment, &logger);

    assert_eq!(format_segments(&route), "(D 0,1,1) (T 1,2) (S 1,2,3) (T 3,2) (T 2,1) (D 0,1,1)");
}

#[test]
fn can_service_arc_once_when_it_is_also_deadheaded() {
    let graph = create_test_graph(&create_single_arc_instance());
    let assignment = create_assignment(0, vec![1.], vec![], vec![1., 2.], vec![7., 0.], 6.);
    let (logger, _) = create_logger();

    let route = trace_route(&graph, &assignment, &logger);

    let services = route.segments.iter().filter(|segment| matches!(segment, RouteSegment::Service { .. })).count();
    let traversals = route.segments.iter().filter(|segment| matches!(segment, RouteSegment::Traversal { .. })).count();
    assert_eq!((services, traversals), (1, 3));
    assert_eq!(route.segments.first(), route.segments.last());
}

#[test]
fn can_trace_idle_vehicle() {
    let graph = create_test_graph(&create_triangle_instance());
    let assignment = create_assignment(1, vec![0., 0.], vec![0.], vec![0.; 6], vec![0.; 6], 0.);
    let (logger, _) = create_logger();

    let route = trace_route(&graph, &assignment, &logger);

    assert!(route.is_idle());
    assert_eq!(format_segments(&route), "(D 0,1,1) (D 0,1,1)");
    assert_eq!((route.vehicle, route.demand, route.cost), (1, 0, 0));
}

#[test]
fn can_report_uses_unreachable_from_depot() {
    let graph = create_test_graph(&create_triangle_instance());
    let assignment = create_assignment(0, vec![0., 0.], vec![0.], vec![0., 0., 1., 1., 0., 0.], vec![0.; 6], 6.);
    let (logger, messages) = create_logger();

    let route = trace_route(&graph, &assignment, &logger);

    assert!(route.is_idle());
    assert_eq!(messages.lock().unwrap().clone(), vec!["vehicle 0: 2 arc use(s) are not reachable from the depot"]);
}
