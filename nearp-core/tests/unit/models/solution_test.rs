use super::*;
use crate::helpers::models::*;

fn depot() -> RouteSegment {
    RouteSegment::Depot { service_id: 0, from: 1, to: 1 }
}

#[test]
fn can_format_route_segments() {
    let segments =
        [depot(), RouteSegment::Service { service_id: 3, from: 1, to: 2 }, RouteSegment::Traversal { from: 2, to: 1 }];

    let formatted = segments.iter().map(|segment| segment.to_string()).collect::<Vec<_>>();

    assert_eq!(formatted, vec!["(D 0,1,1)", "(S 3,1,2)", "(T 2,1)"]);
}

#[test]
fn can_count_visits_and_detect_idle_routes() {
    let idle = Route { vehicle: 1, demand: 0, cost: 0, segments: vec![depot(), depot()] };
    let used = Route {
        vehicle: 0,
        demand: 1,
        cost: 5,
        segments: vec![
            depot(),
            RouteSegment::Service { service_id: 1, from: 1, to: 2 },
            RouteSegment::Traversal { from: 2, to: 1 },
            depot(),
        ],
    };

    assert!(idle.is_idle());
    assert_eq!(idle.visits(), 2);
    assert!(!used.is_idle());
    assert_eq!(used.visits(), 3);

    let solution = Solution {
        objective: 5,
        routes: vec![used, idle],
        total_time_millis: 10,
        time_to_best_millis: 5,
        assignments: vec![],
    };
    assert_eq!(solution.vehicles_used(), 1);
    assert_eq!(solution.used_routes().map(|route| route.vehicle).collect::<Vec<_>>(), vec![0]);
}

#[test]
fn can_read_assignment_values_with_threshold() {
    let graph = create_test_graph(&create_triangle_instance());
    let assignment = create_assignment(0, vec![0.6, 0.4], vec![0.51], vec![1.9, 0., 0., 0., 0.2, 0.], vec![0.; 6], 9.);
    let arc = |from, to| graph.find_arc(from, to).expect("no arc");

    assert!(assignment.services_arc(&graph, arc(2, 3)));
    assert!(!assignment.services_arc(&graph, arc(3, 2)));
    assert!(!assignment.services_arc(&graph, arc(1, 2)));
    assert!(assignment.services_node(&graph, 3));
    assert!(!assignment.services_node(&graph, 2));
    assert_eq!(assignment.deadhead_count(arc(1, 2)), 2);
    assert_eq!(assignment.deadhead_count(arc(3, 1)), 0);
    assert_eq!(assignment.arc_uses(&graph, arc(2, 3)), 1);
    assert_eq!(assignment.turn_count(0), 0);
}
