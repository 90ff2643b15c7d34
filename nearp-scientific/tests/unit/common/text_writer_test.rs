use super::*;
use nearp_core::models::{Route, RouteSegment};

fn create_route(vehicle: usize, segments: Vec<RouteSegment>) -> Route {
    Route { vehicle, demand: 2, cost: 9, segments }
}

#[test]
fn can_write_used_routes_only() {
    let depot = || RouteSegment::Depot { service_id: 0, from: 1, to: 1 };
    let solution = Solution {
        objective: 9,
        routes: vec![
            create_route(0, vec![depot(), depot()]),
            create_route(
                1,
                vec![
                    depot(),
                    RouteSegment::Traversal { from: 1, to: 2 },
                    RouteSegment::Service { service_id: 2, from: 2, to: 3 },
                    RouteSegment::Service { service_id: 1, from: 3, to: 3 },
                    RouteSegment::Traversal { from: 3, to: 1 },
                    depot(),
                ],
            ),
        ],
        total_time_millis: 120,
        time_to_best_millis: 45,
        assignments: vec![],
    };
    let mut buffer = Vec::new();

    write_text_solution(&mut BufWriter::new(&mut buffer), &solution, 1).unwrap();

    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "9\n1\n120\n45\n 1 1 1 2 9 4 (D 0,1,1) (T 1,2) (S 2,2,3) (S 1,3,3) (T 3,1) (D 0,1,1)\n"
    );
}

#[test]
fn can_write_solution_without_used_routes() {
    let solution =
        Solution { objective: 0, routes: vec![], total_time_millis: 3, time_to_best_millis: 0, assignments: vec![] };
    let mut buffer = Vec::new();

    write_text_solution(&mut BufWriter::new(&mut buffer), &solution, 7).unwrap();

    assert_eq!(String::from_utf8(buffer).unwrap(), "0\n0\n3\n0\n");
}
