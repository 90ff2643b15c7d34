use super::*;
use crate::helpers::models::*;
use crate::mip::MicrolpEngine;
use crate::models::{FleetSize, Link};
use std::time::Duration;

fn create_turn_penalty_instance() -> Instance {
    InstanceBuilder::default()
        .nodes(2)
        .edge(Link::required(1, 2, 1, 1))
        .turn(1, 2, 1, 5)
        .turn(2, 1, 2, 0)
        .build()
}

fn solve(instance: &Instance, formulation: Formulation, environment: Environment) -> Outcome {
    let mut solver = Solver::new(instance, formulation, MicrolpEngine::default(), environment).unwrap();

    solver.solve(NodeFileStrategy::InMemory).unwrap()
}

fn solve_and_check(instance: &Instance, formulation: Formulation) -> Solution {
    let mut solver = Solver::new(instance, formulation, MicrolpEngine::default(), Environment::default()).unwrap();

    let solution = match solver.solve(NodeFileStrategy::InMemory).unwrap() {
        Outcome::Solved(solution) => solution,
        Outcome::Unsolved(status) => unreachable!("unexpected status: {status}"),
    };

    let result = SolutionChecker::new(solver.graph(), &solution).check();
    assert_eq!(result, Ok(()));

    solution
}

parameterized_test! {can_solve_small_instances, (instance, formulation, expected_objective, expected_used), {
    can_solve_small_instances_impl(instance, formulation, expected_objective, expected_used);
}}

can_solve_small_instances! {
    case01_single_arc: (create_single_arc_instance(), Formulation::Nearp, 5, 1),
    case02_triangle: (create_triangle_instance(), Formulation::Nearp, 9, 1),
    case03_turn_penalties: (create_turn_penalty_instance(), Formulation::NearpTp, 7, 1),
    case04_turn_penalties_ignored: (create_turn_penalty_instance(), Formulation::Nearp, 2, 1),
}

fn can_solve_small_instances_impl(
    instance: Instance,
    formulation: Formulation,
    expected_objective: i64,
    expected_used: usize,
) {
    let solution = solve_and_check(&instance, formulation);

    assert_eq!(solution.objective, expected_objective);
    assert_eq!(solution.vehicles_used(), expected_used);
    assert!(solution.time_to_best_millis <= solution.total_time_millis);
}

#[test]
fn can_solve_single_arc_instance_with_expected_route() {
    let solution = solve_and_check(&create_single_arc_instance(), Formulation::Nearp);

    let route = &solution.routes[0];
    assert_eq!(
        route.segments.iter().map(|segment| segment.to_string()).collect::<Vec<_>>().join(" "),
        "(D 0,1,1) (S 1,1,2) (T 2,1) (D 0,1,1)"
    );
    assert_eq!(route.demand, 1);
    assert_eq!(route.cost, 5);
    assert!((solution.assignments[0].arc_services[0] - 1.).abs() < 1e-6);
}

#[test]
fn can_reject_empty_fleet_with_requirements() {
    let instance = InstanceBuilder::default()
        .nodes(2)
        .arc(Link::required(1, 2, 1, 5))
        .arc(Link::optional(2, 1, 0))
        .fleet(FleetSize::Unbounded)
        .capacity(10)
        .build();

    let result = Solver::new(&instance, Formulation::Nearp, MicrolpEngine::default(), Environment::default());

    assert!(result.is_err());
}

#[test]
fn can_report_infeasible_instance() {
    let instance = InstanceBuilder::default()
        .nodes(2)
        .arc(Link::required(1, 2, 1, 5))
        .arc(Link::optional(2, 1, 0))
        .capacity(4)
        .build();

    let outcome = solve(&instance, Formulation::Nearp, Environment::default());

    assert!(matches!(outcome, Outcome::Unsolved(SolveStatus::Infeasible)));
}

#[test]
fn can_report_time_out_with_spent_budget() {
    let environment = Environment::new(std::sync::Arc::new(|_| ()), Duration::ZERO);

    let outcome = solve(&create_single_arc_instance(), Formulation::Nearp, environment);

    assert!(matches!(outcome, Outcome::Unsolved(SolveStatus::TimedOut)));
}

#[test]
fn can_export_posted_model() {
    let solver = Solver::new(
        &create_single_arc_instance(),
        Formulation::Nearp,
        MicrolpEngine::default(),
        Environment::default(),
    )
    .unwrap();
    let mut buffer = Vec::new();

    solver.export_model(&mut buffer).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("\\ 5 variables"));
    assert!(text.contains("Subject To"));
    assert!(text.contains(" assign_arc_1_2: 1 x(0,1,2) = 1"));
    assert!(text.trim_end().ends_with("End"));
    assert_eq!(solver.model().statistics.total_variables(), 5);
}
