#[cfg(test)]
#[path = "../../tests/unit/common/variable_writer_test.rs"]
mod variable_writer_test;

use nearp_core::models::{FormulationGraph, Solution, VALUE_THRESHOLD, VehicleAssignment};
use nearp_core::utils::{Float, GenericResult};
use std::io::{BufWriter, Write};

/// Writes solved values of all variables which are set, grouped by family.
///
/// Every line has the form `name = value - cost`. Time flows are annotated with the kind of arc use
/// instead of a cost.
pub fn write_variable_dump<W: Write>(
    writer: &mut BufWriter<W>,
    graph: &FormulationGraph,
    solution: &Solution,
) -> GenericResult<()> {
    let assignments = &solution.assignments;

    writeln!(writer, "# x: arc services")?;
    for assignment in assignments {
        let k = assignment.vehicle;
        for (&arc_id, &value) in graph.required_arcs().iter().zip(assignment.arc_services.iter()) {
            let arc = graph.arc(arc_id);
            write_value(writer, &format!("x({k},{},{})", arc.from, arc.to), value, &arc.service_cost.to_string())?;
        }
    }

    writeln!(writer, "\n# z: node services")?;
    for assignment in assignments {
        let k = assignment.vehicle;
        for (node, &value) in graph.required_nodes().iter().zip(assignment.node_services.iter()) {
            write_value(writer, &format!("z({k},{})", node.id), value, &node.service_cost.to_string())?;
        }
    }

    writeln!(writer, "\n# y: deadheads")?;
    for assignment in assignments {
        let k = assignment.vehicle;
        for (arc, &value) in graph.arcs().iter().zip(assignment.deadheads.iter()) {
            write_value(writer, &format!("y({k},{},{})", arc.from, arc.to), value, &arc.traversal_cost.to_string())?;
        }
    }

    writeln!(writer, "\n# f: time flows")?;
    for assignment in assignments {
        write_flows(writer, graph, assignment)?;
    }

    if assignments.iter().any(|assignment| !assignment.turns.is_empty()) {
        writeln!(writer, "\n# w: turns")?;
        for assignment in assignments {
            let k = assignment.vehicle;
            for (turn, &value) in graph.turns().iter().zip(assignment.turns.iter()) {
                let name = format!("w({k},{},{},{})", turn.from, turn.via, turn.to);
                write_value(writer, &name, value, &turn.cost.to_string())?;
            }
        }
    }

    writer.flush()?;

    Ok(())
}

fn write_flows<W: Write>(
    writer: &mut BufWriter<W>,
    graph: &FormulationGraph,
    assignment: &VehicleAssignment,
) -> GenericResult<()> {
    let k = assignment.vehicle;

    for (arc_id, arc) in graph.arcs().iter().enumerate() {
        let name = format!("f({k},{},{})", arc.from, arc.to);
        let flow = assignment.flows[arc_id];

        if assignment.services_arc(graph, arc_id) {
            writeln!(writer, "{name} = {flow:.6} - service")?;
        }

        if assignment.deadhead_count(arc_id) > 0 {
            writeln!(writer, "{name} = {flow:.6} - deadhead")?;
        }
    }

    Ok(())
}

fn write_value<W: Write>(writer: &mut BufWriter<W>, name: &str, value: Float, cost: &str) -> GenericResult<()> {
    if value.abs() > VALUE_THRESHOLD {
        writeln!(writer, "{name} = {value:.6} - {cost}")?;
    }

    Ok(())
}
