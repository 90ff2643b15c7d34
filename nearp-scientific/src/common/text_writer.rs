#[cfg(test)]
#[path = "../../tests/unit/common/text_writer_test.rs"]
mod text_writer_test;

use nearp_core::models::{NodeId, Solution};
use nearp_core::utils::GenericResult;
use std::io::{BufWriter, Write};

/// Writes solution in the benchmark text format: objective, amount of used vehicles, total and
/// time-to-best milliseconds, then one line per used route.
pub fn write_text_solution<W: Write>(
    writer: &mut BufWriter<W>,
    solution: &Solution,
    depot: NodeId,
) -> GenericResult<()> {
    writeln!(writer, "{}", solution.objective)?;
    writeln!(writer, "{}", solution.vehicles_used())?;
    writeln!(writer, "{}", solution.total_time_millis)?;
    writeln!(writer, "{}", solution.time_to_best_millis)?;

    solution.used_routes().zip(1..).try_for_each(|(route, idx)| {
        let segments = route.segments.iter().map(|segment| segment.to_string()).collect::<Vec<_>>().join(" ");

        writeln!(writer, " {depot} 1 {idx} {} {} {} {segments}", route.demand, route.cost, route.visits())
    })?;

    writer.flush()?;

    Ok(())
}
