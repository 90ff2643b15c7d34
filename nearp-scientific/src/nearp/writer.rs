use crate::common::write_text_solution;
use nearp_core::models::{NodeId, Solution};
use nearp_core::utils::GenericResult;
use std::io::{BufWriter, Write};

/// A trait to write NEARP or NEARP-TP solution.
pub trait NearpSolution<W: Write> {
    /// Writes solution in the benchmark text format.
    fn write_nearp(&self, writer: &mut BufWriter<W>) -> GenericResult<()>;
}

impl<W: Write> NearpSolution<W> for (&Solution, NodeId) {
    fn write_nearp(&self, writer: &mut BufWriter<W>) -> GenericResult<()> {
        write_text_solution(writer, self.0, self.1)
    }
}
