#[cfg(test)]
#[path = "../../tests/unit/nearptp/reader_test.rs"]
mod reader_test;

use crate::common::*;
use nearp_core::models::{Instance, Link, Node, Turn, TurnKind};
use nearp_core::utils::GenericResult;
use std::io::{BufReader, Read};

/// A trait to read NEARP-TP instance.
pub trait NearpTpProblem {
    /// Reads NEARP-TP instance.
    fn read_nearp_tp(self) -> GenericResult<Instance>;
}

impl<R: Read> NearpTpProblem for BufReader<R> {
    fn read_nearp_tp(self) -> GenericResult<Instance> {
        NearpTpReader { buffer: String::new(), reader: self }.read_instance()
    }
}

impl NearpTpProblem for String {
    fn read_nearp_tp(self) -> GenericResult<Instance> {
        NearpTpReader { buffer: String::new(), reader: BufReader::new(self.as_bytes()) }.read_instance()
    }
}

struct NearpTpReader<R: Read> {
    buffer: String,
    reader: BufReader<R>,
}

impl<R: Read> TextReader for NearpTpReader<R> {
    fn read_header(&mut self) -> GenericResult<InstanceHeader> {
        read_header(&mut self.reader, &mut self.buffer)
    }

    fn read_definitions(&mut self, header: &InstanceHeader) -> GenericResult<Definitions> {
        let mut nodes = read_records(&mut self.reader, &mut self.buffer, "NODES", header.nodes, |record| {
            let id = record.id(0, "node id")?;
            let service_cost = record.int(1, "service cost")?;

            Ok(if record.flag(2, "required flag")? { Node::required(id, service_cost) } else { Node::optional(id) })
        })?;
        nodes.sort_by_key(|node| node.id);

        let edges = self.read_links("EDGES", header.edges)?;
        let arcs = self.read_links("ARCS", header.arcs)?;

        let turns = read_records(&mut self.reader, &mut self.buffer, "TURNS", header.turns, |record| {
            Ok(Turn {
                from: record.id(0, "turn node i")?,
                via: record.id(1, "turn node j")?,
                to: record.id(2, "turn node l")?,
                cost: record.int(3, "turn cost")?,
                kind: record.text_from(4).parse::<TurnKind>()?,
            })
        })?;

        Ok(Definitions { nodes, edges, arcs, turns })
    }
}

impl<R: Read> NearpTpReader<R> {
    /// Reads `count` rows of `I J QTY IS-REQUIRED TR-COST` where the quantity is a service cost.
    fn read_links(&mut self, section: &str, count: usize) -> GenericResult<Vec<Link>> {
        read_records(&mut self.reader, &mut self.buffer, section, count, |record| {
            let (from, to) = (record.id(0, "node i")?, record.id(1, "node j")?);
            let traversal_cost = record.int(4, "traversal cost")?;

            Ok(if record.flag(3, "required flag")? {
                Link::required(from, to, traversal_cost, record.int(2, "service cost")?)
            } else {
                Link::optional(from, to, traversal_cost)
            })
        })
    }
}
