#[cfg(test)]
#[path = "../../tests/unit/nearp/reader_test.rs"]
mod reader_test;

use crate::common::*;
use nearp_core::models::{Instance, Link, Node};
use nearp_core::utils::GenericResult;
use std::io::{BufReader, Read};

/// A trait to read NEARP instance.
pub trait NearpProblem {
    /// Reads NEARP instance.
    fn read_nearp(self) -> GenericResult<Instance>;
}

impl<R: Read> NearpProblem for BufReader<R> {
    fn read_nearp(self) -> GenericResult<Instance> {
        NearpReader { buffer: String::new(), reader: self }.read_instance()
    }
}

impl NearpProblem for String {
    fn read_nearp(self) -> GenericResult<Instance> {
        NearpReader { buffer: String::new(), reader: BufReader::new(self.as_bytes()) }.read_instance()
    }
}

struct NearpReader<R: Read> {
    buffer: String,
    reader: BufReader<R>,
}

impl<R: Read> TextReader for NearpReader<R> {
    fn read_header(&mut self) -> GenericResult<InstanceHeader> {
        read_header(&mut self.reader, &mut self.buffer)
    }

    fn read_definitions(&mut self, header: &InstanceHeader) -> GenericResult<Definitions> {
        let nodes = self.read_nodes(header)?;

        let optional_edges = optional_count(header.edges, header.required_edges, "edges")?;
        let optional_arcs = optional_count(header.arcs, header.required_arcs, "arcs")?;

        let required_edges = self.read_links("ReE.", header.required_edges, true)?;
        let optional_edges = self.read_links("EDGE", optional_edges, false)?;

        let required_arcs = self.read_links("ReA.", header.required_arcs, true)?;
        let optional_arcs = self.read_links("ARC", optional_arcs, false)?;

        Ok(Definitions {
            nodes,
            edges: required_edges.into_iter().chain(optional_edges).collect(),
            arcs: required_arcs.into_iter().chain(optional_arcs).collect(),
            turns: vec![],
        })
    }
}

impl<R: Read> NearpReader<R> {
    /// Reads required nodes and adds all others as optional ones.
    fn read_nodes(&mut self, header: &InstanceHeader) -> GenericResult<Vec<Node>> {
        let mut nodes = (1..=header.nodes).map(Node::optional).collect::<Vec<_>>();

        let required = read_records(&mut self.reader, &mut self.buffer, "ReN.", header.required_nodes, |record| {
            Ok(Node::required(record.id(0, "node id")?, record.int(2, "service cost")?))
        })?;

        for node in required {
            match nodes.get_mut(node.id.wrapping_sub(1)) {
                Some(slot) => *slot = node,
                None => return Err(format!("required node {} is not in 1..={}", node.id, header.nodes).into()),
            }
        }

        Ok(nodes)
    }

    /// Reads `count` links of the section, demand columns are ignored as every demand is unit.
    fn read_links(&mut self, section: &str, count: usize, is_required: bool) -> GenericResult<Vec<Link>> {
        read_records(&mut self.reader, &mut self.buffer, section, count, |record| {
            let (from, to) = (record.id(1, "from node")?, record.id(2, "to node")?);
            let traversal_cost = record.int(3, "traversal cost")?;

            Ok(if is_required {
                Link::required(from, to, traversal_cost, record.int(5, "service cost")?)
            } else {
                Link::optional(from, to, traversal_cost)
            })
        })
    }
}

fn optional_count(total: usize, required: usize, what: &str) -> GenericResult<usize> {
    total.checked_sub(required).ok_or_else(|| format!("more required {what} than {what}: {required} > {total}").into())
}
