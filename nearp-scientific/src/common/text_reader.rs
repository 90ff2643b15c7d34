#[cfg(test)]
#[path = "../../tests/unit/common/text_reader_test.rs"]
mod text_reader_test;

use nearp_core::models::{Cost, FleetSize, Instance, Link, Node, NodeId, Turn};
use nearp_core::utils::{GenericError, GenericResult};
use std::io::prelude::*;
use std::io::{BufReader, Read};

/// Metadata from the `key: value` header of the instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct InstanceHeader {
    pub name: String,
    pub vehicles: Option<i64>,
    pub capacity: Option<Cost>,
    pub depot: Option<NodeId>,
    pub nodes: usize,
    pub edges: usize,
    pub arcs: usize,
    pub required_nodes: usize,
    pub required_edges: usize,
    pub required_arcs: usize,
    pub turns: usize,
}

impl InstanceHeader {
    /// Returns fleet size, `-1` vehicles stands for an unbounded fleet.
    pub fn fleet(&self) -> GenericResult<FleetSize> {
        match self.vehicles {
            Some(-1) => Ok(FleetSize::Unbounded),
            Some(vehicles) if vehicles >= 0 => Ok(FleetSize::Fixed(vehicles as usize)),
            Some(vehicles) => Err(format!("unexpected vehicle count: {vehicles}").into()),
            None => Err("missing #Vehicles in header".into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> GenericResult<()> {
        let count = || parse_int(value, key).and_then(|value| to_count(value, key));

        match key {
            "Name" => self.name = value.to_string(),
            "#Vehicles" => self.vehicles = Some(parse_int(value, key)?),
            "Capacity" => self.capacity = Some(parse_int(value, key)?),
            "Depot Node" | "Depot" => self.depot = Some(count()?),
            "#Nodes" => self.nodes = count()?,
            "#Edges" => self.edges = count()?,
            "#Arcs" => self.arcs = count()?,
            "#Required N" | "#Required-N" => self.required_nodes = count()?,
            "#Required E" | "#Required-E" => self.required_edges = count()?,
            "#Required A" | "#Required-A" => self.required_arcs = count()?,
            "#Nb-Turns" => self.turns = count()?,
            _ => {}
        }

        Ok(())
    }
}

/// Entities read from the tabular sections.
#[derive(Default)]
pub(crate) struct Definitions {
    pub nodes: Vec<Node>,
    pub edges: Vec<Link>,
    pub arcs: Vec<Link>,
    pub turns: Vec<Turn>,
}

pub(crate) trait TextReader {
    fn read_instance(&mut self) -> GenericResult<Instance> {
        let header = self.read_header()?;
        let definitions = self.read_definitions(&header)?;

        Instance {
            name: header.name.clone(),
            fleet: header.fleet()?,
            capacity: header.capacity.ok_or("missing Capacity in header")?,
            depot: header.depot.ok_or("missing depot node in header")?,
            nodes: definitions.nodes,
            edges: definitions.edges,
            arcs: definitions.arcs,
            turns: definitions.turns,
        }
        .validate()
    }

    fn read_header(&mut self) -> GenericResult<InstanceHeader>;

    fn read_definitions(&mut self, header: &InstanceHeader) -> GenericResult<Definitions>;
}

/// A single data row of a tabular section.
pub(crate) struct Record {
    line: String,
    tokens: Vec<String>,
}

impl Record {
    /// Returns node or link id, letters around digits are ignored: `N12` is `12`.
    pub fn id(&self, idx: usize, what: &str) -> GenericResult<usize> {
        let digits = self.token(idx, what)?.chars().filter(|c| c.is_ascii_digit()).collect::<String>();

        digits.parse::<usize>().map_err(|_| self.error(what))
    }

    pub fn int(&self, idx: usize, what: &str) -> GenericResult<i64> {
        self.token(idx, what)?.parse::<i64>().map_err(|_| self.error(what))
    }

    /// Returns `1`/`0` flag as boolean.
    pub fn flag(&self, idx: usize, what: &str) -> GenericResult<bool> {
        match self.token(idx, what)? {
            "1" => Ok(true),
            "0" => Ok(false),
            _ => Err(self.error(what)),
        }
    }

    /// Returns all tokens starting from the index joined by space.
    pub fn text_from(&self, idx: usize) -> String {
        self.tokens.iter().skip(idx).map(String::as_str).collect::<Vec<_>>().join(" ")
    }

    fn token(&self, idx: usize, what: &str) -> GenericResult<&str> {
        self.tokens.get(idx).map(String::as_str).ok_or_else(|| format!("missing {what} in line '{}'", self.line).into())
    }

    fn error(&self, what: &str) -> GenericError {
        format!("cannot parse {what} in line '{}'", self.line).into()
    }
}

pub(crate) fn read_line<R: Read>(reader: &mut BufReader<R>, buffer: &mut String) -> GenericResult<usize> {
    buffer.clear();
    reader.read_line(buffer).map_err(|err| err.to_string().into())
}

/// Reads `key: value` lines until a blank line or the end of the input.
pub(crate) fn read_header<R: Read>(reader: &mut BufReader<R>, buffer: &mut String) -> GenericResult<InstanceHeader> {
    let mut header = InstanceHeader::default();

    while read_line(reader, buffer)? > 0 {
        let line = buffer.trim();
        if line.is_empty() {
            break;
        }

        if let Some((key, value)) = line.split_once(':') {
            header.set(key.trim(), value.trim())?;
        }
    }

    Ok(header)
}

/// Reads the next data row, skipping blank lines and section titles.
///
/// A line is a title when its first token has no digits, for example `ReN.` or `----------EDGES----------`.
pub(crate) fn read_record<R: Read>(
    reader: &mut BufReader<R>,
    buffer: &mut String,
    section: &str,
) -> GenericResult<Record> {
    loop {
        if read_line(reader, buffer)? == 0 {
            return Err(format!("unexpected end of input in {section} section").into());
        }

        let line = buffer.trim();
        let is_data = line.split_whitespace().next().is_some_and(|token| token.chars().any(|c| c.is_ascii_digit()));

        if is_data {
            return Ok(Record {
                line: line.to_string(),
                tokens: line.split_whitespace().map(|token| token.to_string()).collect(),
            });
        }
    }
}

/// Reads exactly `count` data rows and maps each of them.
pub(crate) fn read_records<R: Read, T>(
    reader: &mut BufReader<R>,
    buffer: &mut String,
    section: &str,
    count: usize,
    map_fn: impl Fn(Record) -> GenericResult<T>,
) -> GenericResult<Vec<T>> {
    (0..count).map(|_| read_record(reader, buffer, section).and_then(&map_fn)).collect()
}

fn parse_int(value: &str, key: &str) -> GenericResult<i64> {
    value.parse::<i64>().map_err(|err| format!("cannot parse {key}: '{err}'").into())
}

fn to_count(value: i64, key: &str) -> GenericResult<usize> {
    usize::try_from(value).map_err(|_| format!("{key} cannot be negative, got {value}").into())
}
