//! Contains format readers and writers.

use nearp_core::models::{Formulation, Instance, NodeId, Solution};
use nearp_core::utils::GenericResult;
use nearp_scientific::nearp::{NearpProblem, NearpSolution};
use nearp_scientific::nearptp::NearpTpProblem;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

/// A reader for instance.
pub struct InstanceReader(pub Box<dyn Fn(File) -> GenericResult<Instance>>);

/// A writer for solution.
#[allow(clippy::type_complexity)]
pub struct SolutionWriter(pub Box<dyn Fn(&Solution, NodeId, BufWriter<Box<dyn Write>>) -> GenericResult<()>>);

type FormatMap<'a> = HashMap<&'a str, (InstanceReader, SolutionWriter, Formulation)>;

/// Gets available formats: a reader, a writer and a formulation built by default.
pub fn get_formats<'a>() -> FormatMap<'a> {
    let mut formats = FormatMap::default();

    formats.insert(
        "nearp",
        (
            InstanceReader(Box::new(|file: File| BufReader::new(file).read_nearp())),
            create_text_writer(),
            Formulation::Nearp,
        ),
    );
    formats.insert(
        "nearptp",
        (
            InstanceReader(Box::new(|file: File| BufReader::new(file).read_nearp_tp())),
            create_text_writer(),
            Formulation::NearpTp,
        ),
    );

    formats
}

fn create_text_writer() -> SolutionWriter {
    SolutionWriter(Box::new(|solution, depot, mut writer| (solution, depot).write_nearp(&mut writer)))
}
