#[cfg(test)]
#[path = "../../tests/unit/commands/solve_test.rs"]
mod solve_test;

use super::*;

use clap::{Arg, ArgAction, Command};
use nearp_cli::extensions::solve::config::{CommandLineSettings, create_settings, read_config};
use nearp_cli::extensions::solve::formats::get_formats;
use nearp_cli::extensions::solve::summary::get_instance_summary;
use nearp_core::prelude::*;
use nearp_scientific::common::write_variable_dump;
use std::io::BufReader;
use std::sync::Arc;

const FORMAT_ARG_NAME: &str = "FORMAT";
const PROBLEM_ARG_NAME: &str = "PROBLEM";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const TIME_ARG_NAME: &str = "max-time";
const CONFIG_ARG_NAME: &str = "config";
const VEHICLES_ARG_NAME: &str = "vehicles";
const LOG_ARG_NAME: &str = "log";
const CHECK_ARG_NAME: &str = "check";
const EXPORT_MODEL_ARG_NAME: &str = "export-model";
const DUMP_VARIABLES_ARG_NAME: &str = "dump-variables";

pub fn get_solve_app() -> Command {
    Command::new("solve")
        .about("Solves node, edge and arc routing problems with an exact formulation")
        .arg(
            Arg::new(FORMAT_ARG_NAME)
                .help("Specifies the instance format")
                .required(true)
                .value_parser(["nearp", "nearptp"])
                .index(1),
        )
        .arg(Arg::new(PROBLEM_ARG_NAME).help("Sets the instance file to use").required(true).index(2))
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for result output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(TIME_ARG_NAME)
                .help("Specifies overall time budget in seconds")
                .short('t')
                .long(TIME_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to the configuration file")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(VEHICLES_ARG_NAME)
                .help("Overrides amount of vehicles defined in the instance")
                .long(VEHICLES_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(LOG_ARG_NAME)
                .help("Specifies whether default logging is enabled")
                .long(LOG_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(CHECK_ARG_NAME)
                .help("Specifies whether final solution should be checked for feasibility")
                .long(CHECK_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(EXPORT_MODEL_ARG_NAME)
                .help("Specifies path to file for the model in LP format")
                .long(EXPORT_MODEL_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(DUMP_VARIABLES_ARG_NAME)
                .help("Specifies path to file for non-zero variable values")
                .long(DUMP_VARIABLES_ARG_NAME)
                .required(false),
        )
}

pub fn run_solve(
    matches: &ArgMatches,
    timer: Timer,
    out_writer_func: fn(Option<File>) -> BufWriter<Box<dyn Write>>,
) -> GenericResult<()> {
    let format = matches.get_one::<String>(FORMAT_ARG_NAME).ok_or("missing instance format")?;
    let problem_path = matches.get_one::<String>(PROBLEM_ARG_NAME).ok_or("missing instance path")?;

    let formats = get_formats();
    let (instance_reader, solution_writer, formulation) =
        formats.get(format.as_str()).ok_or_else(|| format!("unknown format: '{format}'"))?;

    let config = matches
        .get_one::<String>(CONFIG_ARG_NAME)
        .map(|path| open_file(path, "config").and_then(|file| read_config(BufReader::new(file))))
        .transpose()?;

    let args = CommandLineSettings {
        vehicles: parse_int_value(matches, VEHICLES_ARG_NAME, "amount of vehicles")?,
        max_time: parse_int_value(matches, TIME_ARG_NAME, "max time")?,
        is_logging: matches.get_flag(LOG_ARG_NAME),
    };
    let settings = create_settings(*formulation, config.as_ref(), &args)?;

    let logger: InfoLogger =
        if settings.is_logging { Arc::new(|msg: &str| println!("{msg}")) } else { Arc::new(|_: &str| {}) };

    let mut instance = open_file(problem_path, "problem")
        .and_then(|file| (instance_reader.0)(file))
        .map_err(|err| err.context(&format!("cannot read {format} instance")))?;

    if let Some(vehicles) = settings.vehicles {
        instance.fleet = FleetSize::Fixed(vehicles);
    }

    get_instance_summary(&instance).iter().for_each(|line| (logger)(line.as_str()));
    (logger)(&format!(
        "solving {} formulation, time budget {}s, {:?} node files",
        settings.formulation,
        settings.time_budget.as_secs(),
        settings.node_file
    ));

    let environment = Environment { logger: logger.clone(), timer, time_budget: settings.time_budget };
    let mut solver = Solver::new(&instance, settings.formulation, MicrolpEngine::new(logger.clone()), environment)?;

    if let Some(path) = matches.get_one::<String>(EXPORT_MODEL_ARG_NAME) {
        let mut writer = BufWriter::new(create_file(path, "model")?);
        solver.export_model(&mut writer)?;
        writer.flush()?;
    }

    let solution = match solver.solve(settings.node_file)? {
        Outcome::Solved(solution) => solution,
        Outcome::Unsolved(status) => return Err(format!("no solution found, status: '{status}'").into()),
    };

    let out_file =
        matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result")).transpose()?;
    (solution_writer.0)(&solution, instance.depot, out_writer_func(out_file))?;

    if let Some(path) = matches.get_one::<String>(DUMP_VARIABLES_ARG_NAME) {
        write_variable_dump(&mut BufWriter::new(create_file(path, "variables")?), solver.graph(), &solution)?;
    }

    if matches.get_flag(CHECK_ARG_NAME) {
        SolutionChecker::new(solver.graph(), &solution).check().map_err(|errs| {
            format!("checker found {} errors:\n{}", errs.len(), GenericError::join_many(&errs, "\n"))
        })?;
        (logger)("solution is valid");
    }

    Ok(())
}
