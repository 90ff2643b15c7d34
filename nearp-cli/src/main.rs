//! A command line interface to the NEARP formulation solver.
//!

mod commands;

use nearp_core::utils::Timer;

mod cli {
    use super::commands::create_write_buffer;
    use super::commands::solve::{get_solve_app, run_solve};
    use clap::{ArgMatches, Command};
    use nearp_core::utils::Timer;
    use std::process;

    pub fn get_app() -> Command {
        Command::new("NEARP formulation solver")
            .version(env!("CARGO_PKG_VERSION"))
            .about("A command line interface to the exact formulation of node, edge and arc routing problems")
            .subcommand(get_solve_app())
    }

    pub fn run_subcommand(arg_matches: ArgMatches, timer: Timer) {
        if let Err(err) = match arg_matches.subcommand() {
            Some(("solve", solve_matches)) => run_solve(solve_matches, timer, create_write_buffer),
            _ => Err("no subcommand was used. Use -h to print help information.".into()),
        } {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn main() {
    let timer = Timer::start();

    cli::run_subcommand(cli::get_app().get_matches(), timer);
}
