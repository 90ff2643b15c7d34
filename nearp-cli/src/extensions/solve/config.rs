//! Solver configuration.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/solve/config_test.rs"]
mod config_test;

use nearp_core::mip::NodeFileStrategy;
use nearp_core::models::Formulation;
use nearp_core::utils::{DEFAULT_TIME_BUDGET, GenericResult};
use serde::Deserialize;
use std::io::{BufReader, Read};
use std::time::Duration;

/// A solver configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Specifies formulation, overrides the one implied by the instance format.
    pub formulation: Option<String>,
    /// Specifies fleet configuration.
    pub fleet: Option<FleetConfig>,
    /// Specifies termination configuration.
    pub termination: Option<TerminationConfig>,
    /// Specifies engine configuration.
    pub engine: Option<EngineConfig>,
    /// Specifies telemetry configuration.
    pub telemetry: Option<TelemetryConfig>,
}

/// A fleet configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetConfig {
    /// Amount of vehicles, replaces the one from the instance.
    pub vehicles: Option<usize>,
}

/// A termination configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminationConfig {
    /// Overall time budget in seconds.
    pub max_time: Option<u64>,
}

/// An engine configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Specifies where search tree nodes are kept.
    pub node_file: Option<NodeFileType>,
}

/// A node file type.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum NodeFileType {
    /// Keep nodes in memory.
    InMemory,
    /// Write nodes to disk.
    Disk,
    /// Write compressed nodes to disk.
    DiskCompressed,
}

impl From<NodeFileType> for NodeFileStrategy {
    fn from(value: NodeFileType) -> Self {
        match value {
            NodeFileType::InMemory => NodeFileStrategy::InMemory,
            NodeFileType::Disk => NodeFileStrategy::Disk,
            NodeFileType::DiskCompressed => NodeFileStrategy::DiskCompressed,
        }
    }
}

/// A telemetry configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryConfig {
    /// Specifies logging configuration.
    pub logging: Option<LoggingConfig>,
}

/// A logging configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Enables progress logging.
    pub enabled: bool,
}

/// Values passed on the command line, `None` when the argument is omitted.
#[derive(Clone, Debug, Default)]
pub struct CommandLineSettings {
    /// Amount of vehicles.
    pub vehicles: Option<usize>,
    /// Overall time budget in seconds.
    pub max_time: Option<u64>,
    /// True if `--log` is given.
    pub is_logging: bool,
}

/// Settings of a single run.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveSettings {
    /// Formulation to build.
    pub formulation: Formulation,
    /// Amount of vehicles which replaces the one from the instance.
    pub vehicles: Option<usize>,
    /// Overall wall-clock budget.
    pub time_budget: Duration,
    /// Node file handling.
    pub node_file: NodeFileStrategy,
    /// True if progress is logged.
    pub is_logging: bool,
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> GenericResult<Config> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'").into())
}

/// Merges settings of the run: a value given on the command line is used first, then a value from
/// the config, then the default.
pub fn create_settings(
    formulation: Formulation,
    config: Option<&Config>,
    args: &CommandLineSettings,
) -> GenericResult<SolveSettings> {
    let formulation = match config.and_then(|config| config.formulation.as_ref()) {
        Some(formulation) => formulation.parse::<Formulation>()?,
        None => formulation,
    };

    let vehicles =
        args.vehicles.or_else(|| config.and_then(|config| config.fleet.as_ref()).and_then(|fleet| fleet.vehicles));

    let time_budget = args
        .max_time
        .or_else(|| config.and_then(|config| config.termination.as_ref()).and_then(|term| term.max_time))
        .map_or(DEFAULT_TIME_BUDGET, Duration::from_secs);

    let node_file = config
        .and_then(|config| config.engine.as_ref())
        .and_then(|engine| engine.node_file)
        .map(NodeFileStrategy::from)
        .unwrap_or_default();

    let is_logging = args.is_logging
        || config
            .and_then(|config| config.telemetry.as_ref())
            .and_then(|telemetry| telemetry.logging.as_ref())
            .is_some_and(|logging| logging.enabled);

    Ok(SolveSettings { formulation, vehicles, time_budget, node_file, is_logging })
}
