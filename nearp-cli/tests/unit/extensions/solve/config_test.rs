use super::*;
use std::fs::File;

const FULL_CONFIG_PATH: &str = "../data/config/config.full.json";

fn read_full_config() -> Config {
    let file = File::open(FULL_CONFIG_PATH).expect("cannot read config from file");

    read_config(BufReader::new(file)).unwrap()
}

#[test]
fn can_read_full_config() {
    let config = read_full_config();

    assert_eq!(config.formulation.as_deref(), Some("nearp"));
    assert_eq!(config.fleet.expect("no fleet config").vehicles, Some(3));
    assert_eq!(config.termination.expect("no termination config").max_time, Some(120));
    assert_eq!(config.engine.expect("no engine config").node_file, Some(NodeFileType::InMemory));
    assert!(config.telemetry.and_then(|telemetry| telemetry.logging).expect("no logging config").enabled);
}

#[test]
fn can_reject_malformed_config() {
    let result = read_config(BufReader::new("{ \"termination\": 1 }".as_bytes()));

    assert!(result.unwrap_err().to_string().starts_with("cannot deserialize config"));
}

#[test]
fn can_use_defaults_without_config() {
    let settings = create_settings(Formulation::NearpTp, None, &CommandLineSettings::default()).unwrap();

    assert_eq!(
        settings,
        SolveSettings {
            formulation: Formulation::NearpTp,
            vehicles: None,
            time_budget: DEFAULT_TIME_BUDGET,
            node_file: NodeFileStrategy::DiskCompressed,
            is_logging: false,
        }
    );
}

#[test]
fn can_use_config_values_when_arguments_are_omitted() {
    let config = read_full_config();

    let settings = create_settings(Formulation::NearpTp, Some(&config), &CommandLineSettings::default()).unwrap();

    assert_eq!(settings.formulation, Formulation::Nearp);
    assert_eq!(settings.vehicles, Some(3));
    assert_eq!(settings.time_budget, Duration::from_secs(120));
    assert_eq!(settings.node_file, NodeFileStrategy::InMemory);
    assert!(settings.is_logging);
}

#[test]
fn can_prefer_command_line_values() {
    let config = read_full_config();
    let args = CommandLineSettings { vehicles: Some(1), max_time: Some(5), is_logging: false };

    let settings = create_settings(Formulation::NearpTp, Some(&config), &args).unwrap();

    assert_eq!(settings.vehicles, Some(1));
    assert_eq!(settings.time_budget, Duration::from_secs(5));
    assert!(settings.is_logging);
}

#[test]
fn can_reject_unknown_formulation() {
    let config = Config { formulation: Some("carp".to_string()), ..Config::default() };

    let result = create_settings(Formulation::Nearp, Some(&config), &CommandLineSettings::default());

    assert_eq!(result.unwrap_err().to_string(), "unknown formulation: 'carp'");
}
