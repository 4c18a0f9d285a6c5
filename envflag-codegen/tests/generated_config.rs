//! Behaviour of a generated configuration module.
//!
//! The module under test is rendered from `fixtures/demo.yaml`;
//! `codegen_output.rs` checks that it matches the generator output.

#[allow(dead_code)]
#[path = "generated/demo_config.rs"]
mod demo_config;

use std::time::Duration;

use demo_config::{Config, ENV_DEV, ENV_PROD, ENVIRONMENTS, FLAGS};
use envflag_runtime::{EnvName, Error, parse_timestamp};

fn parse(args: &[&str]) -> clap::ArgMatches {
    Config::command()
        .try_get_matches_from(std::iter::once("envflag-demo").chain(args.iter().copied()))
        .expect("arguments should parse")
}

#[test]
fn test_dev_defaults() {
    let config = Config::new(ENV_DEV).unwrap();

    assert_eq!(config.env(), &EnvName::new("dev"));
    assert!(config.debug());
    assert_eq!(config.hosts(), Some(vec!["a".to_string(), "b".to_string()]));
    assert_eq!(config.mode(), demo_config::ModeFast);
    assert_eq!(config.port(), 8080);
    assert_eq!(config.ratio(), 0.5);
    assert_eq!(config.timeout(), Duration::from_secs(90));
    assert_eq!(config.token(), "");
    assert_eq!(
        config.started(),
        Some(parse_timestamp("0001-01-01T00:00:00Z").unwrap())
    );
}

#[test]
fn test_prod_defaults() {
    let config = Config::new(ENV_PROD).unwrap();

    assert!(!config.debug());
    assert_eq!(config.mode(), "slow");
    assert_eq!(config.port(), 80);
    assert_eq!(config.timeout(), Duration::ZERO);
    assert_eq!(
        config.started(),
        Some(parse_timestamp("2021-05-25T17:15:16Z").unwrap())
    );
}

#[test]
fn test_other_environments_stay_reachable() {
    let config = Config::new(ENV_DEV).unwrap();

    assert_eq!(config.port_value().env(ENV_PROD).int64(), 80);
    assert_eq!(config.port_value().environments(), ENVIRONMENTS.to_vec());
}

#[test]
fn test_command_line_overrides_current_environment() {
    let mut config = Config::new(ENV_PROD).unwrap();
    let matches = parse(&[
        "-p", "9000", "--mode", "fast", "--hosts", "x,y", "--debug", "--token", "secret",
    ]);

    config.resolve(&matches).unwrap();

    assert_eq!(config.port(), 9000);
    assert_eq!(config.mode(), "fast");
    assert_eq!(config.hosts(), Some(vec!["x".to_string(), "y".to_string()]));
    assert!(config.debug());
    assert_eq!(config.token(), "secret");
    // Unchanged flags keep their prod default, other environments are untouched.
    assert_eq!(config.ratio(), 0.5);
    assert_eq!(config.port_value().env(ENV_DEV).int64(), 8080);
}

#[test]
fn test_required_flag() {
    let mut config = Config::new(ENV_DEV).unwrap();
    let matches = parse(&["--port", "1"]);

    assert_eq!(
        config.resolve(&matches),
        Err(Error::MissingRequired("token".to_string()))
    );
}

#[test]
fn test_invalid_arguments_are_rejected() {
    let command = Config::command;

    assert!(command().try_get_matches_from(["envflag-demo", "--mode", "medium"]).is_err());
    assert!(command().try_get_matches_from(["envflag-demo", "--timeout", "soon"]).is_err());
    assert!(command().try_get_matches_from(["envflag-demo", "--ratio", "half"]).is_err());
}

#[test]
fn test_flag_table() {
    let names: Vec<_> = FLAGS.iter().map(|flag| flag.name).collect();
    assert_eq!(
        names,
        ["debug", "hosts", "mode", "port", "ratio", "started", "timeout", "token"]
    );
    assert_eq!(demo_config::APP_ENV, "ENVFLAG_DEMO_ENV");
    assert_eq!(demo_config::flags::HOSTS.env_vars, ["ENVFLAG_DEMO_HOSTS", "DEMO_HOSTS_LIST"]);
    assert!(demo_config::flags::DEBUG.env_vars.is_empty());
}
