// Code generated by envflag from demo.yaml. DO NOT EDIT.

//! Configuration flags of `envflag-demo`, with one default per environment.
//!
//! Demo service
//!
//! Add it to a crate with `mod demo_config;`. The active environment is read
//! from `ENVFLAG_DEMO_ENV`; command line flags and their environment variables
//! override the defaults, see [`Config::load`].

use envflag_runtime::{EnvName, Error, FlagInfo, Value};
pub use std::time::Duration;
pub use envflag_runtime::Timestamp;

/// Variable selecting the active environment.
pub const APP_ENV: &str = "ENVFLAG_DEMO_ENV";

pub const ENV_DEV: EnvName = EnvName::new("dev");
pub const ENV_PROD: EnvName = EnvName::new("prod");

/// Declared environments, the first one is the default.
pub const ENVIRONMENTS: &[EnvName] = &[
    ENV_DEV,
    ENV_PROD,
];

#[allow(non_upper_case_globals)]
pub const ModeFast: &str = "fast";

#[allow(non_upper_case_globals)]
pub const ModeSlow: &str = "slow";

/// Static description of every flag.
pub mod flags {
    use envflag_runtime::{FlagInfo, Kind};

    pub const DEBUG: FlagInfo = FlagInfo {
        name: "debug",
        kind: Kind::Bool,
        help: "",
        variants: &[],
        env_vars: &[],
        aliases: &[],
        required: false,
    };

    pub const HOSTS: FlagInfo = FlagInfo {
        name: "hosts",
        kind: Kind::StringSlice,
        help: "",
        variants: &[],
        env_vars: &["ENVFLAG_DEMO_HOSTS", "DEMO_HOSTS_LIST"],
        aliases: &[],
        required: false,
    };

    pub const MODE: FlagInfo = FlagInfo {
        name: "mode",
        kind: Kind::Enum,
        help: "variants: fast, slow",
        variants: &["fast", "slow"],
        env_vars: &["ENVFLAG_DEMO_MODE"],
        aliases: &[],
        required: false,
    };

    pub const PORT: FlagInfo = FlagInfo {
        name: "port",
        kind: Kind::Int64,
        help: "Listen port",
        variants: &[],
        env_vars: &["ENVFLAG_DEMO_PORT"],
        aliases: &["p"],
        required: false,
    };

    pub const RATIO: FlagInfo = FlagInfo {
        name: "ratio",
        kind: Kind::Float64,
        help: "",
        variants: &[],
        env_vars: &["ENVFLAG_DEMO_RATIO"],
        aliases: &[],
        required: false,
    };

    pub const STARTED: FlagInfo = FlagInfo {
        name: "started",
        kind: Kind::Timestamp,
        help: "",
        variants: &[],
        env_vars: &["ENVFLAG_DEMO_STARTED"],
        aliases: &[],
        required: false,
    };

    pub const TIMEOUT: FlagInfo = FlagInfo {
        name: "timeout",
        kind: Kind::Duration,
        help: "",
        variants: &[],
        env_vars: &["ENVFLAG_DEMO_TIMEOUT"],
        aliases: &[],
        required: false,
    };

    pub const TOKEN: FlagInfo = FlagInfo {
        name: "token",
        kind: Kind::String,
        help: "",
        variants: &[],
        env_vars: &["ENVFLAG_DEMO_TOKEN"],
        aliases: &[],
        required: true,
    };
}

pub const FLAGS: &[FlagInfo] = &[
    flags::DEBUG,
    flags::HOSTS,
    flags::MODE,
    flags::PORT,
    flags::RATIO,
    flags::STARTED,
    flags::TIMEOUT,
    flags::TOKEN,
];

/// Flag values of the active environment.
#[derive(Debug, Clone)]
pub struct Config {
    env: EnvName,
    debug: Value,
    hosts: Value,
    mode: Value,
    port: Value,
    ratio: Value,
    started: Value,
    timeout: Value,
    token: Value,
}

impl Config {
    /// Declared defaults of every flag, resolved against `env`.
    pub fn new(env: EnvName) -> Result<Self, Error> {
        Ok(Self {
            debug: Value::new(&env)
                .set(ENV_DEV, true)
                .set(ENV_PROD, false),
            hosts: Value::new(&env)
                .set_string_slice(ENV_DEV, &["a","b"])
                .set_string_slice(ENV_PROD, &["a","b"]),
            mode: Value::new(&env)
                .set(ENV_DEV, ModeFast)
                .set(ENV_PROD, ModeSlow),
            port: Value::new(&env)
                .set(ENV_DEV, 8080_i64)
                .set(ENV_PROD, 80_i64),
            ratio: Value::new(&env)
                .set(ENV_DEV, 0.5_f64)
                .set(ENV_PROD, 0.5_f64),
            started: Value::new(&env)
                .set_timestamp(ENV_DEV, "0001-01-01T00:00:00Z")?
                .set_timestamp(ENV_PROD, "2021-05-25T17:15:16Z")?,
            timeout: Value::new(&env)
                .set_duration(ENV_DEV, std::time::Duration::from_nanos(90000000000))
                .set_duration(ENV_PROD, std::time::Duration::from_nanos(0)),
            token: Value::new(&env)
                .set(ENV_DEV, "")
                .set(ENV_PROD, ""),
            env,
        })
    }

    /// Declared defaults for the environment named by `ENVFLAG_DEMO_ENV`.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(envflag_runtime::current_env(APP_ENV, ENVIRONMENTS)?)
    }

    /// Parse the process arguments and apply them, and the flag environment
    /// variables, over the defaults of the selected environment.
    pub fn load() -> Result<Self, Error> {
        let matches = Self::command().get_matches();
        let mut config = Self::from_env()?;
        config.resolve(&matches)?;
        Ok(config)
    }

    pub fn args() -> Vec<clap::Arg> {
        FLAGS.iter().map(FlagInfo::arg).collect()
    }

    pub fn command() -> clap::Command {
        clap::Command::new("envflag-demo")
            .about("Demo service")
            .args(Self::args())
    }

    /// Apply command line and environment variable input to the current
    /// environment.
    pub fn resolve(&mut self, matches: &clap::ArgMatches) -> Result<(), Error> {
        flags::DEBUG.resolve(&self.debug, matches)?;
        flags::HOSTS.resolve(&self.hosts, matches)?;
        flags::MODE.resolve(&self.mode, matches)?;
        flags::PORT.resolve(&self.port, matches)?;
        flags::RATIO.resolve(&self.ratio, matches)?;
        flags::STARTED.resolve(&self.started, matches)?;
        flags::TIMEOUT.resolve(&self.timeout, matches)?;
        flags::TOKEN.resolve(&self.token, matches)?;
        Ok(())
    }

    pub fn env(&self) -> &EnvName {
        &self.env
    }

    /// Value of the `--debug` flag.
    pub fn debug(&self) -> bool {
        self.debug.bool()
    }

    pub fn debug_value(&self) -> &Value {
        &self.debug
    }

    /// Value of the `--hosts` flag.
    pub fn hosts(&self) -> Option<Vec<String>> {
        self.hosts.string_slice()
    }

    pub fn hosts_value(&self) -> &Value {
        &self.hosts
    }

    /// Value of the `--mode` flag.
    pub fn mode(&self) -> String {
        self.mode.string()
    }

    pub fn mode_value(&self) -> &Value {
        &self.mode
    }

    /// Listen port
    pub fn port(&self) -> i64 {
        self.port.int64()
    }

    pub fn port_value(&self) -> &Value {
        &self.port
    }

    /// Value of the `--ratio` flag.
    pub fn ratio(&self) -> f64 {
        self.ratio.float64()
    }

    pub fn ratio_value(&self) -> &Value {
        &self.ratio
    }

    /// Value of the `--started` flag.
    pub fn started(&self) -> Option<envflag_runtime::Timestamp> {
        self.started.timestamp()
    }

    pub fn started_value(&self) -> &Value {
        &self.started
    }

    /// Value of the `--timeout` flag.
    pub fn timeout(&self) -> std::time::Duration {
        self.timeout.duration()
    }

    pub fn timeout_value(&self) -> &Value {
        &self.timeout
    }

    /// Value of the `--token` flag.
    pub fn token(&self) -> String {
        self.token.string()
    }

    pub fn token_value(&self) -> &Value {
        &self.token
    }
}
