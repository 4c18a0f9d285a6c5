//! Runtime support for envflag generated configuration modules.
//!
//! Generated code builds one [`Value`] per flag at startup, filling it with
//! the per-environment defaults declared in the source file, and reads it
//! back through the typed accessors. The same parsing helpers are used by
//! the generator itself, so a literal accepted at generation time is
//! guaranteed to be accepted by the generated program.
//!
//! Command line and environment variable input is layered on top of the
//! defaults by [`FlagInfo::resolve`].
//!
//! # Example
//!
//! ```
//! use envflag_runtime::Value;
//!
//! let port = Value::new("dev").set("dev", 8080_i64).set("prod", 80_i64);
//!
//! assert_eq!(port.int64(), 8080);
//! assert_eq!(port.env("prod").int64(), 80);
//! // Unknown environments fall back to the last assigned one.
//! assert_eq!(port.env("staging").int64(), 80);
//! ```

mod duration;
mod entry;
mod env;
mod error;
mod flag;
mod kind;
mod timestamp;
mod value;

pub use duration::{format_duration, parse_duration};
pub use entry::Entry;
pub use env::{EnvName, current_env, first_env_var, select_env};
pub use error::{Error, Result};
pub use flag::FlagInfo;
pub use kind::Kind;
pub use timestamp::{Timestamp, ZERO_TIMESTAMP, format_timestamp, parse_timestamp};
pub use value::Value;
