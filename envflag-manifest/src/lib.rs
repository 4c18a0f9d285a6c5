//! Loading of envflag flag sources.
//!
//! A source declares an application, its environments and a map of flags:
//!
//! ```yaml
//! app:
//!   name: demo
//!   env: [dev, prod]
//! flags:
//!   port:
//!     type: int
//!     value:
//!       dev: 8080
//!       prod: 80
//! ```
//!
//! The same structure is accepted as TOML. Flags are returned sorted by name.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod parse;
mod source;
mod value;

pub use error::{Error, Result};
pub use file::SourceFile;
pub use parse::{Format, parse_source};
pub use source::{App, FlagSpec, Source};
pub use value::{DefaultValue, EnvSources, EnvValue, Scalar};
