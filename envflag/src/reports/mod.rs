//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod output;

pub use check::{CheckReport, EnvDefault, FlagSummary};
pub use generate::{GenerateReport, GenerationResult};
pub use output::{Report, TerminalOutput};
