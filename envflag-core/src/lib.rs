//! Core utilities and types for the envflag config generator.
//!
//! This crate provides the naming helpers and file-writing primitives
//! shared by the manifest loader, the code generator and the CLI.

mod case;
mod file;

// File operations
pub use file::{File, GeneratedFile, WriteResult, generated_header};
// String utilities
pub use case::{to_pascal_case, to_screaming_snake_case, to_snake_case};
