//! Core operations.
//!
//! This module contains the business logic for envflag commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;

pub use check::check;
