//! Rust code generation for envflag configuration modules.
//!
//! A loaded [`envflag_manifest::Source`] goes through three steps:
//!
//! - [`literal`] renders every declared default as a Rust expression,
//!   checking it against the flag's kind.
//! - [`TemplateContext`] collects those fragments with the identifiers of
//!   every generated item, rejecting names that would clash.
//! - [`TemplateEngine`] renders the context with the built-in handlebars
//!   template or a custom one.
//!
//! [`Generator`] drives the three and writes the result.

mod code_builder;
mod context;
mod generator;
pub mod literal;
pub mod naming;
mod template;
mod type_mapper;

pub use code_builder::{CodeBuilder, Indent};
pub use context::{ContextError, EnvView, FlagView, TemplateContext, VariantView};
pub use generator::Generator;
pub use literal::RenderError;
pub use template::{BUILTIN_TEMPLATE, TemplateEngine};
pub use type_mapper::{RustTypeMapper, Setter, TypeMapper};
