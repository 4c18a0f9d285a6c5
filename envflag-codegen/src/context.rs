//! Data handed to the output template.
//!
//! Everything the template prints is computed here, so rendering a template
//! against a [`TemplateContext`] never fails because of flag data. Literal
//! errors and identifier clashes surface as [`ContextError`] while the
//! context is built.

use std::collections::HashMap;

use envflag_core::{generated_header, to_snake_case};
use envflag_manifest::{FlagSpec, Source};
use envflag_runtime::Kind;
use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::{
    CodeBuilder,
    literal::{self, RenderError},
    naming::{enum_ident, env_const, env_key, field_name, flag_const},
    type_mapper::{RustTypeMapper, TypeMapper},
};

/// Members of the generated `Config` type that flags cannot shadow.
const RESERVED_MEMBERS: &[&str] = &[
    "env", "new", "from_env", "load", "args", "command", "resolve",
];

/// Items of the generated module that enum constants cannot shadow.
const RESERVED_ITEMS: &[&str] = &[
    "Config", "EnvName", "Error", "FlagInfo", "Value", "Timestamp", "Duration",
];

/// Flag names and aliases taken by clap itself.
const RESERVED_FLAGS: &[&str] = &["help", "h"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("{what} {name:?} does not produce a valid Rust identifier")]
    InvalidName { what: &'static str, name: String },
    #[error("{what} {name:?} is reserved by the generated module")]
    Reserved { what: &'static str, name: String },
    #[error("{first:?} and {second:?} both generate `{ident}`")]
    Collision {
        ident: String,
        first: String,
        second: String,
    },
}

/// Origin of identifiers claimed by the generated module itself.
const BUILT_IN: &str = "";

/// Tracks generated identifiers and the names they came from.
#[derive(Default)]
struct Idents(HashMap<String, String>);

impl Idents {
    fn claim(&mut self, ident: &str, origin: &str) -> Result<(), ContextError> {
        match self.0.insert(ident.to_string(), origin.to_string()) {
            Some(first) => Err(ContextError::Collision {
                ident: ident.to_string(),
                first,
                second: origin.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvView {
    pub name: String,
    /// Constant holding the name, e.g. `ENV_DEV`.
    pub ident: String,
}

/// One enum label exposed as a string constant.
#[derive(Debug, Clone, Serialize)]
pub struct VariantView {
    pub ident: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlagView {
    pub name: String,
    /// `Kind` variant name, e.g. `Int64`.
    pub kind: String,
    /// `FlagInfo` constant in the `flags` module.
    pub const_name: String,
    pub field: String,
    /// Method returning the underlying `Value`.
    pub value_fn: String,
    pub accessor: String,
    pub accessor_type: String,
    /// One line documentation of the accessor.
    pub doc: String,
    /// Rust expressions of the `FlagInfo` fields.
    pub help: String,
    pub variants: String,
    pub env_vars: String,
    pub aliases: String,
    pub required: String,
    /// Field initializer of `Config::new`, setting the default of every
    /// environment.
    pub init: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub header: String,
    pub module: String,
    pub source_file: String,
    pub app_name: String,
    pub app_desc: String,
    /// `app_desc` split into trimmed lines, for doc comments.
    pub app_doc: Vec<String>,
    /// Variable selecting the environment, e.g. `DEMO_ENV`.
    pub env_key: String,
    pub environments: Vec<EnvView>,
    pub variants: Vec<VariantView>,
    pub flags: Vec<FlagView>,
    pub has_timestamp_flags: bool,
    pub has_duration_flags: bool,
}

impl TemplateContext {
    pub fn new(source: &Source, module: &str, source_file: &str) -> Result<Self, ContextError> {
        if field_name(module).as_deref() != Some(module) {
            return Err(ContextError::InvalidName {
                what: "module",
                name: module.to_string(),
            });
        }

        let environments = env_views(source)?;
        let variants = variant_views(&source.flags)?;

        let mut members = Idents::default();
        for name in RESERVED_MEMBERS {
            members.claim(name, BUILT_IN)?;
        }
        let mut switches = Idents::default();
        for name in RESERVED_FLAGS {
            switches.claim(name, BUILT_IN)?;
        }

        let mut flags = Vec::with_capacity(source.flags.len());
        for flag in &source.flags {
            let view = flag_view(flag, &source.app.name, &environments)?;

            for ident in [view.field.trim_start_matches("r#"), view.value_fn.as_str()] {
                members.claim(ident, &flag.name).map_err(|e| reserved(e, "flag"))?;
            }
            for switch in std::iter::once(&flag.name).chain(&flag.aliases) {
                switches.claim(switch, &flag.name).map_err(|e| reserved(e, "flag"))?;
            }

            debug!("rendered flag {:?} ({})", flag.name, flag.kind);
            flags.push(view);
        }

        Ok(Self {
            header: generated_header(source_file),
            module: module.to_string(),
            source_file: source_file.to_string(),
            app_name: source.app.name.clone(),
            app_desc: source.app.desc.trim().to_string(),
            app_doc: source
                .app
                .desc
                .trim()
                .lines()
                .map(|line| line.trim_end().to_string())
                .collect(),
            env_key: env_key(&source.app.name),
            environments,
            variants,
            flags,
            has_timestamp_flags: source.flags.iter().any(|f| f.kind == Kind::Timestamp),
            has_duration_flags: source.flags.iter().any(|f| f.kind == Kind::Duration),
        })
    }
}

/// Turn a clash with a built-in name into a [`ContextError::Reserved`].
fn reserved(err: ContextError, what: &'static str) -> ContextError {
    match err {
        ContextError::Collision { first, second, .. } if first == BUILT_IN => {
            ContextError::Reserved { what, name: second }
        }
        other => other,
    }
}

fn env_views(source: &Source) -> Result<Vec<EnvView>, ContextError> {
    let mut idents = Idents::default();
    source
        .app
        .env
        .iter()
        .map(|env| {
            let ident = env_const(env.as_str());
            if ident == "ENV_" {
                return Err(ContextError::InvalidName {
                    what: "environment",
                    name: env.to_string(),
                });
            }
            idents.claim(&ident, env.as_str())?;
            Ok(EnvView {
                name: env.to_string(),
                ident,
            })
        })
        .collect()
}

fn variant_views(flags: &[FlagSpec]) -> Result<Vec<VariantView>, ContextError> {
    let mut idents = Idents::default();
    for name in RESERVED_ITEMS {
        idents.claim(name, BUILT_IN)?;
    }

    let mut views = Vec::new();
    for flag in flags.iter().filter(|f| f.is_enum()) {
        for label in &flag.variants {
            let ident = enum_ident(&flag.name, label);
            let origin = format!("{}={label}", flag.name);
            if ident == enum_ident(&flag.name, "") {
                return Err(ContextError::InvalidName {
                    what: "enum variant",
                    name: origin,
                });
            }
            idents.claim(&ident, &origin).map_err(|e| match e {
                ContextError::Collision { first, second, .. } if first == BUILT_IN => {
                    ContextError::Reserved {
                        what: "enum variant",
                        name: second,
                    }
                }
                other => other,
            })?;
            views.push(VariantView {
                ident,
                label: label.clone(),
            });
        }
    }
    Ok(views)
}

fn flag_view(flag: &FlagSpec, app_name: &str, envs: &[EnvView]) -> Result<FlagView, ContextError> {
    let field = field_name(&flag.name).ok_or_else(|| ContextError::InvalidName {
        what: "flag",
        name: flag.name.clone(),
    })?;
    let mapper = RustTypeMapper;

    let doc = match flag.desc.lines().next() {
        Some(line) if !line.trim().is_empty() => line.trim().to_string(),
        _ => format!("Value of the `--{}` flag.", flag.name),
    };

    Ok(FlagView {
        name: flag.name.clone(),
        kind: format!("{:?}", flag.kind),
        const_name: flag_const(&flag.name),
        value_fn: format!("{}_value", to_snake_case(&flag.name)),
        accessor: mapper.accessor(flag.kind).to_string(),
        accessor_type: mapper.accessor_type(flag.kind),
        doc,
        help: literal::quote(&literal::description(flag)),
        variants: literal::variants_field(flag),
        env_vars: literal::env_vars_field(flag, app_name),
        aliases: literal::aliases_field(flag),
        required: literal::required_field(flag),
        init: init_chain(flag, &field, envs)?,
        field,
    })
}

/// `field: Value::new(&env)` followed by one setter call per environment.
fn init_chain(flag: &FlagSpec, field: &str, envs: &[EnvView]) -> Result<String, RenderError> {
    let setter = RustTypeMapper.setter(flag.kind);
    let try_op = if setter.is_fallible() { "?" } else { "" };

    let mut lines = vec![format!("{field}: Value::new(&env)")];
    for env in envs {
        let literal = literal::default_literal(flag, &env.name)?;
        let arg = if flag.kind.is_slice() {
            format!("&[{literal}]")
        } else {
            literal
        };
        lines.push(format!(".{setter}({}, {arg}){try_op}", env.ident));
    }
    if let Some(last) = lines.last_mut() {
        last.push(',');
    }

    let (head, calls) = lines.split_at(1);
    Ok(CodeBuilder::rust()
        .at_level(3)
        .each(head, |b, line| b.line(line))
        .nested(|b| b.each(calls, |b, line| b.line(line)))
        .build_trimmed())
}
