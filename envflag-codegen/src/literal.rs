//! Rendering of declared defaults and flag metadata as Rust source text.
//!
//! Every function here is pure: it takes a [`FlagSpec`] (and, for defaults,
//! the environment being rendered) and returns a fragment the template pastes
//! verbatim. Authoring mistakes are reported as [`RenderError`], which names
//! the flag and its kind.
//!
//! Absent values are handled per kind. A flag without a declared value, or
//! whose environment map lacks the rendered environment, gets the zero value
//! of its kind (empty string, `false`, `0`, a zero duration, the zero
//! timestamp, an empty list). Enum flags are the exception: they have no zero
//! value and a missing declaration is an error.

use envflag_core::to_screaming_snake_case;
use envflag_manifest::{EnvSources, EnvValue, FlagSpec, Scalar};
use envflag_runtime::{Kind, ZERO_TIMESTAMP, format_timestamp, parse_duration, parse_timestamp};
use thiserror::Error;

use crate::{
    naming::enum_ident,
    type_mapper::{RustTypeMapper, TypeMapper},
};

/// A flag whose declaration cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} [flag={flag} type={kind}]")]
pub struct RenderError {
    pub flag: String,
    pub kind: Kind,
    pub message: String,
}

impl RenderError {
    pub fn new(flag: &FlagSpec, message: impl Into<String>) -> Self {
        Self {
            flag: flag.name.clone(),
            kind: flag.kind,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// What a flag declares for one environment.
enum Declared {
    /// The flag has no value at all.
    Nothing,
    /// The flag has an environment map without this environment.
    MissingEnv,
    Value(EnvValue),
}

fn declared(flag: &FlagSpec, env: &str) -> Declared {
    match &flag.value {
        None => Declared::Nothing,
        Some(value) => value.for_env(env).map_or(Declared::MissingEnv, Declared::Value),
    }
}

fn unsupported(flag: &FlagSpec, found: &str) -> RenderError {
    RenderError::new(flag, format!("unsupported value type {found}"))
}

/// Quote `s` as a Rust string literal.
pub fn quote(s: &str) -> String {
    format!("{s:?}")
}

/// Render the default of `flag` for `env` as the argument of its setter.
///
/// Slice kinds render the comma separated elements only; the caller wraps
/// them in `&[...]`.
pub fn default_literal(flag: &FlagSpec, env: &str) -> Result<String> {
    match flag.kind {
        Kind::String => string_literal(flag, env),
        Kind::Bool => bool_literal(flag, env),
        Kind::Int | Kind::Int64 | Kind::Uint | Kind::Uint64 => int_literal(flag, env),
        Kind::Float64 => float_literal(flag, env),
        Kind::Duration => duration_literal(flag, env),
        Kind::Timestamp => timestamp_literal(flag, env),
        Kind::Enum => enum_literal(flag, env),
        Kind::StringSlice
        | Kind::IntSlice
        | Kind::Int64Slice
        | Kind::UintSlice
        | Kind::Uint64Slice
        | Kind::Float64Slice => slice_literal(flag, env),
    }
}

fn string_literal(flag: &FlagSpec, env: &str) -> Result<String> {
    match declared(flag, env) {
        Declared::Nothing | Declared::MissingEnv => Ok(quote("")),
        Declared::Value(EnvValue::Scalar(s)) => Ok(quote(&s.to_string())),
        Declared::Value(other) => Err(unsupported(flag, other.type_name())),
    }
}

fn bool_literal(flag: &FlagSpec, env: &str) -> Result<String> {
    match declared(flag, env) {
        Declared::Nothing | Declared::MissingEnv => Ok("false".to_string()),
        Declared::Value(EnvValue::Scalar(Scalar::Bool(b))) => Ok(b.to_string()),
        Declared::Value(other) => Err(unsupported(flag, other.type_name())),
    }
}

fn int_literal(flag: &FlagSpec, env: &str) -> Result<String> {
    let suffix = RustTypeMapper.element_type(flag.kind);
    match declared(flag, env) {
        Declared::Nothing | Declared::MissingEnv => Ok(format!("0_{suffix}")),
        Declared::Value(EnvValue::Scalar(s)) => {
            Ok(format!("{}_{suffix}", integer_text(flag, flag.kind, &s)?))
        }
        Declared::Value(other) => Err(unsupported(flag, other.type_name())),
    }
}

/// Decimal text of an integer scalar, checked against the range of `kind`.
fn integer_text(flag: &FlagSpec, kind: Kind, s: &Scalar) -> Result<String> {
    let signed = matches!(kind.element(), Kind::Int | Kind::Int64);
    match *s {
        Scalar::Int(i) if signed || i >= 0 => Ok(i.to_string()),
        Scalar::Int(i) => Err(RenderError::new(
            flag,
            format!("negative value {i} for an unsigned type"),
        )),
        Scalar::UInt(u) if !signed => Ok(u.to_string()),
        Scalar::UInt(u) => Err(RenderError::new(
            flag,
            format!("value {u} overflows {}", RustTypeMapper.element_type(kind)),
        )),
        _ => Err(unsupported(flag, s.type_name())),
    }
}

fn float_literal(flag: &FlagSpec, env: &str) -> Result<String> {
    match declared(flag, env) {
        Declared::Nothing | Declared::MissingEnv => Ok("0_f64".to_string()),
        Declared::Value(EnvValue::Scalar(s)) => float_text(flag, &s),
        Declared::Value(other) => Err(unsupported(flag, other.type_name())),
    }
}

/// Shortest text that parses back to the same `f64`, with an `_f64` suffix.
///
/// Integers are accepted and widened.
fn float_text(flag: &FlagSpec, s: &Scalar) -> Result<String> {
    match *s {
        Scalar::Float(f) if f.is_finite() => Ok(format!("{f}_f64")),
        Scalar::Float(f) => Err(RenderError::new(
            flag,
            format!("non-finite value {f} cannot be rendered"),
        )),
        Scalar::Int(i) => Ok(format!("{i}_f64")),
        Scalar::UInt(u) => Ok(format!("{u}_f64")),
        _ => Err(unsupported(flag, s.type_name())),
    }
}

fn duration_literal(flag: &FlagSpec, env: &str) -> Result<String> {
    let nanos = match declared(flag, env) {
        Declared::Nothing | Declared::MissingEnv => 0,
        Declared::Value(EnvValue::Scalar(Scalar::String(text))) => parse_duration(&text)
            .map_err(|e| RenderError::new(flag, e.to_string()))?
            .as_nanos(),
        Declared::Value(other) => return Err(unsupported(flag, other.type_name())),
    };
    Ok(format!("std::time::Duration::from_nanos({nanos})"))
}

fn timestamp_literal(flag: &FlagSpec, env: &str) -> Result<String> {
    match declared(flag, env) {
        Declared::Nothing | Declared::MissingEnv => Ok(quote(ZERO_TIMESTAMP)),
        Declared::Value(EnvValue::Scalar(Scalar::String(text))) => {
            let ts = parse_timestamp(&text).map_err(|e| RenderError::new(flag, e.to_string()))?;
            Ok(quote(&format_timestamp(&ts)))
        }
        Declared::Value(other) => Err(unsupported(flag, other.type_name())),
    }
}

fn enum_literal(flag: &FlagSpec, env: &str) -> Result<String> {
    let label = match declared(flag, env) {
        Declared::Nothing => return Err(RenderError::new(flag, "no value declared")),
        Declared::MissingEnv => {
            return Err(RenderError::new(
                flag,
                format!("undefined value for env {env:?}"),
            ));
        }
        Declared::Value(EnvValue::Scalar(Scalar::Float(_))) => {
            return Err(unsupported(flag, "float"));
        }
        Declared::Value(EnvValue::Scalar(s)) => s.to_string(),
        Declared::Value(other) => return Err(unsupported(flag, other.type_name())),
    };

    if !flag.variants.contains(&label) {
        return Err(RenderError::new(
            flag,
            format!(
                "value {label:?} is not one of the variants: {}",
                flag.variants.join(", ")
            ),
        ));
    }
    Ok(enum_ident(&flag.name, &label))
}

fn slice_literal(flag: &FlagSpec, env: &str) -> Result<String> {
    let items = match declared(flag, env) {
        Declared::Nothing | Declared::MissingEnv => return Ok(String::new()),
        Declared::Value(EnvValue::Sequence(items)) => items,
        Declared::Value(other) => return Err(unsupported(flag, other.type_name())),
    };

    let element = flag.kind.element();
    let rendered = items
        .iter()
        .map(|item| match element {
            Kind::String => Ok(quote(&item.to_string())),
            Kind::Float64 => float_text(flag, item),
            _ => integer_text(flag, element, item),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join(","))
}

/// Environment variables bound to `flag`: `<APP>_<FLAG>` followed by the
/// extra names, all in SCREAMING_SNAKE_CASE. Extra names are not prefixed.
pub fn env_vars(flag: &FlagSpec, app_name: &str) -> Vec<String> {
    let derived = format!(
        "{}_{}",
        to_screaming_snake_case(app_name),
        to_screaming_snake_case(&flag.name)
    );
    match &flag.env {
        EnvSources::Disabled => Vec::new(),
        EnvSources::Default => vec![derived],
        EnvSources::Extra(extra) => std::iter::once(derived)
            .chain(extra.iter().map(|name| to_screaming_snake_case(name)))
            .collect(),
    }
}

fn str_slice(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote(s)).collect();
    format!("&[{}]", quoted.join(", "))
}

/// `&["APP_FLAG", ...]`, or `&[]` when environment variables are disabled.
pub fn env_vars_field(flag: &FlagSpec, app_name: &str) -> String {
    str_slice(&env_vars(flag, app_name))
}

pub fn aliases_field(flag: &FlagSpec) -> String {
    str_slice(&flag.aliases)
}

pub fn variants_field(flag: &FlagSpec) -> String {
    str_slice(&flag.variants)
}

pub fn required_field(flag: &FlagSpec) -> String {
    flag.required.to_string()
}

/// Help text of a flag. Enum flags list their variants.
pub fn description(flag: &FlagSpec) -> String {
    if flag.kind != Kind::Enum {
        return flag.desc.clone();
    }

    let variants = flag.variants.join(", ");
    if flag.desc.is_empty() {
        format!("variants: {variants}")
    } else {
        format!("{}, (variants: {variants})", flag.desc)
    }
}
