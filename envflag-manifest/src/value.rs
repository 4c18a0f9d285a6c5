//! Untyped default values and environment variable sources as written in a
//! flag source. Both YAML and TOML decode through the same visitors.

use std::fmt;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    de::{self, Deserializer, MapAccess, SeqAccess, Visitor},
};

/// Field name the `toml` crate uses to smuggle datetimes through serde.
const TOML_DATETIME_FIELD: &str = "$__toml_private_datetime";

/// A single literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    /// Only used for values above `i64::MAX`.
    UInt(u64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Name of the literal's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) | Scalar::UInt(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::UInt(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::String(v) => f.write_str(v),
        }
    }
}

/// The value declared for one environment.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvValue {
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
}

impl EnvValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            EnvValue::Scalar(s) => s.type_name(),
            EnvValue::Sequence(_) => "sequence",
        }
    }
}

/// A flag's declared default.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// The same literal for every environment.
    Scalar(Scalar),
    /// The same list for every environment.
    Sequence(Vec<Scalar>),
    /// One value per environment, in declaration order. Environments mapped to
    /// null are left out.
    PerEnvironment(IndexMap<String, EnvValue>),
}

impl DefaultValue {
    /// The value that applies to `env`, if any.
    pub fn for_env(&self, env: &str) -> Option<EnvValue> {
        match self {
            DefaultValue::Scalar(s) => Some(EnvValue::Scalar(s.clone())),
            DefaultValue::Sequence(items) => Some(EnvValue::Sequence(items.clone())),
            DefaultValue::PerEnvironment(map) => map.get(env).cloned(),
        }
    }
}

/// Where a flag reads environment variables from, besides its derived name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnvSources {
    /// Only the variable derived from the app and flag name.
    #[default]
    Default,
    /// No environment variables at all.
    Disabled,
    /// The derived variable plus these extra names.
    Extra(Vec<String>),
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Scalar::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Scalar::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v).map_or(Scalar::UInt(v), Scalar::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Scalar::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Scalar::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Scalar::String(v))
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        match map.next_key::<String>()? {
            Some(key) if key == TOML_DATETIME_FIELD => {
                Ok(Scalar::String(map.next_value::<String>()?))
            }
            _ => Err(de::Error::invalid_type(de::Unexpected::Map, &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

fn sequence<'de, A: SeqAccess<'de>>(mut seq: A) -> Result<Vec<Scalar>, A::Error> {
    let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
    while let Some(item) = seq.next_element::<Scalar>()? {
        items.push(item);
    }
    Ok(items)
}

/// A scalar or list, or nothing for null.
struct EnvValueVisitor;

impl<'de> Visitor<'de> for EnvValueVisitor {
    type Value = Option<EnvValue>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar or a list of scalars")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        ScalarVisitor.visit_bool(v).map(scalar)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        ScalarVisitor.visit_i64(v).map(scalar)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        ScalarVisitor.visit_u64(v).map(scalar)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        ScalarVisitor.visit_f64(v).map(scalar)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        ScalarVisitor.visit_str(v).map(scalar)
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        ScalarVisitor.visit_string(v).map(scalar)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        sequence(seq).map(|items| Some(EnvValue::Sequence(items)))
    }

    fn visit_map<M: MapAccess<'de>>(self, map: M) -> Result<Self::Value, M::Error> {
        ScalarVisitor.visit_map(map).map(scalar)
    }
}

fn scalar(s: Scalar) -> Option<EnvValue> {
    Some(EnvValue::Scalar(s))
}

struct OptionalEnvValue(Option<EnvValue>);

impl<'de> Deserialize<'de> for OptionalEnvValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EnvValueVisitor).map(OptionalEnvValue)
    }
}

struct DefaultValueVisitor;

impl<'de> Visitor<'de> for DefaultValueVisitor {
    type Value = DefaultValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar, a list of scalars or a map of environment values")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        ScalarVisitor.visit_bool(v).map(DefaultValue::Scalar)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        ScalarVisitor.visit_i64(v).map(DefaultValue::Scalar)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        ScalarVisitor.visit_u64(v).map(DefaultValue::Scalar)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        ScalarVisitor.visit_f64(v).map(DefaultValue::Scalar)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        ScalarVisitor.visit_str(v).map(DefaultValue::Scalar)
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        ScalarVisitor.visit_string(v).map(DefaultValue::Scalar)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        sequence(seq).map(DefaultValue::Sequence)
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut envs = IndexMap::new();
        while let Some(key) = map.next_key::<String>()? {
            if key == TOML_DATETIME_FIELD {
                return Ok(DefaultValue::Scalar(Scalar::String(map.next_value()?)));
            }
            let OptionalEnvValue(value) = map.next_value()?;
            if let Some(value) = value {
                envs.insert(key, value);
            }
        }
        Ok(DefaultValue::PerEnvironment(envs))
    }
}

impl<'de> Deserialize<'de> for DefaultValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DefaultValueVisitor)
    }
}

struct EnvSourcesVisitor;

impl<'de> Visitor<'de> for EnvSourcesVisitor {
    type Value = EnvSources;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a boolean, a variable name or a list of variable names")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(EnvSources::Default)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(EnvSources::Default)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(if v {
            EnvSources::Default
        } else {
            EnvSources::Disabled
        })
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(EnvSources::Extra(vec![v.to_string()]))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut names = Vec::new();
        while let Some(name) = seq.next_element::<String>()? {
            names.push(name);
        }
        Ok(EnvSources::Extra(names))
    }
}

impl<'de> Deserialize<'de> for EnvSources {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EnvSourcesVisitor)
    }
}
