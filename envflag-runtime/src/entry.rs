use std::{fmt, str::FromStr, time::Duration};

use crate::{
    Error, Kind, Result, Timestamp, format_duration, format_timestamp, parse_duration,
    parse_timestamp,
};

/// A concrete flag value for one environment.
///
/// Enum flags are stored as [`Entry::String`] holding the selected variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    String(String),
    Bool(bool),
    Int(isize),
    Int64(i64),
    Uint(usize),
    Uint64(u64),
    Float64(f64),
    Duration(Duration),
    Timestamp(Timestamp),
    StringSlice(Vec<String>),
    IntSlice(Vec<isize>),
    Int64Slice(Vec<i64>),
    UintSlice(Vec<usize>),
    Uint64Slice(Vec<u64>),
    Float64Slice(Vec<f64>),
}

impl Entry {
    /// Parse command line or environment variable text as a value of `kind`.
    ///
    /// Slice kinds take a comma separated list; blank items are skipped.
    pub fn parse(kind: Kind, text: &str) -> Result<Self> {
        match kind {
            Kind::String | Kind::Enum => Ok(Entry::String(text.to_string())),
            Kind::Bool => parse_one(kind, text).map(Entry::Bool),
            Kind::Int => parse_one(kind, text).map(Entry::Int),
            Kind::Int64 => parse_one(kind, text).map(Entry::Int64),
            Kind::Uint => parse_one(kind, text).map(Entry::Uint),
            Kind::Uint64 => parse_one(kind, text).map(Entry::Uint64),
            Kind::Float64 => parse_one(kind, text).map(Entry::Float64),
            Kind::Duration => parse_duration(text.trim()).map(Entry::Duration),
            Kind::Timestamp => parse_timestamp(text.trim()).map(Entry::Timestamp),
            Kind::StringSlice => Ok(Entry::StringSlice(
                split_list(text).map(str::to_string).collect(),
            )),
            Kind::IntSlice => parse_list(kind, text).map(Entry::IntSlice),
            Kind::Int64Slice => parse_list(kind, text).map(Entry::Int64Slice),
            Kind::UintSlice => parse_list(kind, text).map(Entry::UintSlice),
            Kind::Uint64Slice => parse_list(kind, text).map(Entry::Uint64Slice),
            Kind::Float64Slice => parse_list(kind, text).map(Entry::Float64Slice),
        }
    }
}

fn parse_one<T: FromStr>(kind: Kind, text: &str) -> Result<T> {
    text.trim().parse().map_err(|_| Error::InvalidValue {
        kind,
        text: text.to_string(),
    })
}

fn parse_list<T: FromStr>(kind: Kind, text: &str) -> Result<Vec<T>> {
    split_list(text).map(|item| parse_one(kind, item)).collect()
}

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Renders the text [`Entry::parse`] accepts for the same kind.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::String(v) => f.write_str(v),
            Entry::Bool(v) => write!(f, "{v}"),
            Entry::Int(v) => write!(f, "{v}"),
            Entry::Int64(v) => write!(f, "{v}"),
            Entry::Uint(v) => write!(f, "{v}"),
            Entry::Uint64(v) => write!(f, "{v}"),
            Entry::Float64(v) => write!(f, "{v}"),
            Entry::Duration(v) => f.write_str(&format_duration(*v)),
            Entry::Timestamp(v) => f.write_str(&format_timestamp(v)),
            Entry::StringSlice(v) => join(f, v),
            Entry::IntSlice(v) => join(f, v),
            Entry::Int64Slice(v) => join(f, v),
            Entry::UintSlice(v) => join(f, v),
            Entry::Uint64Slice(v) => join(f, v),
            Entry::Float64Slice(v) => join(f, v),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Entry {
                fn from(value: $ty) -> Self {
                    Entry::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    String => String,
    bool => Bool,
    isize => Int,
    i64 => Int64,
    usize => Uint,
    u64 => Uint64,
    f64 => Float64,
    Duration => Duration,
    Timestamp => Timestamp,
    Vec<String> => StringSlice,
    Vec<isize> => IntSlice,
    Vec<i64> => Int64Slice,
    Vec<usize> => UintSlice,
    Vec<u64> => Uint64Slice,
    Vec<f64> => Float64Slice,
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Entry::String(value.to_string())
    }
}
