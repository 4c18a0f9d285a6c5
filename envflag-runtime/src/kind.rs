use std::{fmt, str::FromStr};

use crate::Error;

/// Supported flag types.
///
/// The set is closed: a source file naming any other type is rejected
/// when it is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Enum,
    Bool,
    Int,
    Int64,
    Uint,
    Uint64,
    Float64,
    Duration,
    Timestamp,
    StringSlice,
    IntSlice,
    Int64Slice,
    UintSlice,
    Uint64Slice,
    Float64Slice,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 16] = [
        Kind::String,
        Kind::Enum,
        Kind::Bool,
        Kind::Int,
        Kind::Int64,
        Kind::Uint,
        Kind::Uint64,
        Kind::Float64,
        Kind::Duration,
        Kind::Timestamp,
        Kind::StringSlice,
        Kind::IntSlice,
        Kind::Int64Slice,
        Kind::UintSlice,
        Kind::Uint64Slice,
        Kind::Float64Slice,
    ];

    /// Get the type name used in source files
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Enum => "enum",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint64 => "uint64",
            Kind::Float64 => "float64",
            Kind::Duration => "duration",
            Kind::Timestamp => "timestamp",
            Kind::StringSlice => "stringSlice",
            Kind::IntSlice => "intSlice",
            Kind::Int64Slice => "int64Slice",
            Kind::UintSlice => "uintSlice",
            Kind::Uint64Slice => "uint64Slice",
            Kind::Float64Slice => "float64Slice",
        }
    }

    /// Returns true for the six slice kinds
    pub fn is_slice(&self) -> bool {
        matches!(
            self,
            Kind::StringSlice
                | Kind::IntSlice
                | Kind::Int64Slice
                | Kind::UintSlice
                | Kind::Uint64Slice
                | Kind::Float64Slice
        )
    }

    /// The element kind of a slice kind; scalar kinds map to themselves.
    pub fn element(&self) -> Kind {
        match self {
            Kind::StringSlice => Kind::String,
            Kind::IntSlice => Kind::Int,
            Kind::Int64Slice => Kind::Int64,
            Kind::UintSlice => Kind::Uint,
            Kind::Uint64Slice => Kind::Uint64,
            Kind::Float64Slice => Kind::Float64,
            other => *other,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnsupportedKind(s.to_string()))
    }
}
