//! Per-kind facts needed to generate code for a flag.

use std::fmt;

use envflag_runtime::Kind;

/// The [`envflag_runtime::Value`] method that stores a declared default.
///
/// Most kinds share the generic [`Setter::Set`]; durations, timestamps and
/// every slice kind get a dedicated setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setter {
    Set,
    SetDuration,
    SetTimestamp,
    SetStringSlice,
    SetIntSlice,
    SetInt64Slice,
    SetUintSlice,
    SetUint64Slice,
    SetFloat64Slice,
}

impl Setter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Setter::Set => "set",
            Setter::SetDuration => "set_duration",
            Setter::SetTimestamp => "set_timestamp",
            Setter::SetStringSlice => "set_string_slice",
            Setter::SetIntSlice => "set_int_slice",
            Setter::SetInt64Slice => "set_int64_slice",
            Setter::SetUintSlice => "set_uint_slice",
            Setter::SetUint64Slice => "set_uint64_slice",
            Setter::SetFloat64Slice => "set_float64_slice",
        }
    }

    /// Whether the setter parses its argument and returns a `Result`.
    pub fn is_fallible(&self) -> bool {
        matches!(self, Setter::SetTimestamp)
    }
}

impl fmt::Display for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for mapping flag kinds to target language types and methods.
pub trait TypeMapper {
    /// Type of a single value of `kind` (the element type for slices).
    fn element_type(&self, kind: Kind) -> &'static str;

    /// Return type of the generated accessor.
    fn accessor_type(&self, kind: Kind) -> String;

    /// Overlay method the generated accessor delegates to.
    fn accessor(&self, kind: Kind) -> &'static str;

    /// Overlay method that stores a declared default of `kind`.
    fn setter(&self, kind: Kind) -> Setter {
        match kind {
            Kind::String
            | Kind::Enum
            | Kind::Bool
            | Kind::Int
            | Kind::Int64
            | Kind::Uint
            | Kind::Uint64
            | Kind::Float64 => Setter::Set,
            Kind::Duration => Setter::SetDuration,
            Kind::Timestamp => Setter::SetTimestamp,
            Kind::StringSlice => Setter::SetStringSlice,
            Kind::IntSlice => Setter::SetIntSlice,
            Kind::Int64Slice => Setter::SetInt64Slice,
            Kind::UintSlice => Setter::SetUintSlice,
            Kind::Uint64Slice => Setter::SetUint64Slice,
            Kind::Float64Slice => Setter::SetFloat64Slice,
        }
    }

    fn is_slice(&self, kind: Kind) -> bool {
        kind.is_slice()
    }
}

/// Rust type mapper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapper;

impl TypeMapper for RustTypeMapper {
    fn element_type(&self, kind: Kind) -> &'static str {
        match kind.element() {
            Kind::String | Kind::Enum => "String",
            Kind::Bool => "bool",
            Kind::Int => "isize",
            Kind::Int64 => "i64",
            Kind::Uint => "usize",
            Kind::Uint64 => "u64",
            Kind::Float64 => "f64",
            Kind::Duration => "std::time::Duration",
            Kind::Timestamp => "envflag_runtime::Timestamp",
            // element() never returns a slice kind
            _ => "String",
        }
    }

    fn accessor_type(&self, kind: Kind) -> String {
        let element = self.element_type(kind);
        if kind.is_slice() {
            format!("Option<Vec<{element}>>")
        } else if kind == Kind::Timestamp {
            format!("Option<{element}>")
        } else {
            element.to_string()
        }
    }

    fn accessor(&self, kind: Kind) -> &'static str {
        match kind {
            Kind::String | Kind::Enum => "string",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint64 => "uint64",
            Kind::Float64 => "float64",
            Kind::Duration => "duration",
            Kind::Timestamp => "timestamp",
            Kind::StringSlice => "string_slice",
            Kind::IntSlice => "int_slice",
            Kind::Int64Slice => "int64_slice",
            Kind::UintSlice => "uint_slice",
            Kind::Uint64Slice => "uint64_slice",
            Kind::Float64Slice => "float64_slice",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_setters() {
        let mapper = RustTypeMapper;

        let setters: HashSet<Setter> = Kind::ALL.iter().map(|k| mapper.setter(*k)).collect();
        assert_eq!(setters.len(), 9);

        assert_eq!(mapper.setter(Kind::Enum), Setter::Set);
        assert_eq!(mapper.setter(Kind::Float64), Setter::Set);
        assert_eq!(mapper.setter(Kind::Duration).as_str(), "set_duration");
        assert_eq!(mapper.setter(Kind::UintSlice).as_str(), "set_uint_slice");
        assert!(mapper.setter(Kind::Timestamp).is_fallible());
    }

    #[test]
    fn test_accessor_types() {
        let mapper = RustTypeMapper;

        assert_eq!(mapper.accessor_type(Kind::Enum), "String");
        assert_eq!(mapper.accessor_type(Kind::Int), "isize");
        assert_eq!(mapper.accessor_type(Kind::Uint64), "u64");
        assert_eq!(mapper.accessor_type(Kind::Duration), "std::time::Duration");
        assert_eq!(
            mapper.accessor_type(Kind::Timestamp),
            "Option<envflag_runtime::Timestamp>"
        );
        assert_eq!(mapper.accessor_type(Kind::IntSlice), "Option<Vec<isize>>");
        assert_eq!(mapper.accessor_type(Kind::Float64Slice), "Option<Vec<f64>>");
    }

    #[test]
    fn test_accessors_and_slices() {
        let mapper = RustTypeMapper;

        assert_eq!(mapper.accessor(Kind::Enum), "string");
        assert_eq!(mapper.accessor(Kind::Uint64Slice), "uint64_slice");

        let slices = Kind::ALL.iter().filter(|k| mapper.is_slice(**k)).count();
        assert_eq!(slices, 6);
    }
}
