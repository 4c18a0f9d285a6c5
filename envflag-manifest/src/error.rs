use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::Format;

/// Result type for source loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source text and filename carried into diagnostics.
#[derive(Debug, Clone)]
pub(crate) struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    #[cfg(test)]
    fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a YAML decoding error.
    pub fn yaml_error(&self, source: serde_yaml::Error) -> Box<Error> {
        let span = source
            .location()
            .map(|loc| SourceSpan::from((loc.index(), 0)));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            format: Format::Yaml,
            message: source.to_string(),
        })
    }

    /// Create a parse error from a TOML decoding error.
    pub fn toml_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            format: Format::Toml,
            message: source.message().to_string(),
        })
    }

    /// Create a validation error, pointing at `needle` when it occurs in the source.
    pub fn validation_error(&self, message: impl Into<String>, needle: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: self.find_key(needle),
            message: message.into(),
        })
    }

    pub fn unsupported_kind_error(&self, flag: &str, kind: &str) -> Box<Error> {
        Box::new(Error::UnsupportedKind {
            src: self.named_source(),
            span: self.find_value(kind),
            flag: flag.to_string(),
            kind: kind.to_string(),
        })
    }

    pub fn duplicate_flag_error(
        &self,
        name: &str,
        first_key: &str,
        second_key: &str,
    ) -> Box<Error> {
        Box::new(Error::DuplicateFlag {
            src: self.named_source(),
            first_span: self.find_key(first_key),
            second_span: self.find_key(second_key),
            name: name.to_string(),
        })
    }

    /// Locate a mapping key in YAML (`key:`) or TOML (`key =`, `.key]`) text.
    pub fn find_key(&self, key: &str) -> Option<SourceSpan> {
        if key.is_empty() {
            return None;
        }

        let patterns = [
            format!("\n{key}:"),
            format!(" {key}:"),
            format!("\"{key}\":"),
            format!(".{key}]"),
            format!("\n{key} ="),
            format!("\n{key}="),
        ];
        // Every pattern carries one leading character before the key
        if let Some(pos) = patterns.iter().find_map(|p| self.src.find(p.as_str())) {
            return Some(SourceSpan::from((pos + 1, key.len())));
        }

        self.src
            .find(key)
            .map(|pos| SourceSpan::from((pos, key.len())))
    }

    /// Locate a scalar value written after `type` in either format.
    fn find_value(&self, value: &str) -> Option<SourceSpan> {
        if value.is_empty() {
            return None;
        }

        let patterns = [
            format!("type: {value}"),
            format!("type: \"{value}\""),
            format!("type: '{value}'"),
            format!("type = \"{value}\""),
            format!("type = '{value}'"),
        ];
        patterns.iter().find_map(|pattern| {
            self.src.find(pattern.as_str()).map(|pos| {
                let quote = usize::from(pattern.ends_with(['"', '\'']));
                let start = pos + pattern.len() - value.len() - quote;
                SourceSpan::from((start, value.len()))
            })
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help(
        "pass the flag source with --source, e.g. 'envflag generate --source config.yaml'"
    ))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {format} source: {message}")]
    #[diagnostic(code(envflag::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        format: Format,
        message: String,
    },

    #[error("unsupported type '{kind}' for flag '{flag}'")]
    #[diagnostic(
        code(envflag::unsupported_kind),
        help(
            "valid types are: string, stringSlice, enum, bool, int, uint, int64, uint64, intSlice, uintSlice, int64Slice, uint64Slice, float64, float64Slice, duration, timestamp"
        )
    )]
    UnsupportedKind {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown type")]
        span: Option<SourceSpan>,
        flag: String,
        kind: String,
    },

    #[error("duplicate flag '{name}'")]
    #[diagnostic(
        code(envflag::duplicate_flag),
        help("flag names must be unique; rename one of them with the 'flag' key")
    )]
    DuplicateFlag {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: Option<SourceSpan>,
        #[label("declared again here")]
        second_span: Option<SourceSpan>,
        name: String,
    },

    #[error("{message}")]
    #[diagnostic(code(envflag::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_key_in_yaml() {
        let src = "app:\n  name: demo\nflags:\n  port:\n    type: int\n";
        let ctx = SourceContext::new(src, "c.yaml");
        let span = ctx.find_key("port").unwrap();
        assert_eq!(&ctx.src()[span.offset()..span.offset() + span.len()], "port");
    }

    #[test]
    fn test_find_key_in_toml() {
        let src = "[app]\nname = \"demo\"\n\n[flags.port]\ntype = \"int\"\n";
        let ctx = SourceContext::new(src, "c.toml");
        let span = ctx.find_key("port").unwrap();
        assert_eq!(span.offset(), ctx.src().find("port]").unwrap());
    }

    #[test]
    fn test_find_kind_value() {
        let ctx = SourceContext::new("flags:\n  port:\n    type: integer\n", "c.yaml");
        let err = ctx.unsupported_kind_error("port", "integer");
        let Error::UnsupportedKind { span: Some(span), .. } = *err else {
            panic!("expected a located error");
        };
        assert_eq!(&ctx.src()[span.offset()..span.offset() + span.len()], "integer");

        let ctx = SourceContext::new("[flags.port]\ntype = \"integer\"\n", "c.toml");
        let err = ctx.unsupported_kind_error("port", "integer");
        let Error::UnsupportedKind { span: Some(span), .. } = *err else {
            panic!("expected a located error");
        };
        assert_eq!(&ctx.src()[span.offset()..span.offset() + span.len()], "integer");
    }
}
