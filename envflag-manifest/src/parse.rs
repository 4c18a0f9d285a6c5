//! Source parsing from files and strings.

use std::{collections::HashMap, fmt, path::Path, str::FromStr};

use envflag_runtime::{EnvName, Kind};
use log::{debug, warn};

use crate::{
    App, FlagSpec, Result, Source,
    error::SourceContext,
    source::{RawApp, RawFlag, RawSource},
};

/// Encoding of a flag source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Toml,
}

impl Format {
    /// Pick the format from a file extension: `.toml` is TOML, anything else YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Yaml,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => f.write_str("YAML"),
            Format::Toml => f.write_str("TOML"),
        }
    }
}

impl FromStr for Source {
    type Err = Box<crate::Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_source(s, "config.yaml", Format::Yaml)
    }
}

impl Source {
    /// Parse a flag source with a custom filename for error reporting.
    pub fn from_str_with_format(content: &str, filename: &str, format: Format) -> Result<Self> {
        parse_source(content, filename, format)
    }
}

/// Decode, validate and sort a flag source.
pub fn parse_source(content: &str, filename: &str, format: Format) -> Result<Source> {
    let ctx = SourceContext::new(content, filename);
    let raw: RawSource = match format {
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| ctx.yaml_error(e))?,
        Format::Toml => toml::from_str(content).map_err(|e| ctx.toml_error(e))?,
    };

    let app = build_app(raw.app, &ctx)?;

    // Resolved name -> mapping key, for duplicate detection
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut flags = Vec::with_capacity(raw.flags.len());
    for (key, raw_flag) in raw.flags {
        let flag = build_flag(&key, raw_flag, &ctx)?;
        if let Some(first_key) = seen.insert(flag.name.clone(), key.clone()) {
            return Err(ctx.duplicate_flag_error(&flag.name, &first_key, &key));
        }
        flags.push(flag);
    }

    flags.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("loaded {} flags for app {:?} from {filename}", flags.len(), app.name);

    Ok(Source { app, flags })
}

fn build_app(raw: RawApp, ctx: &SourceContext) -> Result<App> {
    if raw.name.trim().is_empty() {
        return Err(ctx.validation_error("app.name must not be empty", "app"));
    }
    if raw.env.is_empty() {
        return Err(ctx.validation_error(
            "app.env must declare at least one environment",
            "app",
        ));
    }

    let mut env: Vec<EnvName> = Vec::with_capacity(raw.env.len());
    for name in raw.env {
        if name.is_empty() {
            return Err(ctx.validation_error("environment names must not be empty", "env"));
        }
        if env.iter().any(|e| e.as_str() == name) {
            return Err(ctx.validation_error(format!("duplicate environment '{name}'"), &name));
        }
        env.push(EnvName::from(name));
    }

    Ok(App {
        name: raw.name,
        desc: raw.desc,
        env,
    })
}

fn build_flag(key: &str, raw: RawFlag, ctx: &SourceContext) -> Result<FlagSpec> {
    let name = raw
        .name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| key.to_string());

    let kind = Kind::from_str(&raw.kind)
        .map_err(|_| ctx.unsupported_kind_error(&name, &raw.kind))?;

    if kind == Kind::Enum && raw.variants.is_empty() {
        return Err(ctx.validation_error(
            format!("enum flag '{name}' must declare its variants with 'enum'"),
            key,
        ));
    }
    if kind != Kind::Enum && !raw.variants.is_empty() {
        warn!("flag {name:?} is of type {kind} and ignores its 'enum' variants");
    }

    Ok(FlagSpec {
        name,
        kind,
        variants: if kind == Kind::Enum {
            raw.variants
        } else {
            Vec::new()
        },
        desc: raw.desc,
        required: raw.required,
        aliases: raw.aliases,
        env: raw.env,
        value: raw.value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DefaultValue, EnvSources, EnvValue, Error, Scalar};

    const HEADER: &str = "app:\n  name: demo\n  env: [dev, prod]\n";

    fn parse(flags: &str) -> Result<Source> {
        format!("{HEADER}flags:\n{flags}").parse()
    }

    #[test]
    fn test_flags_are_sorted_by_name() {
        let source = parse(
            "  zeta:\n    type: string\n  alpha:\n    type: int\n  mike:\n    type: bool\n",
        )
        .unwrap();

        let names: Vec<_> = source.flags.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["alpha", "mike", "zeta"]);
    }

    #[test]
    fn test_name_falls_back_to_key() {
        let source = parse(
            "  port:\n    type: int\n  host:\n    flag: bind-host\n    type: string\n",
        )
        .unwrap();

        assert!(source.flag("port").is_some());
        assert!(source.flag("bind-host").is_some());
        assert!(source.flag("host").is_none());
    }

    #[test]
    fn test_full_flag() {
        let source = parse(concat!(
            "  mode:\n",
            "    type: enum\n",
            "    enum: [fast, slow]\n",
            "    desc: Run mode\n",
            "    required: true\n",
            "    aliases: [m]\n",
            "    env: [mode, run-mode]\n",
            "    value:\n",
            "      dev: fast\n",
            "      prod: slow\n",
        ))
        .unwrap();

        let mode = source.flag("mode").unwrap();
        assert_eq!(mode.kind, Kind::Enum);
        assert_eq!(mode.variants, ["fast", "slow"]);
        assert_eq!(mode.desc, "Run mode");
        assert!(mode.required);
        assert_eq!(mode.aliases, ["m"]);
        assert_eq!(
            mode.env,
            EnvSources::Extra(vec!["mode".into(), "run-mode".into()])
        );
        let Some(DefaultValue::PerEnvironment(map)) = &mode.value else {
            panic!("expected per-environment value");
        };
        assert_eq!(map["prod"], EnvValue::Scalar(Scalar::String("slow".into())));
    }

    #[test]
    fn test_unknown_kind_names_flag_and_kind() {
        let err = parse("  port:\n    type: integer\n").unwrap_err();

        assert!(matches!(
            *err,
            Error::UnsupportedKind { ref flag, ref kind, .. } if flag == "port" && kind == "integer"
        ));
        assert_eq!(err.to_string(), "unsupported type 'integer' for flag 'port'");
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = parse("  a:\n    flag: port\n    type: int\n  port:\n    type: int\n")
            .unwrap_err();
        assert!(matches!(*err, Error::DuplicateFlag { ref name, .. } if name == "port"));
    }

    #[test]
    fn test_enum_requires_variants() {
        let err = parse("  mode:\n    type: enum\n").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_app_validation() {
        let err = "app:\n  env: [dev]\n".parse::<Source>().unwrap_err();
        assert_eq!(err.to_string(), "app.name must not be empty");

        let err = "app:\n  name: demo\n".parse::<Source>().unwrap_err();
        assert_eq!(err.to_string(), "app.env must declare at least one environment");

        let err = "app:\n  name: demo\n  env: [dev, dev]\n"
            .parse::<Source>()
            .unwrap_err();
        assert_eq!(err.to_string(), "duplicate environment 'dev'");
    }

    #[test]
    fn test_missing_flags_section() {
        let source: Source = HEADER.parse().unwrap();
        assert!(source.flags.is_empty());
        assert_eq!(source.app.env, [EnvName::new("dev"), EnvName::new("prod")]);
    }

    #[test]
    fn test_parse_error_is_located() {
        let err = "app: [unclosed".parse::<Source>().unwrap_err();
        assert!(matches!(*err, Error::Parse { format: Format::Yaml, .. }));
    }

    #[test]
    fn test_toml_source() {
        let content = r#"
[app]
name = "demo"
env = ["dev", "prod"]

[flags.timeout]
type = "duration"
value = { dev = "1h", prod = "24h" }

[flags.hosts]
type = "stringSlice"
value = ["a", "b"]
env = false
"#;
        let source = Source::from_str_with_format(content, "config.toml", Format::Toml).unwrap();

        let names: Vec<_> = source.flags.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["hosts", "timeout"]);
        assert_eq!(source.flags[0].env, EnvSources::Disabled);
        assert_eq!(source.flags[1].kind, Kind::Duration);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path("config.toml"), Format::Toml);
        assert_eq!(Format::from_path("config.TOML"), Format::Toml);
        assert_eq!(Format::from_path("config.yaml"), Format::Yaml);
        assert_eq!(Format::from_path("config.yml"), Format::Yaml);
        assert_eq!(Format::from_path("config"), Format::Yaml);
    }
}
