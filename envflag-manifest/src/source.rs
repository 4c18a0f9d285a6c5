use envflag_runtime::{EnvName, Kind};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::{DefaultValue, EnvSources};

/// A decoded flag source: the application and its flags, sorted by name.
#[derive(Debug, Clone)]
pub struct Source {
    pub app: App,
    pub flags: Vec<FlagSpec>,
}

impl Source {
    /// Look up a flag by name.
    pub fn flag(&self, name: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub name: String,
    pub desc: String,
    /// Declared environments. The first one is the default.
    pub env: Vec<EnvName>,
}

/// One flag declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSpec {
    pub name: String,
    pub kind: Kind,
    /// Enum variants, only set for [`Kind::Enum`].
    pub variants: Vec<String>,
    pub desc: String,
    pub required: bool,
    pub aliases: Vec<String>,
    pub env: EnvSources,
    pub value: Option<DefaultValue>,
}

impl FlagSpec {
    /// A flag of `kind` with no default, description or aliases.
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            variants: Vec::new(),
            desc: String::new(),
            required: false,
            aliases: Vec::new(),
            env: EnvSources::Default,
            value: None,
        }
    }

    pub fn is_enum(&self) -> bool {
        self.kind == Kind::Enum
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSource {
    pub app: RawApp,
    #[serde(default)]
    pub flags: IndexMap<String, RawFlag>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawApp {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub env: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFlag {
    /// Overrides the mapping key as the flag name.
    #[serde(rename = "flag", default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "enum", default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub env: EnvSources,
    #[serde(default)]
    pub value: Option<DefaultValue>,
}
