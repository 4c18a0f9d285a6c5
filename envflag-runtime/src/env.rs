use std::{borrow::Borrow, borrow::Cow, fmt};

use crate::{Error, Result};

/// Name of a deployment environment such as `dev` or `prod`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnvName(Cow<'static, str>);

impl EnvName {
    /// Create an environment name usable in `const` items.
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnvName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EnvName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EnvName {
    fn from(name: &str) -> Self {
        Self(Cow::Owned(name.to_string()))
    }
}

impl From<String> for EnvName {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&EnvName> for EnvName {
    fn from(name: &EnvName) -> Self {
        name.clone()
    }
}

/// Pick the active environment.
///
/// An absent or empty request selects the first declared environment;
/// otherwise the request must name one of `environments`.
pub fn select_env(requested: Option<&str>, environments: &[EnvName]) -> Result<EnvName> {
    let first = environments.first().ok_or(Error::NoEnvironments)?;

    match requested.filter(|name| !name.is_empty()) {
        None => Ok(first.clone()),
        Some(name) => environments
            .iter()
            .find(|env| env.as_str() == name)
            .cloned()
            .ok_or_else(|| Error::InvalidEnvironment {
                name: name.to_string(),
                expected: environments
                    .iter()
                    .map(EnvName::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
    }
}

/// Pick the active environment from the process environment variable `key`.
pub fn current_env(key: &str, environments: &[EnvName]) -> Result<EnvName> {
    let requested = std::env::var(key).ok();
    select_env(requested.as_deref(), environments)
}

/// Value of the first variable in `names` that is set to a non-empty string.
pub fn first_env_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|value| !value.is_empty()))
}
