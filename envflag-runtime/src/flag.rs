use clap::{Arg, ArgAction, ArgMatches, builder::PossibleValuesParser};

use crate::{Entry, Error, Kind, Result, Value, first_env_var};

/// Static description of one generated flag.
///
/// Generated modules declare one `FlagInfo` constant per flag and use it to
/// build the clap argument and to resolve the value given on the command
/// line or through the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagInfo {
    pub name: &'static str,
    pub kind: Kind,
    pub help: &'static str,
    /// Allowed labels of an enum flag.
    pub variants: &'static [&'static str],
    /// Environment variables read in order, the first non-empty one wins.
    pub env_vars: &'static [&'static str],
    pub aliases: &'static [&'static str],
    /// The flag must be given on the command line or through the environment.
    pub required: bool,
}

impl FlagInfo {
    /// Build the clap argument for this flag.
    ///
    /// One character aliases become short flags, longer ones long aliases.
    /// Values are validated with the same parser used for environment
    /// variables, so both sources accept the same text.
    pub fn arg(&self) -> Arg {
        let mut arg = Arg::new(self.name).long(self.name);
        if !self.help.is_empty() {
            arg = arg.help(self.help);
        }

        for alias in self.aliases {
            let mut chars = alias.chars();
            arg = match (chars.next(), chars.next()) {
                (Some(short), None) => arg.visible_short_alias(short),
                _ => arg.visible_alias(*alias),
            };
        }

        match self.kind {
            Kind::Bool => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .default_missing_value("true")
                .value_parser(text_parser(Kind::Bool)),
            Kind::Enum => arg.action(ArgAction::Set).value_parser(PossibleValuesParser::new(
                self.variants.iter().copied(),
            )),
            kind if kind.is_slice() => arg
                .action(ArgAction::Append)
                .value_delimiter(',')
                .value_parser(text_parser(kind)),
            kind => arg.action(ArgAction::Set).value_parser(text_parser(kind)),
        }
    }

    /// Apply the command line or environment value to `value`.
    ///
    /// The command line wins over the environment variables, which win over
    /// the declared defaults already in `value`. The resolved value replaces
    /// the default of the current environment.
    pub fn resolve(&self, value: &Value, matches: &ArgMatches) -> Result<()> {
        let text = self
            .cli_text(matches)
            .or_else(|| first_env_var(self.env_vars));

        match text {
            Some(text) => {
                value.insert(value.current(), self.parse(&text)?);
                Ok(())
            }
            None if self.required => Err(Error::MissingRequired(self.name.to_string())),
            None => Ok(()),
        }
    }

    /// Parse input text, restricting enum flags to their variants.
    fn parse(&self, text: &str) -> Result<Entry> {
        if self.kind == Kind::Enum && !self.variants.contains(&text) {
            return Err(Error::InvalidValue {
                kind: self.kind,
                text: text.to_string(),
            });
        }
        Entry::parse(self.kind, text)
    }

    fn cli_text(&self, matches: &ArgMatches) -> Option<String> {
        if self.kind.is_slice() {
            let values = matches.try_get_many::<String>(self.name).ok().flatten()?;
            Some(values.cloned().collect::<Vec<_>>().join(","))
        } else {
            matches.try_get_one::<String>(self.name).ok().flatten().cloned()
        }
    }
}

fn text_parser(kind: Kind) -> impl Fn(&str) -> Result<String> + Clone + Send + Sync + 'static {
    move |text: &str| Entry::parse(kind, text).map(|_| text.to_string())
}
