//! Command-line flags derived from the registry
//!
//! Every registered option becomes `--<name> <VALUE>`. clap supplies `--help`,
//! unknown-argument and missing-value errors.

use std::ffi::OsString;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::domain::{OptionValue, ValueSource};
use crate::error::{ConfigError, Result};
use crate::registry::{self, OptionsRegistry};

/// Build the clap command for a registry.
pub fn build_command(registry: &OptionsRegistry) -> Command {
    let mut command = Command::new(registry.program().to_string())
        .about(format!(
            "Options are read from defaults, the config file (--{}) and the command line, \
             later sources overriding earlier ones",
            registry::CONFIG
        ))
        .args_override_self(true);

    for spec in registry.all_specs() {
        command = command.arg(
            Arg::new(spec.name().to_string())
                .long(spec.name().to_string())
                .value_name("VALUE")
                .num_args(1)
                .allow_negative_numbers(true)
                .action(ArgAction::Set)
                .help(spec.help().to_string()),
        );
    }
    command
}

/// Values given on the command line, already coerced, in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliValues {
    values: Vec<(String, OptionValue)>,
}

impl CliValues {
    /// Parse `args` (including the program name in first position).
    pub fn parse<I, T>(registry: &OptionsRegistry, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = build_command(registry).try_get_matches_from(args)?;
        Self::from_matches(registry, &matches)
    }

    fn from_matches(registry: &OptionsRegistry, matches: &ArgMatches) -> Result<Self> {
        let mut values = Vec::new();
        for spec in registry.all_specs() {
            let Some(raw) = matches.get_one::<String>(spec.name()) else {
                continue;
            };
            let value = spec.coerce_value(raw).map_err(|reason| {
                ConfigError::invalid_value(spec.name(), raw.as_str(), ValueSource::Cli, reason)
            })?;
            values.push((spec.name().to_string(), value));
        }
        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, value)| value)
    }

    pub fn into_values(self) -> Vec<(String, OptionValue)> {
        self.values
    }
}
