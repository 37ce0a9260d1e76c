//! Four-stage merge engine
//!
//! Stages, lowest precedence first:
//! 1. Registry defaults
//! 2. Programmatic overrides
//! 3. Config file (path from `--config` if given, else the value resolved so far)
//! 4. Command-line flags
//!
//! Each stage overwrites whole values per key; nothing is merged or concatenated.

use std::ffi::OsString;
use std::path::PathBuf;

use super::args::CliValues;
use super::loader::load_config;
use super::writer::append_config;
use crate::domain::{OptionValue, ResolvedOptions, ValueSource};
use crate::error::{ConfigError, Result};
use crate::registry::{self, OptionsRegistry};

/// Caller-supplied values, applied after defaults and before the config file.
///
/// Names may use the internal `_` form (`log_level`); they are normalized to
/// the external `-` form on application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    entries: Vec<(String, OptionValue)>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.push((name.into(), value.into()));
    }

}

impl<K, V> FromIterator<(K, V)> for Overrides
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (name, value) in iter {
            overrides.insert(name, value);
        }
        overrides
    }
}

/// Outcome of a resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Normal completion; the options are final.
    Resolved(ResolvedOptions),
    /// `gen-config` was set: the config was appended to `path` and the caller
    /// should stop.
    GeneratedConfig { path: PathBuf, options: ResolvedOptions },
}

impl Resolution {
    pub fn options(&self) -> &ResolvedOptions {
        match self {
            Self::Resolved(options) | Self::GeneratedConfig { options, .. } => options,
        }
    }
}

/// Drives one resolution over a registry.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    registry: &'a OptionsRegistry,
    overrides: Overrides,
    args: Option<Vec<OsString>>,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a OptionsRegistry) -> Self {
        Self { registry, overrides: Overrides::default(), args: None }
    }

    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Process arguments, program name first. Without this the command-line
    /// stage is skipped.
    pub fn args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn resolve(self) -> Result<Resolution> {
        let mut options = ResolvedOptions::from_defaults(self.registry);

        self.apply_overrides(&mut options)?;

        // Flags are parsed up front so `--config` can redirect the file read;
        // their values are applied after the file.
        let cli = match &self.args {
            Some(args) => Some(CliValues::parse(self.registry, args)?),
            None => None,
        };

        let config_path = cli
            .as_ref()
            .and_then(|cli| cli.get(registry::CONFIG))
            .map(|value| PathBuf::from(value.to_string()))
            .unwrap_or_else(|| options.config_path());
        if let Some(entries) = load_config(self.registry, &config_path)? {
            for entry in entries {
                let source = ValueSource::File { path: config_path.clone(), line: entry.line };
                options.set(&entry.name, entry.value, source);
            }
        }

        if let Some(cli) = cli {
            for (name, value) in cli.into_values() {
                options.set(&name, value, ValueSource::Cli);
            }
        }

        if options.gen_config_requested() {
            let path = options.config_path();
            append_config(self.registry, &options, &path)?;
            tracing::debug!("Generated config at {}", path.display());
            return Ok(Resolution::GeneratedConfig { path, options });
        }

        Ok(Resolution::Resolved(options))
    }

    fn apply_overrides(&self, options: &mut ResolvedOptions) -> Result<()> {
        for (raw_name, value) in &self.overrides.entries {
            let name = registry::normalize_name(raw_name);
            let spec = self.registry.lookup(&name).ok_or_else(|| ConfigError::UnknownOption {
                name: raw_name.clone(),
                origin: ValueSource::Override,
            })?;

            // Typed values are checked through their text form, same as a flag.
            let value = if spec.has_coercion() {
                let raw = value.to_string();
                spec.coerce_value(&raw).map_err(|reason| {
                    ConfigError::invalid_value(&name, raw, ValueSource::Override, reason)
                })?
            } else {
                value.clone()
            };
            options.set(&name, value, ValueSource::Override);
        }
        Ok(())
    }
}

/// Resolve with overrides and the current process arguments.
pub fn resolve_process(registry: &OptionsRegistry, overrides: Overrides) -> Result<Resolution> {
    Resolver::new(registry).overrides(overrides).args(std::env::args_os()).resolve()
}
