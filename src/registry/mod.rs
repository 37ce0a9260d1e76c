//! Option registry
//!
//! Declares the recognized options. Built once at startup; read-only afterwards.
//! The built-in options cover the config file location, logging and config
//! generation; applications register their own on top.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::{coerce, OptionSpec};
use crate::error::{ConfigError, Result};

pub const CONFIG: &str = "config";
pub const LOG_FILE: &str = "log-file";
pub const LOG_LEVEL: &str = "log-level";
pub const LOG_FORMAT: &str = "log-format";
pub const SYSLOG_FACILITY: &str = "syslog-facility";
pub const GEN_CONFIG: &str = "gen-config";

/// Options that describe the resolution itself and are never written out.
pub const HOUSEKEEPING: [&str; 2] = [CONFIG, GEN_CONFIG];

pub const DEFAULT_LOG_FORMAT: &str = "%(module)s[%(process)d]: %(name)s: %(message)s";

/// Names clap reserves for its own usage output.
const RESERVED: &[&str] = &["help"];

/// Which built-in options to declare, and with what defaults.
#[derive(Debug, Clone)]
pub struct Builtins {
    /// Register `syslog-facility`
    pub syslog_facility: bool,
    pub log_format: String,
}

impl Default for Builtins {
    fn default() -> Self {
        Self { syslog_facility: true, log_format: DEFAULT_LOG_FORMAT.to_string() }
    }
}

#[derive(Debug, Clone)]
pub struct OptionsRegistry {
    program: String,
    specs: BTreeMap<String, OptionSpec>,
}

impl OptionsRegistry {
    /// A registry with no options at all.
    pub fn empty(program: impl Into<String>) -> Self {
        Self { program: program.into(), specs: BTreeMap::new() }
    }

    /// A registry with every built-in option.
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_builtins(program, Builtins::default())
    }

    pub fn with_builtins(program: impl Into<String>, builtins: Builtins) -> Self {
        let mut registry = Self::empty(program);
        for spec in builtin_specs(&registry.program, &builtins) {
            registry.specs.insert(spec.name().to_string(), spec);
        }
        registry
    }

    pub fn register(&mut self, spec: OptionSpec) -> Result<()> {
        validate_name(spec.name())?;
        if self.specs.contains_key(spec.name()) {
            return Err(ConfigError::DuplicateOption { name: spec.name().to_string() });
        }
        self.specs.insert(spec.name().to_string(), spec);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&OptionSpec> {
        self.specs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// All specs sorted by name.
    pub fn all_specs(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.values()
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

pub fn default_config_path(program: &str) -> PathBuf {
    PathBuf::from(format!("/etc/{}.conf", program))
}

/// Map an internal name (`log_level`) to its external form (`log-level`).
pub fn normalize_name(name: &str) -> String {
    name.trim().replace('_', "-")
}

pub fn is_housekeeping(name: &str) -> bool {
    HOUSEKEEPING.contains(&name)
}

fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.starts_with('-') {
        Some("name must not start with '-'")
    } else if name.contains(|c: char| c.is_whitespace() || c == '=' || c == '#') {
        Some("name must not contain whitespace, '=' or '#'")
    } else if RESERVED.contains(&name) {
        Some("name is reserved")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigError::InvalidOptionName { name: name.to_string(), reason }),
        None => Ok(()),
    }
}

fn builtin_specs(program: &str, builtins: &Builtins) -> Vec<OptionSpec> {
    let mut specs = vec![
        OptionSpec::new(
            CONFIG,
            default_config_path(program).to_string_lossy().into_owned(),
            "config file path",
        ),
        OptionSpec::new(LOG_FILE, None::<String>, "log file path").coerce(coerce::optional_text),
        OptionSpec::new(
            LOG_LEVEL,
            "INFO",
            "log level; supported values: NOTSET, DEBUG, INFO, WARNING, ERROR, CRITICAL or number",
        )
        .coerce(coerce::log_level),
        OptionSpec::new(LOG_FORMAT, builtins.log_format.clone(), "log format"),
        OptionSpec::new(GEN_CONFIG, 0i64, "generate config and exit").coerce(coerce::integer),
    ];
    if builtins.syslog_facility {
        specs.push(
            OptionSpec::new(SYSLOG_FACILITY, None::<String>, "syslog facility")
                .coerce(coerce::syslog_facility),
        );
    }
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OptionValue;

    #[test]
    fn test_builtins_are_registered() {
        let registry = OptionsRegistry::new("mydaemon");
        let names: Vec<&str> = registry.all_specs().map(OptionSpec::name).collect();
        assert_eq!(
            names,
            vec!["config", "gen-config", "log-file", "log-format", "log-level", "syslog-facility"]
        );
        assert_eq!(
            registry.lookup(CONFIG).map(|s| s.default_value().clone()),
            Some(OptionValue::Text("/etc/mydaemon.conf".into()))
        );
        assert_eq!(registry.program(), "mydaemon");
    }

    #[test]
    fn test_syslog_facility_is_optional() {
        let builtins = Builtins { syslog_facility: false, ..Builtins::default() };
        let registry = OptionsRegistry::with_builtins("app", builtins);
        assert!(!registry.contains(SYSLOG_FACILITY));
        assert!(registry.contains(LOG_FORMAT));
    }

    #[test]
    fn test_custom_log_format_default() {
        let builtins = Builtins { log_format: "%(message)s".into(), ..Builtins::default() };
        let registry = OptionsRegistry::with_builtins("app", builtins);
        assert_eq!(
            registry.lookup(LOG_FORMAT).map(|s| s.default_value().to_string()),
            Some("%(message)s".to_string())
        );
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = OptionsRegistry::new("app");
        let err = registry.register(OptionSpec::new("log-level", "DEBUG", "again")).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateOption { ref name } if name == "log-level"));
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = OptionsRegistry::new("app");
        registry.register(OptionSpec::new("listen-port", 8080i64, "port to listen on")).unwrap();
        let spec = registry.lookup("listen-port").expect("registered");
        assert_eq!(spec.help(), "port to listen on");
        assert!(registry.lookup("listen_port").is_none());
    }

    #[test]
    fn test_rejects_unusable_names() {
        let mut registry = OptionsRegistry::empty("app");
        for name in ["", "--port", "two words", "a=b", "x#y", "help"] {
            let err = registry.register(OptionSpec::new(name, "", "")).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidOptionName { .. }), "accepted {:?}", name);
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_normalizes_internal_names() {
        assert_eq!(normalize_name("log_level"), "log-level");
        assert_eq!(normalize_name("gen-config"), "gen-config");
    }
}
