//! The resolved options mapping

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::log_settings::LogSettings;
use super::value::{OptionValue, ValueSource};
use crate::registry::{self, OptionsRegistry};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    value: OptionValue,
    source: ValueSource,
}

/// Every registered option mapped to its current value and the source that set it.
///
/// Always complete: built from the registry defaults, then overwritten key by
/// key. Only the merge engine writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    entries: BTreeMap<String, Entry>,
}

impl ResolvedOptions {
    pub(crate) fn from_defaults(registry: &OptionsRegistry) -> Self {
        let entries = registry
            .all_specs()
            .map(|spec| {
                let entry =
                    Entry { value: spec.default_value().clone(), source: ValueSource::Default };
                (spec.name().to_string(), entry)
            })
            .collect();
        Self { entries }
    }

    /// Overwrite a registered key. Unregistered names never reach this point;
    /// callers validate against the registry first.
    pub(crate) fn set(&mut self, name: &str, value: OptionValue, source: ValueSource) {
        debug_assert!(self.entries.contains_key(name), "unregistered option '{}'", name);
        if let Some(entry) = self.entries.get_mut(name) {
            entry.value = value;
            entry.source = source;
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(name).map(|entry| &entry.value)
    }

    pub fn source(&self, name: &str) -> Option<&ValueSource> {
        self.entries.get(name).map(|entry| &entry.source)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(OptionValue::as_int)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(OptionValue::as_bool)
    }

    /// Iterate in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), &entry.value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config_path(&self) -> PathBuf {
        PathBuf::from(self.text(registry::CONFIG))
    }

    pub fn gen_config_requested(&self) -> bool {
        self.get(registry::GEN_CONFIG).is_some_and(OptionValue::is_truthy)
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.text(registry::LOG_LEVEL),
            file: self.non_empty(registry::LOG_FILE).map(PathBuf::from),
            format: self.text(registry::LOG_FORMAT),
            syslog_facility: self.non_empty(registry::SYSLOG_FACILITY),
        }
    }

    fn text(&self, name: &str) -> String {
        self.get(name).map(ToString::to_string).unwrap_or_default()
    }

    fn non_empty(&self, name: &str) -> Option<String> {
        Some(self.text(name)).filter(|text| !text.is_empty())
    }
}
