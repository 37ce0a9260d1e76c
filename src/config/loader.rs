//! Config file loading

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::parser::{parse_str, ParsedEntry};
use crate::error::Result;
use crate::registry::OptionsRegistry;

/// Read and parse the config file at `path`.
///
/// Returns `Ok(None)` when the file is missing or unreadable: having no config
/// file is normal. Parse errors inside a readable file are fatal.
pub fn load_config(registry: &OptionsRegistry, path: &Path) -> Result<Option<Vec<ParsedEntry>>> {
    let Some(content) = read_config_file(path) else {
        return Ok(None);
    };

    let entries = parse_str(registry, path, &content)?;
    tracing::debug!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(Some(entries))
}

/// The whole file is read and the handle released before parsing starts.
fn read_config_file(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No config file at {}", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Skipping unreadable config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OptionValue;
    use crate::error::ConfigError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let registry = OptionsRegistry::new("app");
        let loaded = load_config(&registry, &tmp.path().join("absent.conf")).expect("no error");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_directory_is_skipped() {
        let tmp = TempDir::new().expect("tmp");
        let registry = OptionsRegistry::new("app");
        let loaded = load_config(&registry, tmp.path()).expect("no error");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_loads_entries() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.conf");
        fs::write(&path, "# app config\n\nlog-level = DEBUG\nlog-file /var/log/app.log\n")
            .expect("write");

        let registry = OptionsRegistry::new("app");
        let entries = load_config(&registry, &path).expect("config").expect("present");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "log-level");
        assert_eq!(entries[1].value, OptionValue::Text("/var/log/app.log".into()));
    }

    #[test]
    fn test_unknown_key_is_fatal() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.conf");
        fs::write(&path, "log-level = DEBUG\nnot-an-option = 1\n").expect("write");

        let registry = OptionsRegistry::new("app");
        let err = load_config(&registry, &path).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey { line: 2, .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }
}
