//! Error types for option resolution

use std::path::PathBuf;

use crate::domain::ValueSource;

/// Result type for resolution operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Fatal conditions raised while registering or resolving options.
///
/// A missing or unreadable config file is not an error: the loader skips it
/// and resolution carries on with whatever was already resolved.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("option '{name}' is already registered")]
    DuplicateOption { name: String },

    #[error("invalid option name '{name}': {reason}")]
    InvalidOptionName { name: String, reason: &'static str },

    #[error("unknown option '{name}' ({origin})")]
    UnknownOption { name: String, origin: ValueSource },

    #[error("unknown key in config file {}:{line}: {key}", path.display())]
    UnknownKey { path: PathBuf, line: usize, key: String },

    #[error("invalid value '{value}' for {name} ({origin}): {reason}")]
    InvalidValue {
        name: String,
        value: String,
        origin: ValueSource,
        reason: String,
    },

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn invalid_value(
        name: impl Into<String>,
        value: impl Into<String>,
        origin: ValueSource,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            name: name.into(),
            value: value.into(),
            origin,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_reports_path_and_line() {
        let err = ConfigError::UnknownKey {
            path: PathBuf::from("/tmp/x.conf"),
            line: 5,
            key: "bogus-key".to_string(),
        };
        assert_eq!(err.to_string(), "unknown key in config file /tmp/x.conf:5: bogus-key");
    }

    #[test]
    fn test_invalid_value_names_its_origin() {
        let err = ConfigError::invalid_value(
            "gen-config",
            "yes please",
            ValueSource::File { path: PathBuf::from("/etc/app.conf"), line: 3 },
            "invalid integer",
        );
        let msg = err.to_string();
        assert!(msg.contains("gen-config"));
        assert!(msg.contains("/etc/app.conf:3"));
        assert!(msg.contains("yes please"));
    }
}
