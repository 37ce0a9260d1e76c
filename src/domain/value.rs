//! Option values and their provenance

use std::fmt;
use std::path::PathBuf;

/// A resolved scalar option value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionValue {
    /// No value; renders as the empty string
    #[default]
    Unset,
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl OptionValue {
    /// Truthiness used by flag-like options such as `gen-config`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Unset => false,
            Self::Text(text) => !text.is_empty() && text != "0",
            Self::Integer(n) => *n != 0,
            Self::Flag(flag) => *flag,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Where a resolved value came from, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    Default,
    Override,
    File { path: PathBuf, line: usize },
    Cli,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Override => f.write_str("override"),
            Self::File { path, line } => write!(f, "config file {}:{}", path.display(), line),
            Self::Cli => f.write_str("command line"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_renders_empty() {
        assert_eq!(OptionValue::Unset.to_string(), "");
        assert_eq!(OptionValue::from(None::<&str>), OptionValue::Unset);
    }

    #[test]
    fn test_truthiness() {
        assert!(!OptionValue::Integer(0).is_truthy());
        assert!(OptionValue::Integer(1).is_truthy());
        assert!(OptionValue::Integer(-1).is_truthy());
        assert!(!OptionValue::Text("0".into()).is_truthy());
        assert!(!OptionValue::Text(String::new()).is_truthy());
        assert!(OptionValue::Flag(true).is_truthy());
        assert!(!OptionValue::Unset.is_truthy());
    }

    #[test]
    fn test_file_source_display() {
        let source = ValueSource::File { path: PathBuf::from("/tmp/x.conf"), line: 5 };
        assert_eq!(source.to_string(), "config file /tmp/x.conf:5");
    }
}
