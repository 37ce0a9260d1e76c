//! Option declarations

use super::value::OptionValue;

/// Converts raw text (from a config file, an override or a flag) into a typed value.
///
/// The error string is the human-readable reason, wrapped later with source context.
pub type Coerce = fn(&str) -> Result<OptionValue, String>;

/// A single recognized option: name, default, optional coercion and help text.
///
/// Help text is kept on one line, since the config writer emits it as a
/// trailing comment.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    name: String,
    default: OptionValue,
    coerce: Option<Coerce>,
    help: String,
}

impl OptionSpec {
    pub fn new(
        name: impl Into<String>,
        default: impl Into<OptionValue>,
        help: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), default: default.into(), coerce: None, help: flatten_help(help) }
    }

    pub fn coerce(mut self, coerce: Coerce) -> Self {
        self.coerce = Some(coerce);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &OptionValue {
        &self.default
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn has_coercion(&self) -> bool {
        self.coerce.is_some()
    }

    /// Apply the declared coercion, or keep the text as-is when there is none.
    pub fn coerce_value(&self, raw: &str) -> Result<OptionValue, String> {
        match self.coerce {
            Some(coerce) => coerce(raw),
            None => Ok(OptionValue::Text(raw.to_string())),
        }
    }
}

fn flatten_help(help: impl Into<String>) -> String {
    let help: String = help.into();
    help.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coerce;

    #[test]
    fn test_uncoerced_values_stay_text() {
        let spec = OptionSpec::new("log-format", "%(message)s", "log format");
        assert_eq!(spec.coerce_value(" a b ").unwrap(), OptionValue::Text(" a b ".into()));
        assert!(!spec.has_coercion());
    }

    #[test]
    fn test_multiline_help_is_flattened() {
        let spec = OptionSpec::new("workers", 1i64, "worker count\nbogus-key = 1\r\n  more");
        assert_eq!(spec.help(), "worker count bogus-key = 1 more");
    }

    #[test]
    fn test_coercion_is_applied() {
        let spec = OptionSpec::new("gen-config", 0i64, "generate config and exit")
            .coerce(coerce::integer);
        assert!(spec.has_coercion());
        assert_eq!(spec.coerce_value("3").unwrap(), OptionValue::Integer(3));
        assert!(spec.coerce_value("three").is_err());
    }
}
