//! Config file parser
//!
//! Line-oriented `key = value` / `key value` format:
//! - `#` starts a comment anywhere on a line, quoted or not
//! - the first `=` splits key from value; without one, the first space does
//! - lines with neither delimiter are ignored
//! - keys must be registered options

use std::path::Path;

use crate::domain::{OptionValue, ValueSource};
use crate::error::{ConfigError, Result};
use crate::registry::OptionsRegistry;

pub const COMMENT_CHAR: char = '#';
pub const OPTION_CHAR: char = '=';
pub const ALT_OPTION_CHAR: char = ' ';

/// One key/value pair as it appeared in the file, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConfigLine<'a> {
    /// 1-based
    pub line_number: usize,
    pub key: &'a str,
    pub value: &'a str,
}

/// A validated, coerced entry ready to be folded into the resolved options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub name: String,
    pub value: OptionValue,
    pub line: usize,
}

/// Strip the comment, trim, and split one line into key and value.
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    let line = match line.find(COMMENT_CHAR) {
        Some(idx) => &line[..idx],
        None => line,
    };
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (key, value) = line.split_once(OPTION_CHAR).or_else(|| line.split_once(ALT_OPTION_CHAR))?;
    Some((key.trim(), value.trim()))
}

pub fn raw_lines(text: &str) -> impl Iterator<Item = RawConfigLine<'_>> {
    text.lines().enumerate().filter_map(|(idx, line)| {
        let (key, value) = split_line(line)?;
        Some(RawConfigLine { line_number: idx + 1, key, value })
    })
}

/// Parse and validate the whole file. The first unknown key or bad value aborts.
pub fn parse_str(registry: &OptionsRegistry, path: &Path, text: &str) -> Result<Vec<ParsedEntry>> {
    raw_lines(text)
        .map(|raw| -> Result<ParsedEntry> {
            let spec = registry.lookup(raw.key).ok_or_else(|| ConfigError::UnknownKey {
                path: path.to_path_buf(),
                line: raw.line_number,
                key: raw.key.to_string(),
            })?;

            let value = spec.coerce_value(raw.value).map_err(|reason| {
                let origin = ValueSource::File { path: path.to_path_buf(), line: raw.line_number };
                ConfigError::invalid_value(raw.key, raw.value, origin, reason)
            })?;

            Ok(ParsedEntry { name: raw.key.to_string(), value, line: raw.line_number })
        })
        .collect()
}
