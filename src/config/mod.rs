//! Configuration loading and merging
//!
//! Handles loading from the key=value config file, programmatic overrides and
//! CLI arguments with proper precedence (CLI > File > Overrides > Defaults).

pub mod args;
pub mod loader;
pub mod merge;
pub mod parser;
pub mod writer;

pub use args::{build_command, CliValues};
pub use loader::load_config;
pub use merge::{resolve_process, Overrides, Resolution, Resolver};
pub use parser::{parse_str, split_line, ParsedEntry, RawConfigLine};
pub use writer::{append_config, render};
