//! Core value types shared by the registry, parser, merge engine and writer.

pub mod coerce;
mod log_settings;
mod resolved;
mod spec;
mod value;

pub use log_settings::{parse_level, LogSettings, SyslogFacility};
pub use resolved::ResolvedOptions;
pub use spec::{Coerce, OptionSpec};
pub use value::{OptionValue, ValueSource};
