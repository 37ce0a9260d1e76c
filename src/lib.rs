//! conflayer: layered option resolution
//!
//! Merges option values from four sources into one settings object, with a
//! strict precedence order (later wins):
//!
//! 1. defaults declared in an [`OptionsRegistry`]
//! 2. programmatic [`Overrides`]
//! 3. a `key = value` config file
//! 4. command-line flags
//!
//! ```no_run
//! use conflayer::{resolve_process, Overrides, OptionsRegistry, Resolution};
//!
//! let registry = OptionsRegistry::new("mydaemon");
//! match resolve_process(&registry, Overrides::new().set("log_level", "DEBUG")) {
//!     Ok(Resolution::Resolved(options)) => {
//!         let _log = options.log_settings();
//!     }
//!     Ok(Resolution::GeneratedConfig { path, .. }) => {
//!         eprintln!("config file generated at {}", path.display());
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod registry;

pub use config::{resolve_process, Overrides, Resolution, Resolver};
pub use domain::{LogSettings, OptionSpec, OptionValue, ResolvedOptions, ValueSource};
pub use error::{ConfigError, Result};
pub use registry::{Builtins, OptionsRegistry};
