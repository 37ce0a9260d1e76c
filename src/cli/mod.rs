//! Command-line interface for conflayer
//!
//! Resolves the built-in options from the process arguments, then either
//! reports a generated config file or initializes logging and prints the
//! effective settings.

use std::ffi::OsStr;

use anyhow::Result;
use conflayer::{logging, ConfigError, Overrides, OptionsRegistry, Resolution, ResolvedOptions};

mod utils;

pub fn run() -> Result<()> {
    let argv0 = std::env::args_os().next();
    let program = utils::program_name(argv0.as_deref().and_then(OsStr::to_str));
    let registry = OptionsRegistry::new(program);

    let resolution = match conflayer::resolve_process(&registry, Overrides::new()) {
        Ok(resolution) => resolution,
        // Usage errors and --help: clap prints and picks the exit code.
        Err(ConfigError::Cli(err)) => err.exit(),
        Err(err) => return Err(err.into()),
    };

    match resolution {
        Resolution::GeneratedConfig { path, .. } => {
            eprintln!("config file generated at {}", path.display());
            Ok(())
        }
        Resolution::Resolved(options) => {
            logging::init_logging(&options.log_settings())?;
            tracing::info!(config = %options.config_path().display(), "configuration resolved");
            print_options(&options);
            Ok(())
        }
    }
}

/// One `name = value # source` line per option, readable by the config parser.
fn print_options(options: &ResolvedOptions) {
    for (name, value) in options.iter() {
        let source = options.source(name).map(ToString::to_string).unwrap_or_default();
        println!("{} = {} # {}", name, value, source);
    }
}
