//! conflayer: resolve layered options for a program
//!
//! Reads defaults, the config file and command-line flags, then prints the
//! effective settings, or appends them to the config file with `--gen-config 1`.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
