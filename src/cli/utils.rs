//! Shared CLI utilities.

use std::path::Path;

/// Program name from the invoked binary path, falling back to the package name.
pub fn program_name(argv0: Option<&str>) -> String {
    argv0
        .and_then(|arg| Path::new(arg).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(env!("CARGO_PKG_NAME"))
        .to_string()
}
