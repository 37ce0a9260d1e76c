//! Config file generation
//!
//! Output is the parser's own format: a header comment, then one
//! `name = value # help` line per option, sorted by name. Values are written
//! unquoted, so a value containing `#` will not read back intact.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::domain::ResolvedOptions;
use crate::error::{ConfigError, Result};
use crate::registry::{is_housekeeping, OptionsRegistry};

/// Render the config text for `options`, skipping `config` and `gen-config`.
pub fn render(registry: &OptionsRegistry, options: &ResolvedOptions) -> String {
    let mut out = format!("# {} config file\n\n", registry.program());
    for spec in registry.all_specs().filter(|spec| !is_housekeeping(spec.name())) {
        let value = options.get(spec.name()).map(ToString::to_string).unwrap_or_default();
        out.push_str(&format!("{} = {} # {}\n", spec.name(), value, spec.help()));
    }
    out
}

/// Append the rendered config to `path`, creating the file if needed.
/// Existing content is never truncated.
pub fn append_config(
    registry: &OptionsRegistry,
    options: &ResolvedOptions,
    path: &Path,
) -> Result<()> {
    let text = render(registry, options);
    let write_err =
        |source: std::io::Error| ConfigError::Write { path: path.to_path_buf(), source };

    let mut file = OpenOptions::new().create(true).append(true).open(path).map_err(write_err)?;
    file.write_all(text.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    Ok(())
}
