//! Logging collaborator
//!
//! Installs a global `tracing` subscriber from resolved [`LogSettings`]:
//! - syslog when a facility is set
//! - a log file (appended) when a path is set
//! - stderr when neither is set
//!
//! Every sink shares the same level and line template.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

use crate::domain::{LogSettings, SyslogFacility};

mod format;
#[cfg(unix)]
mod syslog;

pub use format::{level_name, level_number, LogRecord, PercentFormat};
#[cfg(unix)]
pub use syslog::{priority, SyslogMakeWriter, SYSLOG_SOCKET};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Build the sinks described by `settings`, without installing anything.
pub fn build_layers(settings: &LogSettings) -> Result<Vec<BoxedLayer>> {
    let format = PercentFormat::parse(&settings.format);
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if let Some(name) = &settings.syslog_facility {
        let facility =
            settings.facility().ok_or_else(|| anyhow!("Unknown syslog facility: {}", name))?;
        layers.push(syslog_layer(facility, format.clone())?);
    }

    if let Some(path) = &settings.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed opening log file: {}", path.display()))?;
        layers.push(
            fmt::layer()
                .event_format(format.clone())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .boxed(),
        );
    }

    if layers.is_empty() {
        layers.push(
            fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(std::io::stderr)
                .boxed(),
        );
    }

    Ok(layers)
}

/// Install the global subscriber. A subscriber that is already installed is left alone.
pub fn init_logging(settings: &LogSettings) -> Result<()> {
    let level = settings
        .level_filter()
        .ok_or_else(|| anyhow!("Unsupported log level: {}", settings.level))?;
    let layers = build_layers(settings)?;

    let filter = EnvFilter::builder().with_default_directive(level.into()).parse_lossy("");
    let _ = tracing_subscriber::registry().with(layers).with(filter).try_init();
    Ok(())
}

#[cfg(unix)]
fn syslog_layer(facility: SyslogFacility, format: PercentFormat) -> Result<BoxedLayer> {
    let writer = SyslogMakeWriter::connect(facility)
        .with_context(|| format!("Failed connecting to syslog at {}", SYSLOG_SOCKET))?;
    Ok(fmt::layer().event_format(format).with_ansi(false).with_writer(writer).boxed())
}

#[cfg(not(unix))]
fn syslog_layer(facility: SyslogFacility, _format: PercentFormat) -> Result<BoxedLayer> {
    Err(anyhow!("Syslog facility {:?} requested, but syslog is only available on Unix", facility))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn settings() -> LogSettings {
        LogSettings {
            level: "INFO".to_string(),
            file: None,
            format: crate::registry::DEFAULT_LOG_FORMAT.to_string(),
            syslog_facility: None,
        }
    }

    #[test]
    fn test_stderr_is_the_fallback_sink() {
        let layers = build_layers(&settings()).expect("layers");
        assert_eq!(layers.len(), 1);
    }

    #[test]
    fn test_file_sink_creates_the_file() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.log");
        let layers =
            build_layers(&LogSettings { file: Some(path.clone()), ..settings() }).expect("layers");
        assert_eq!(layers.len(), 1);
        assert!(path.exists());
    }

    #[test]
    fn test_unopenable_log_file_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let path: PathBuf = tmp.path().join("no-such-dir").join("app.log");
        let err = build_layers(&LogSettings { file: Some(path), ..settings() })
            .err()
            .expect("opening the log file should fail");
        assert!(err.to_string().contains("Failed opening log file"));
    }

    #[test]
    fn test_bad_level_is_rejected_before_installing() {
        let err = init_logging(&LogSettings { level: "chatty".to_string(), ..settings() })
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported log level"));
    }

    #[test]
    fn test_unknown_facility_is_rejected() {
        let settings = LogSettings { syslog_facility: Some("local42".to_string()), ..settings() };
        assert!(build_layers(&settings).is_err());
    }
}
