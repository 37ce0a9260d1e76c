//! `%(name)s`-style log line templates
//!
//! Supported keys: `message`, `name` (event target), `module`, `levelname`,
//! `levelno`, `process`, `asctime`, `created`, `filename`, `pathname`,
//! `lineno`, `threadName`. Flags `-` and a width are honored; precision is
//! accepted and ignored. Unknown keys are written back verbatim.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field { key: String, left: bool, width: Option<usize>, raw: String },
}

/// A parsed log format template, usable as a `tracing-subscriber` event formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentFormat {
    segments: Vec<Segment>,
}

/// The data one log line is rendered from.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub level: Level,
    pub target: &'a str,
    pub module_path: Option<&'a str>,
    pub file: Option<&'a str>,
    pub line: Option<u32>,
    pub message: &'a str,
    pub timestamp: DateTime<Local>,
    pub pid: u32,
    pub thread_name: Option<&'a str>,
}

static FIELD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%%|%\((?P<key>[^)]*)\)(?P<flags>[-+ #0]*)(?P<width>\d*)(?:\.\d*)?[a-zA-Z]?")
        .expect("valid regex")
});

impl PercentFormat {
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in FIELD_PATTERN.captures_iter(template) {
            let whole = match caps.get(0) {
                Some(whole) => whole,
                None => continue,
            };
            literal.push_str(&template[last..whole.start()]);
            last = whole.end();

            // `%%`
            let key = match caps.name("key") {
                Some(key) => key,
                None => {
                    literal.push('%');
                    continue;
                }
            };
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            let flags = caps.name("flags").map_or("", |m| m.as_str());
            segments.push(Segment::Field {
                key: key.as_str().to_string(),
                left: flags.contains('-'),
                width: caps.name("width").and_then(|m| m.as_str().parse().ok()),
                raw: whole.as_str().to_string(),
            });
        }
        literal.push_str(&template[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    pub fn render(&self, record: &LogRecord<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { key, left, width, raw } => match field_value(key, record) {
                    Some(value) => pad(&mut out, &value, *left, *width),
                    None => out.push_str(raw),
                },
            }
        }
        out
    }
}

fn field_value(key: &str, record: &LogRecord<'_>) -> Option<String> {
    let value = match key {
        "message" => record.message.to_string(),
        "name" => record.target.to_string(),
        "module" => record
            .module_path
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or(record.target)
            .to_string(),
        "levelname" => level_name(&record.level).to_string(),
        "levelno" => level_number(&record.level).to_string(),
        "process" => record.pid.to_string(),
        "asctime" => record.timestamp.format("%Y-%m-%d %H:%M:%S,%3f").to_string(),
        "created" => format!("{:.6}", record.timestamp.timestamp_micros() as f64 / 1e6),
        "filename" => record
            .file
            .map(|file| file.rsplit(['/', '\\']).next().unwrap_or(file))
            .unwrap_or_default()
            .to_string(),
        "pathname" => record.file.unwrap_or_default().to_string(),
        "lineno" => record.line.unwrap_or(0).to_string(),
        "threadName" => record.thread_name.unwrap_or("unnamed").to_string(),
        _ => return None,
    };
    Some(value)
}

fn pad(out: &mut String, value: &str, left: bool, width: Option<usize>) {
    let fill = width.unwrap_or(0).saturating_sub(value.chars().count());
    if !left {
        out.extend(std::iter::repeat(' ').take(fill));
    }
    out.push_str(value);
    if left {
        out.extend(std::iter::repeat(' ').take(fill));
    }
}

pub fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

pub fn level_number(level: &Level) -> u8 {
    match *level {
        Level::ERROR => 40,
        Level::WARN => 30,
        Level::INFO => 20,
        Level::DEBUG => 10,
        Level::TRACE => 5,
    }
}

/// Collects the `message` field, then any other fields as ` key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    extra: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.extra, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.extra, " {}={:?}", field.name(), value);
        }
    }
}

impl<S, N> FormatEvent<S, N> for PercentFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let message = format!("{}{}", visitor.message, visitor.extra);

        let metadata = event.metadata();
        let thread = std::thread::current();
        let record = LogRecord {
            level: *metadata.level(),
            target: metadata.target(),
            module_path: metadata.module_path(),
            file: metadata.file(),
            line: metadata.line(),
            message: &message,
            timestamp: Local::now(),
            pid: std::process::id(),
            thread_name: thread.name(),
        };
        writeln!(writer, "{}", self.render(&record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str) -> LogRecord<'_> {
        LogRecord {
            level: Level::WARN,
            target: "mydaemon::net",
            module_path: Some("mydaemon::net::listener"),
            file: Some("src/net/listener.rs"),
            line: Some(42),
            message,
            timestamp: Local::now(),
            pid: 4242,
            thread_name: Some("main"),
        }
    }

    #[test]
    fn test_default_format() {
        let format = PercentFormat::parse(crate::registry::DEFAULT_LOG_FORMAT);
        assert_eq!(
            format.render(&record("listening")),
            "listener[4242]: mydaemon::net: listening"
        );
    }

    #[test]
    fn test_width_and_alignment() {
        let format = PercentFormat::parse("%(levelname)-8s|%(lineno)4d|%(message)s");
        assert_eq!(format.render(&record("x")), "WARNING |  42|x");
    }

    #[test]
    fn test_escaped_percent_and_unknown_keys() {
        let format = PercentFormat::parse("100%% %(funcName)s %(message)s %");
        assert_eq!(format.render(&record("done")), "100% %(funcName)s done %");
    }

    #[test]
    fn test_unterminated_key_is_literal() {
        let format = PercentFormat::parse("%(message");
        assert_eq!(format.render(&record("ignored")), "%(message");
    }

    #[test]
    fn test_file_fields() {
        let format = PercentFormat::parse("%(filename)s:%(pathname)s:%(levelno)d:%(threadName)s");
        assert_eq!(format.render(&record("")), "listener.rs:src/net/listener.rs:30:main");
    }

    #[test]
    fn test_asctime_has_millis() {
        let format = PercentFormat::parse("%(asctime)s");
        let rendered = format.render(&record(""));
        assert_eq!(rendered.len(), "2024-01-01 00:00:00,000".len());
        assert_eq!(&rendered[19..20], ",");
    }

    #[test]
    fn test_flags_and_precision_are_consumed() {
        let format = PercentFormat::parse("[%(levelname).3s] %(process)+06d %(message)r");
        assert_eq!(format.render(&record("up")), "[WARNING]   4242 up");
    }
}
