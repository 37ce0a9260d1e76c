//! Logging settings handed to the logging collaborator
//!
//! Level names and numbers follow the classic numeric scale
//! (NOTSET=0, DEBUG=10, INFO=20, WARNING=30, ERROR=40, CRITICAL=50).

use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Resolved logging configuration. Produced by the core, consumed by
/// [`crate::logging::init_logging`]; the core never installs a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub file: Option<PathBuf>,
    pub format: String,
    pub syslog_facility: Option<String>,
}

impl LogSettings {
    pub fn level_filter(&self) -> Option<LevelFilter> {
        parse_level(&self.level)
    }

    pub fn facility(&self) -> Option<SyslogFacility> {
        self.syslog_facility.as_deref().and_then(SyslogFacility::from_name)
    }
}

/// Parse a level name (case-insensitive) or a non-negative number.
pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    let raw = raw.trim();
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        let number: u64 = raw.parse().ok()?;
        return Some(match number {
            0..=5 => LevelFilter::TRACE,
            6..=10 => LevelFilter::DEBUG,
            11..=20 => LevelFilter::INFO,
            21..=30 => LevelFilter::WARN,
            31..=50 => LevelFilter::ERROR,
            _ => LevelFilter::OFF,
        });
    }

    match raw.to_ascii_uppercase().as_str() {
        "NOTSET" | "TRACE" => Some(LevelFilter::TRACE),
        "DEBUG" => Some(LevelFilter::DEBUG),
        "INFO" => Some(LevelFilter::INFO),
        "WARNING" | "WARN" => Some(LevelFilter::WARN),
        "ERROR" | "CRITICAL" | "FATAL" => Some(LevelFilter::ERROR),
        _ => None,
    }
}

/// Syslog facilities by their conventional names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyslogFacility {
    Kern,
    User,
    Mail,
    Daemon,
    Auth,
    Syslog,
    Lpr,
    News,
    Uucp,
    Cron,
    AuthPriv,
    Ftp,
    /// `local0` through `local7`
    Local(u8),
}

impl SyslogFacility {
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let facility = match name.as_str() {
            "kern" => Self::Kern,
            "user" => Self::User,
            "mail" => Self::Mail,
            "daemon" => Self::Daemon,
            "auth" | "security" => Self::Auth,
            "syslog" => Self::Syslog,
            "lpr" => Self::Lpr,
            "news" => Self::News,
            "uucp" => Self::Uucp,
            "cron" => Self::Cron,
            "authpriv" => Self::AuthPriv,
            "ftp" => Self::Ftp,
            other => {
                let n: u8 = other.strip_prefix("local")?.parse().ok()?;
                if n > 7 {
                    return None;
                }
                Self::Local(n)
            }
        };
        Some(facility)
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Kern => 0,
            Self::User => 1,
            Self::Mail => 2,
            Self::Daemon => 3,
            Self::Auth => 4,
            Self::Syslog => 5,
            Self::Lpr => 6,
            Self::News => 7,
            Self::Uucp => 8,
            Self::Cron => 9,
            Self::AuthPriv => 10,
            Self::Ftp => 11,
            Self::Local(n) => 16 + n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_levels() {
        assert_eq!(parse_level("0"), Some(LevelFilter::TRACE));
        assert_eq!(parse_level("10"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("15"), Some(LevelFilter::INFO));
        assert_eq!(parse_level("30"), Some(LevelFilter::WARN));
        assert_eq!(parse_level("50"), Some(LevelFilter::ERROR));
        assert_eq!(parse_level("60"), Some(LevelFilter::OFF));
    }

    #[test]
    fn test_named_levels() {
        assert_eq!(parse_level("warning"), Some(LevelFilter::WARN));
        assert_eq!(parse_level("Critical"), Some(LevelFilter::ERROR));
        assert_eq!(parse_level("INFO"), Some(LevelFilter::INFO));
        assert_eq!(parse_level("-10"), None);
        assert_eq!(parse_level("bogus"), None);
    }

    #[test]
    fn test_facility_codes() {
        assert_eq!(SyslogFacility::from_name("daemon").map(SyslogFacility::code), Some(3));
        assert_eq!(SyslogFacility::from_name("LOCAL7").map(SyslogFacility::code), Some(23));
        assert_eq!(SyslogFacility::from_name("99"), None);
        assert_eq!(SyslogFacility::from_name("local8"), None);
        assert_eq!(SyslogFacility::from_name("nope"), None);
    }
}
