//! Local syslog sink over the `/dev/log` datagram socket.

use std::io;
use std::os::unix::net::UnixDatagram;
use std::path::Path;
use std::sync::Arc;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::SyslogFacility;

pub const SYSLOG_SOCKET: &str = "/dev/log";

pub fn severity(level: &Level) -> u8 {
    match *level {
        Level::ERROR => 3,
        Level::WARN => 4,
        Level::INFO => 6,
        Level::DEBUG | Level::TRACE => 7,
    }
}

pub fn priority(facility: SyslogFacility, level: &Level) -> u8 {
    facility.code() * 8 + severity(level)
}

/// Hands out one [`SyslogLine`] per event, tagged with the event's priority.
#[derive(Debug, Clone)]
pub struct SyslogMakeWriter {
    socket: Arc<UnixDatagram>,
    facility: SyslogFacility,
}

impl SyslogMakeWriter {
    pub fn connect(facility: SyslogFacility) -> io::Result<Self> {
        Self::connect_to(Path::new(SYSLOG_SOCKET), facility)
    }

    pub fn connect_to(path: &Path, facility: SyslogFacility) -> io::Result<Self> {
        let socket = UnixDatagram::unbound()?;
        socket.connect(path)?;
        Ok(Self { socket: Arc::new(socket), facility })
    }

    fn line(&self, level: &Level) -> SyslogLine {
        SyslogLine { socket: Arc::clone(&self.socket), priority: priority(self.facility, level) }
    }
}

/// Sends each write as one datagram: `<PRI>message`, trailing newline removed.
#[derive(Debug)]
pub struct SyslogLine {
    socket: Arc<UnixDatagram>,
    priority: u8,
}

impl io::Write for SyslogLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let packet = format!("<{}>{}", self.priority, text.trim_end_matches('\n'));
        self.socket.send(packet.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SyslogMakeWriter {
    type Writer = SyslogLine;

    fn make_writer(&'a self) -> Self::Writer {
        self.line(&Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.line(meta.level())
    }
}
