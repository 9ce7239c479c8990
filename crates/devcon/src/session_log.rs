//! Append-only session log.
//!
//! Created once at startup and written through per printed line, UTF-8.
//! A failed write disables further logging: one warning, no abort, no
//! effect on in-memory console state.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::warn;

/// Write-through sink for printed console lines.
pub struct SessionLog {
    /// `None` once logging is disabled (never opened, or a write failed).
    writer: Option<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for SessionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLog")
            .field("enabled", &self.writer.is_some())
            .finish()
    }
}

impl SessionLog {
    /// A log that discards everything.
    #[must_use]
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    /// Open (truncating) a log file at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: Some(Box::new(BufWriter::new(file))),
        })
    }

    /// Wrap an arbitrary writer (embedding seam; also how tests inject
    /// failing sinks).
    #[must_use]
    pub fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Some(writer),
        }
    }

    /// Whether the log is still accepting lines.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Append one completed line (write-through: flushed immediately).
    ///
    /// On failure the log disables itself and the console keeps running.
    pub fn write_line(&mut self, line: &str) {
        let Some(writer) = &mut self.writer else {
            return;
        };
        let result = writeln!(writer, "{line}").and_then(|()| writer.flush());
        if let Err(error) = result {
            warn!(%error, "session log write failed; disabling log");
            self.writer = None;
        }
    }
}
