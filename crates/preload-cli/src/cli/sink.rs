//! Console progress sink: user-facing lines on stdout/stderr.
//!
//! Lines are mirrored to `tracing` only when logging goes to the log file;
//! with the stderr fallback the mirror would print every line twice.

use preload_core::progress::ProgressSink;
use std::io::{self, Write};

pub struct ConsoleSink {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    mirror_to_log: bool,
}

impl ConsoleSink {
    pub fn new(mirror_to_log: bool) -> Self {
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()), mirror_to_log)
    }

    pub(crate) fn with_writers(
        out: Box<dyn Write + Send>,
        err: Box<dyn Write + Send>,
        mirror_to_log: bool,
    ) -> Self {
        Self {
            out,
            err,
            mirror_to_log,
        }
    }
}

impl ProgressSink for ConsoleSink {
    fn log(&mut self, message: &str) {
        let _ = writeln!(self.out, "{message}");
        if self.mirror_to_log {
            tracing::info!("{message}");
        }
    }

    fn error(&mut self, message: &str) {
        let _ = writeln!(self.err, "{message}");
        if self.mirror_to_log {
            tracing::error!("{message}");
        }
    }
}
