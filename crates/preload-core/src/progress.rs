//! Progress reporting contract for batch runs.
//!
//! The batch coordinator reports one event per finished lookup through a
//! [`ProgressSink`]. Sinks are only ever called from the coordinator's
//! collection loop, so implementations need no internal locking.

/// Receiver of informational and error events. Calls are fire-and-forget.
pub trait ProgressSink: Send {
    fn log(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Forwards events to `tracing` (info / error level).
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn log(&mut self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&mut self, message: &str) {
        tracing::error!("{message}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Log(String),
    Error(String),
}

/// Records every event in order. Used by tests and callers that render later.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Vec<SinkEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn logs(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Log(m) => Some(m.as_str()),
                SinkEvent::Error(_) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Error(m) => Some(m.as_str()),
                SinkEvent::Log(_) => None,
            })
            .collect()
    }
}

impl ProgressSink for MemorySink {
    fn log(&mut self, message: &str) {
        self.events.push(SinkEvent::Log(message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.events.push(SinkEvent::Error(message.to_string()));
    }
}
