//! Advisory messages from the builder.
//!
//! Nothing here configures a global subscriber. A [`crate::Transformer`] holds its own sink; the
//! default forwards to `tracing`, and whoever owns the process decides where that goes.

use std::sync::{Arc, Mutex};

/// Message severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Informational (build summaries, engine stdout).
    Info,
    /// Non-fatal parameter concerns (extreme pitch shift, attack longer than decay).
    Warn,
}

/// Sink for non-fatal diagnostics.
pub trait Diagnostics: Send + Sync {
    /// Record a message.
    fn emit(&self, level: Level, message: &str);

    /// Record an informational message.
    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    /// Record a warning.
    fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }
}

/// Default sink: forwards to the `tracing` macros.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn emit(&self, level: Level, message: &str) {
        match level {
            Level::Info => tracing::info!(target: "soxchain", "{message}"),
            Level::Warn => tracing::warn!(target: "soxchain", "{message}"),
        }
    }
}

/// Sink that keeps every message in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryDiagnostics {
    messages: Arc<Mutex<Vec<(Level, String)>>>,
}

impl MemoryDiagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded messages in emission order.
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Recorded warnings only.
    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn emit(&self, level: Level, message: &str) {
        let mut guard = match self.messages.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((level, message.to_string()));
    }
}
