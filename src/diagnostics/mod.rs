//! Diagnostics sink used by the lookup table and the aggregator.
//!
//! Components never talk to a global logger directly. They receive a
//! [`SharedDiagnostics`] handle from the entry point and report recoverable
//! problems (malformed lines, unmapped combinations) through `warn`,
//! fatal I/O problems through `error` right before returning the error, and
//! progress lines (table size, run totals) through `info`.

pub mod logging;

use std::sync::{Arc, Mutex};

pub use logging::{init_logging, parse_level, LogTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

/// Severity-tagged message sink.
pub trait Diagnostics: Send + Sync {
    /// Progress output. Dropped unless a sink cares about it.
    fn info(&self, _message: &str) {}

    fn warn(&self, message: &str);

    fn error(&self, message: &str);

    /// Last-resort sink for failures that end the process.
    fn critical(&self, message: &str) {
        self.error(message);
    }
}

/// Handle passed explicitly to every component that reports diagnostics.
pub type SharedDiagnostics = Arc<dyn Diagnostics>;

/// Forwards to the `log` facade; whatever backend `main` installed receives it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl LogDiagnostics {
    pub fn shared() -> SharedDiagnostics {
        Arc::new(LogDiagnostics)
    }
}

impl Diagnostics for LogDiagnostics {
    fn info(&self, message: &str) {
        log::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        log::error!("{}", message);
    }

    fn critical(&self, message: &str) {
        log::error!("CRITICAL: {}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEntry {
    pub severity: Severity,
    pub message: String,
}

/// Keeps every message in memory. Useful for callers that want to inspect
/// what a run complained about, and for tests.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: Mutex<Vec<DiagnosticEntry>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<DiagnosticEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .lock()
            .map(|entries| entries.iter().filter(|e| e.severity == severity).count())
            .unwrap_or(0)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.severity == severity)
            .map(|e| e.message)
            .collect()
    }

    fn record(&self, severity: Severity, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(DiagnosticEntry {
                severity,
                message: message.to_string(),
            });
        }
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn info(&self, message: &str) {
        self.record(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(Severity::Error, message);
    }

    fn critical(&self, message: &str) {
        self.record(Severity::Critical, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_diagnostics_records_by_severity() {
        let diagnostics = MemoryDiagnostics::new();
        diagnostics.warn("first");
        diagnostics.error("second");
        diagnostics.warn("third");
        diagnostics.critical("fourth");
        diagnostics.info("fifth");

        assert_eq!(diagnostics.warnings(), vec!["first", "third"]);
        assert_eq!(diagnostics.errors(), vec!["second"]);
        assert_eq!(diagnostics.count(Severity::Critical), 1);
        assert_eq!(diagnostics.count(Severity::Info), 1);
        assert_eq!(diagnostics.entries().len(), 5);
    }

    #[test]
    fn test_default_critical_falls_back_to_error() {
        struct ErrorsOnly(MemoryDiagnostics);

        impl Diagnostics for ErrorsOnly {
            fn warn(&self, message: &str) {
                self.0.warn(message);
            }
            fn error(&self, message: &str) {
                self.0.error(message);
            }
        }

        let sink = ErrorsOnly(MemoryDiagnostics::new());
        sink.critical("boom");
        sink.info("ignored");
        assert_eq!(sink.0.errors(), vec!["boom"]);
        assert_eq!(sink.0.entries().len(), 1);
    }
}
