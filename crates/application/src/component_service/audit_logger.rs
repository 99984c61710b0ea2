use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::Arc;

use recordstep_core::AppError;
use recordstep_domain::{AuditEntry, Severity};
use serde_json::Value;

use super::response::current_timestamp;
use crate::component_ports::{AuditLogSink, DiagnosticsSink};

/// Best-effort writer for failure diagnostics.
#[derive(Clone)]
pub struct AuditLogger {
    sink: Arc<dyn AuditLogSink>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl AuditLogger {
    /// Creates an audit logger.
    #[must_use]
    pub fn new(sink: Arc<dyn AuditLogSink>, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        Self { sink, diagnostics }
    }

    /// Builds the audit entry for one failed invocation.
    #[must_use]
    pub fn failure_entry(&self, component: &str, error: &AppError, input: &Value) -> AuditEntry {
        AuditEntry {
            component: component.to_owned(),
            error: error.to_string(),
            stack: fault_trace(error),
            timestamp: current_timestamp(),
            severity: Severity::Error,
            input: input.to_string(),
        }
    }

    /// Attempts one write. A failed write only reaches the diagnostics sink.
    pub async fn record(&self, entry: AuditEntry) {
        if let Err(error) = self.sink.write_entry(&entry).await {
            self.diagnostics.audit_write_failed(&entry, &error);
        }
    }
}

fn fault_trace(error: &AppError) -> String {
    let backtrace = Backtrace::capture();
    match backtrace.status() {
        BacktraceStatus::Captured => format!("{}: {error:?}\n{backtrace}", error.kind()),
        _ => format!("{}: {error:?}", error.kind()),
    }
}
