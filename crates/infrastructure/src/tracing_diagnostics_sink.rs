use recordstep_application::DiagnosticsSink;
use recordstep_core::AppError;
use recordstep_domain::AuditEntry;
use tracing::error;

/// Diagnostics sink that reports swallowed faults through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnosticsSink;

impl TracingDiagnosticsSink {
    /// Creates a new diagnostics sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticsSink for TracingDiagnosticsSink {
    fn audit_write_failed(&self, entry: &AuditEntry, error: &AppError) {
        error!(
            component = %entry.component,
            original_error = %entry.error,
            error = %error,
            "failed to write audit entry"
        );
    }
}
