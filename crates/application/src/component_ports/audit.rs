use async_trait::async_trait;
use recordstep_core::{AppError, AppResult};
use recordstep_domain::AuditEntry;

/// Port for persisting failure diagnostics to the remote audit table.
#[async_trait]
pub trait AuditLogSink: Send + Sync {
    /// Writes one audit entry.
    async fn write_entry(&self, entry: &AuditEntry) -> AppResult<()>;
}

/// Local channel for faults that must not reach the caller.
pub trait DiagnosticsSink: Send + Sync {
    /// Reports that an audit entry could not be written.
    fn audit_write_failed(&self, entry: &AuditEntry, error: &AppError);
}
