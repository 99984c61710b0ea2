use serde::Serialize;

/// Severity label written with audit entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Failed invocation.
    Error,
}

/// Diagnostic row written once per failed invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    /// Component that failed.
    pub component: String,
    /// Human-readable fault message.
    pub error: String,
    /// Fault trace text.
    pub stack: String,
    /// ISO-8601 time of the failure.
    pub timestamp: String,
    /// Always [`Severity::Error`].
    pub severity: Severity,
    /// Serialized raw invocation input.
    pub input: String,
}
