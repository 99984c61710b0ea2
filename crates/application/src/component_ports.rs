mod audit;
mod config;
mod records;

pub use audit::{AuditLogSink, DiagnosticsSink};
pub use config::{ConfigRows, ConfigSource};
pub use records::RecordStore;
