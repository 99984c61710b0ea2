//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod baserow_audit_log_sink;
mod baserow_client;
mod baserow_config_source;
mod baserow_record_store;
mod in_memory_record_store;
mod tracing_diagnostics_sink;

#[cfg(test)]
mod test_support;

pub use baserow_audit_log_sink::BaserowAuditLogSink;
pub use baserow_client::{
    BaserowClient, BaserowConfig, DEFAULT_AUDIT_TABLE_ID, DEFAULT_AUTH_SCHEME,
    DEFAULT_BASEROW_BASE_URL, DEFAULT_CONFIG_TABLE_ID,
};
pub use baserow_config_source::BaserowConfigSource;
pub use baserow_record_store::BaserowRecordStore;
pub use in_memory_record_store::InMemoryRecordStore;
pub use tracing_diagnostics_sink::TracingDiagnosticsSink;
