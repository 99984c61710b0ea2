//! Application services and ports.

#![forbid(unsafe_code)]

mod component_ports;
mod component_service;

pub use component_ports::{AuditLogSink, ConfigRows, ConfigSource, DiagnosticsSink, RecordStore};
pub use component_service::{
    AuditLogger, ComponentService, ComponentSettings, DEFAULT_COMPONENT_NAME,
    DEFAULT_COMPONENT_VERSION, DEFAULT_CONFIG_FILTER,
};
