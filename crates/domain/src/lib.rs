//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod action;
mod audit;
mod envelope;
mod record;
mod request;

pub use action::RecordAction;
pub use audit::{AuditEntry, Severity};
pub use envelope::{EnvelopeMetadata, ResultEnvelope};
pub use record::{ARCHIVED_FLAG, Record, UPDATED_FLAG};
pub use request::ActionRequest;
