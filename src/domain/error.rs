//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business rule violations.
/// These are independent of store and CLI concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: &'static str, id: String },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("event ends before it starts: {start} > {end}")]
    InvertedDateRange { start: String, end: String },
}
