//! Persistence layer: the connection manager, the repository trait, and its
//! MongoDB and in-memory implementations.
//!
//! Repository methods surface errors unmodified; the HTTP layer is the single
//! place where they are classified into status codes.

mod connection;
mod memory_store;
pub mod mongo;
pub mod traits;

pub use connection::{
    ConnectionManager, ConnectionSettings, ConnectionSignal, ConnectionTarget, Connector,
    RetryPolicy, SignalSender,
};
pub use memory_store::MemoryGameRepository;
pub use traits::GameRepository;

use mongodb::error::{ErrorKind, WriteFailure};

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;
/// Server error code for a document failing collection schema validation.
const DOCUMENT_VALIDATION_CODE: i32 = 121;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("database connection is not initialized")]
    NotInitialized,
    #[error("invalid game id: {0}")]
    InvalidId(String),
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("duplicate key: {0}")]
    Duplicate(String),
    #[error("database operation failed")]
    Driver(#[source] mongodb::error::Error),
    #[error("BSON serialization failed")]
    Bson(#[from] mongodb::bson::ser::Error),
}

impl From<mongodb::error::Error> for PersistenceError {
    fn from(err: mongodb::error::Error) -> Self {
        match server_error_code(&err) {
            Some(DUPLICATE_KEY_CODE) => PersistenceError::Duplicate(err.to_string()),
            Some(DOCUMENT_VALIDATION_CODE) => PersistenceError::Validation(vec![err.to_string()]),
            _ => PersistenceError::Driver(err),
        }
    }
}

fn server_error_code(err: &mongodb::error::Error) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => Some(write_error.code),
        ErrorKind::Command(command_error) => Some(command_error.code),
        _ => None,
    }
}
