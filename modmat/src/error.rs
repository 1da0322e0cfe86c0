//! Error types for command sessions
//!
//! Rejected commands (bad index, incompatible shapes, ...) are not errors at
//! this level: they are reported on the output stream and the session goes
//! on. A [`SessionError`] always ends the session.

use modmat_core::ModmatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("matrix engine failure: {0}")]
    Core(#[from] ModmatError),

    #[error("expected {expected}, found {found:?}")]
    Parse {
        expected: &'static str,
        found: String,
    },

    #[error("input ended while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
