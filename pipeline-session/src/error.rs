//! Session Store error taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session record could not be decoded: {0}")]
    Decode(String),

    #[error("no active session")]
    NoSession,
}
