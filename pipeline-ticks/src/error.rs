//! Tick transport error taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TickError {
    #[error("tick transport error: {0}")]
    Transport(String),

    #[error("tick payload could not be decoded: {0}")]
    Decode(String),
}
