//! Signal Channel error taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("signal transport error: {0}")]
    Transport(String),

    /// The payload was received but is not a well-formed Trading Signal.
    /// Callers that treat this as "consumed, log and move on" (§4.6) match
    /// on this variant specifically rather than propagating it.
    #[error("signal payload could not be decoded: {0}")]
    Decode(String),
}
