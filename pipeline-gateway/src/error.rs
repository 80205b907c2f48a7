//! Gateway-wide error taxonomy, mirroring §7's transport/protocol/domain
//! split.

use thiserror::Error;

/// Errors a [`crate::GatewayClient`] call can fail with.
///
/// Transport errors ([`GatewayError::Timeout`], [`GatewayError::Connection`])
/// are retried by the client up to `retry_count`; [`GatewayError::Server`]
/// (a decoded `{success: false}` envelope) and [`GatewayError::Decode`]
/// (malformed JSON) are not — the server has already answered, so retrying
/// would just repeat the same logical failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("gateway request timed out after {0}ms")]
    Timeout(u64),

    #[error("gateway transport error: {0}")]
    Connection(String),

    #[error("gateway response could not be decoded: {0}")]
    Decode(String),

    #[error("gateway rejected request [{code}]: {message}")]
    Server { code: String, message: String },
}

impl GatewayError {
    /// `true` for the two transport-level failures that the client's retry
    /// loop treats as worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Timeout(_) | GatewayError::Connection(_))
    }
}
