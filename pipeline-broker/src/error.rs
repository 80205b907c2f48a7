//! Errors a [`crate::BrokerCapability`] implementation can raise.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrokerError {
    #[error("order rejected by broker: {0}")]
    OrderRejected(String),

    #[error("broker returned an empty result")]
    NullResult,

    #[error("account is required for this operation")]
    MissingAccount,

    #[error("broker connectivity error: {0}")]
    Connectivity(String),
}
