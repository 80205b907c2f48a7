//! Error taxonomy for the Lifecycle Manager.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("gateway failed to start: {0}")]
    Gateway(#[from] pipeline_gateway::GatewayError),
}
