//! Shared error types for the data model.
//!
//! Transport, protocol and domain errors specific to a single component live
//! in that component's own crate (see `pipeline-gateway::error`,
//! `pipeline-broker::error`, ...); this module only covers violations of the
//! data model's own invariants, which every crate that constructs a
//! [`crate::Condition`] needs to be able to report.

use thiserror::Error;

/// Errors raised while constructing or mutating core data-model types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A [`crate::ConditionSpec`] whose configured points would not satisfy the
    /// directional invariant (`stop_loss < order < take_profit` for BUY,
    /// `take_profit < order < stop_loss` for SELL).
    #[error("condition spec violates price-direction invariant: {0}")]
    InvalidConditionSpec(String),

    /// `quantity` was not a positive integer.
    #[error("quantity must be >= 1, got {0}")]
    InvalidQuantity(i64),
}
