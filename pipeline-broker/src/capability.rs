//! The narrow interface the Gateway Server is allowed to call.

use pipeline_core::OrderRequest;
use serde::{Deserialize, Serialize};

use crate::error::BrokerError;

/// A single open position, as returned by `get_positions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub account: String,
    pub item_code: String,
    pub quantity: i64,
    pub average_price: i64,
    pub unrealized_pnl: i64,
}

/// The only surface the Gateway Server is permitted to call into the native
/// broker library through.
///
/// Every method here is synchronous: the broker library is not thread-safe
/// and the Gateway Server only ever calls it from its single worker thread,
/// so there is no async boundary to model — see §4.1's concurrency
/// contract. Implementations must never be invoked from more than one
/// execution context at a time; any accidental concurrent entry is a logic
/// bug in the caller, not a recoverable error (§7).
pub trait BrokerCapability: Send {
    /// Submits a market order, returning the broker-assigned serial on
    /// acceptance.
    fn send_order(&mut self, request: &OrderRequest) -> Result<String, BrokerError>;

    /// Queries the current open positions for `account`.
    fn get_positions(&mut self, account: &str) -> Result<Vec<Position>, BrokerError>;

    /// Reports whether the broker's underlying exchange connection is up.
    fn is_exchange_connected(&self) -> bool;
}
