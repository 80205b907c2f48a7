//! Mock broker backend.
//!
//! Stands in for the real broker SDK binding (out of scope, §1) well enough
//! to exercise the Gateway Server's request/reply loop and the Order
//! Executor's retry path end to end in tests, the same role
//! `profitdll::mock::ProfitConnector` plays for the teacher's DLL trait.

use std::collections::HashMap;

use pipeline_core::OrderRequest;

use crate::capability::{BrokerCapability, Position};
use crate::error::BrokerError;

/// In-memory broker double. `connected` and `reject_next` are exposed so
/// tests can drive the Gateway Server / Gateway Client through its error
/// paths (`health_check` failure, `send_order` rejection) without any real
/// exchange connectivity.
#[derive(Debug)]
pub struct MockBroker {
    connected: bool,
    next_serial: u64,
    reject_next: Option<String>,
    null_result_next: bool,
    positions: HashMap<String, Vec<Position>>,
}

impl Default for MockBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBroker {
    pub fn new() -> Self {
        Self {
            connected: true,
            next_serial: 1,
            reject_next: None,
            null_result_next: false,
            positions: HashMap::new(),
        }
    }

    /// Test hook: flips exchange connectivity, as if the broker's network
    /// link dropped.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Test hook: makes the next `send_order` call fail with the given
    /// broker-side rejection reason.
    pub fn reject_next_order(&mut self, reason: impl Into<String>) {
        self.reject_next = Some(reason.into());
    }

    /// Test hook: seeds a position so `get_positions` has something to
    /// return.
    pub fn seed_position(&mut self, account: &str, position: Position) {
        self.positions
            .entry(account.to_string())
            .or_default()
            .push(position);
    }

    /// Test hook: makes the next `send_order` call simulate the broker
    /// returning an empty result (`NULL_RESULT` in the Gateway protocol).
    pub fn null_result_next_order(&mut self) {
        self.null_result_next = true;
    }
}

impl BrokerCapability for MockBroker {
    fn send_order(&mut self, request: &OrderRequest) -> Result<String, BrokerError> {
        if !self.connected {
            return Err(BrokerError::Connectivity(
                "exchange connection is down".to_string(),
            ));
        }
        if let Some(reason) = self.reject_next.take() {
            return Err(BrokerError::OrderRejected(reason));
        }
        if self.null_result_next {
            self.null_result_next = false;
            return Err(BrokerError::NullResult);
        }
        let serial = format!("MOCK-{:06}", self.next_serial);
        self.next_serial += 1;
        self.positions
            .entry(request.order_account.clone())
            .or_default()
            .push(Position {
                account: request.order_account.clone(),
                item_code: request.item_code.clone(),
                quantity: request.quantity,
                average_price: request.price,
                unrealized_pnl: 0,
            });
        Ok(serial)
    }

    fn get_positions(&mut self, account: &str) -> Result<Vec<Position>, BrokerError> {
        if account.is_empty() {
            return Err(BrokerError::MissingAccount);
        }
        Ok(self.positions.get(account).cloned().unwrap_or_default())
    }

    fn is_exchange_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_core::order::{DayTrade, OpenClose, OrderType, TimeInForce};
    use pipeline_core::Side;

    fn sample_request() -> OrderRequest {
        OrderRequest {
            order_account: "12345".to_string(),
            item_code: "WINZ25".to_string(),
            side: Side::Buy,
            order_type: OrderType::Market,
            price: 0,
            quantity: 1,
            open_close: OpenClose::Auto,
            note: "test".to_string(),
            day_trade: DayTrade::No,
            time_in_force: TimeInForce::Ioc,
        }
    }

    #[test]
    fn send_order_assigns_sequential_serials() {
        let mut broker = MockBroker::new();
        let first = broker.send_order(&sample_request()).unwrap();
        let second = broker.send_order(&sample_request()).unwrap();
        assert_eq!(first, "MOCK-000001");
        assert_eq!(second, "MOCK-000002");
    }

    #[test]
    fn disconnected_broker_rejects_orders() {
        let mut broker = MockBroker::new();
        broker.set_connected(false);
        assert!(matches!(
            broker.send_order(&sample_request()),
            Err(BrokerError::Connectivity(_))
        ));
    }

    #[test]
    fn get_positions_requires_an_account() {
        let mut broker = MockBroker::new();
        assert!(matches!(
            broker.get_positions(""),
            Err(BrokerError::MissingAccount)
        ));
    }

    #[test]
    fn reject_next_order_is_one_shot() {
        let mut broker = MockBroker::new();
        broker.reject_next_order("margin call");
        assert!(broker.send_order(&sample_request()).is_err());
        assert!(broker.send_order(&sample_request()).is_ok());
    }
}
