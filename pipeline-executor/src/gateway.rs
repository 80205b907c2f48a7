//! The narrow interface the Order Executor needs from the Broker Gateway
//! Client — small enough to mock in tests without a live ZeroMQ socket,
//! the same split `pipeline-broker::BrokerCapability` uses for the
//! Gateway Server.

use pipeline_core::{OrderRequest, OrderResponse};
use pipeline_gateway::{GatewayClient, GatewayError};

pub trait OrderGateway: Send {
    fn send_order(&mut self, request: &OrderRequest) -> Result<OrderResponse, GatewayError>;
    fn is_connected(&mut self) -> bool;
}

impl OrderGateway for GatewayClient {
    fn send_order(&mut self, request: &OrderRequest) -> Result<OrderResponse, GatewayError> {
        GatewayClient::send_order(self, request)
    }

    fn is_connected(&mut self) -> bool {
        GatewayClient::is_connected(self)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::VecDeque;

    use super::*;

    /// Test double returning one queued outcome per `send_order` call, in
    /// order. Does not retry internally — that loop lives in
    /// `GatewayClient::call` — so each outcome here stands for one signal
    /// received and handled.
    pub(crate) struct MockGateway {
        connected: bool,
        outcomes: VecDeque<Result<OrderResponse, GatewayError>>,
        pub(crate) submitted: Vec<OrderRequest>,
    }

    impl MockGateway {
        pub(crate) fn new() -> Self {
            Self {
                connected: true,
                outcomes: VecDeque::new(),
                submitted: Vec::new(),
            }
        }

        pub(crate) fn set_connected(&mut self, connected: bool) {
            self.connected = connected;
        }

        pub(crate) fn push_outcome(&mut self, outcome: Result<OrderResponse, GatewayError>) {
            self.outcomes.push_back(outcome);
        }
    }

    impl OrderGateway for MockGateway {
        fn send_order(&mut self, request: &OrderRequest) -> Result<OrderResponse, GatewayError> {
            self.submitted.push(request.clone());
            self.outcomes
                .pop_front()
                .unwrap_or_else(|| Ok(OrderResponse {
                    accepted: true,
                    order_serial: "DEFAULT".to_string(),
                    error_code: String::new(),
                    error_message: String::new(),
                }))
        }

        fn is_connected(&mut self) -> bool {
            self.connected
        }
    }
}
