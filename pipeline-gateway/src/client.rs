//! Broker Gateway Client: the REQ-socket façade every process other than
//! the Gateway Server itself uses to reach the broker (§4.1, §4.2, §7).

use std::time::Duration;

use serde_json::{json, Value};
use tracing::warn;

use pipeline_core::{OrderRequest, OrderResponse};

use crate::error::GatewayError;
use crate::protocol::{operations, RequestEnvelope, ResponseEnvelope};

/// Thin, reconnect-on-failure client. A fresh REQ socket is opened lazily
/// and torn down on any transport error — ZeroMQ's REQ socket enters an
/// unusable state after a timed-out request, so the only reliable recovery
/// is to discard it and dial again (mirrors `dll_gateway_client.py`).
pub struct GatewayClient {
    server_address: String,
    timeout_ms: u64,
    retry_count: u32,
    context: zmq::Context,
    socket: Option<zmq::Socket>,
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("server_address", &self.server_address)
            .field("timeout_ms", &self.timeout_ms)
            .field("retry_count", &self.retry_count)
            .field("connected", &self.socket.is_some())
            .finish()
    }
}

impl GatewayClient {
    pub fn new(server_address: impl Into<String>, timeout_ms: u64, retry_count: u32) -> Self {
        Self {
            server_address: server_address.into(),
            timeout_ms,
            retry_count,
            context: zmq::Context::new(),
            socket: None,
        }
    }

    pub fn from_config(config: &pipeline_core::PipelineConfig) -> Self {
        Self::new(
            config.gateway_endpoint.clone(),
            config.gateway_request_timeout.as_millis() as u64,
            config.gateway_retry_count,
        )
    }

    pub fn send_order(&mut self, request: &OrderRequest) -> Result<OrderResponse, GatewayError> {
        let params = serde_json::to_value(request)
            .map_err(|e| GatewayError::Decode(format!("failed to encode order request: {e}")))?;
        let data = self.call(operations::SEND_ORDER, params)?;
        let accepted = data
            .get("is_send_order")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Ok(OrderResponse {
            accepted,
            order_serial: data
                .get("order_serial")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            error_code: data
                .get("error_code")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            error_message: data
                .get("error_message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }

    pub fn get_positions(&mut self, account: &str) -> Result<Vec<Value>, GatewayError> {
        let data = self.call(operations::GET_POSITIONS, json!({ "account": account }))?;
        Ok(data
            .get("positions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    pub fn health_check(&mut self) -> Result<HealthCheckResult, GatewayError> {
        let data = self.call(operations::HEALTH_CHECK, Value::Null)?;
        Ok(HealthCheckResult {
            exchange_connected: data
                .get("exchange_connected")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            server_running: data
                .get("server_running")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }

    /// A best-effort liveness probe: any failure (including the server
    /// being unreachable) is reported as "not connected" rather than
    /// propagated, since callers use this for health polling, not control
    /// flow.
    pub fn is_connected(&mut self) -> bool {
        matches!(self.health_check(), Ok(result) if result.exchange_connected)
    }

    pub fn close(&mut self) {
        self.socket = None;
    }

    fn call(&mut self, operation: &str, parameters: Value) -> Result<Value, GatewayError> {
        let request = RequestEnvelope::new(operation, parameters);
        let body = serde_json::to_vec(&request)
            .map_err(|e| GatewayError::Decode(format!("failed to encode request: {e}")))?;

        let mut attempt = 0u32;
        loop {
            match self.try_once(&body) {
                Ok(envelope) => {
                    return if envelope.success {
                        Ok(envelope.data.unwrap_or(Value::Null))
                    } else {
                        Err(GatewayError::Server {
                            code: envelope.error_code.unwrap_or_default(),
                            message: envelope.error_message.unwrap_or_default(),
                        })
                    };
                }
                Err(e) if e.is_retryable() && attempt < self.retry_count => {
                    attempt += 1;
                    warn!(operation, attempt, error = %e, "retrying gateway request");
                    self.socket = None;
                    continue;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn try_once(&mut self, body: &[u8]) -> Result<ResponseEnvelope, GatewayError> {
        let socket = self.socket()?;
        socket
            .send(body, 0)
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        let raw = match socket.recv_bytes(0) {
            Ok(raw) => raw,
            Err(zmq::Error::EAGAIN) => {
                self.socket = None;
                return Err(GatewayError::Timeout(self.timeout_ms));
            }
            Err(e) => {
                self.socket = None;
                return Err(GatewayError::Connection(e.to_string()));
            }
        };

        serde_json::from_slice(&raw)
            .map_err(|e| GatewayError::Decode(format!("malformed gateway response: {e}")))
    }

    fn socket(&mut self) -> Result<&zmq::Socket, GatewayError> {
        if self.socket.is_none() {
            let socket = self
                .context
                .socket(zmq::REQ)
                .map_err(|e| GatewayError::Connection(e.to_string()))?;
            socket
                .set_rcvtimeo(self.timeout_ms as i32)
                .map_err(|e| GatewayError::Connection(e.to_string()))?;
            socket
                .set_sndtimeo(self.timeout_ms as i32)
                .map_err(|e| GatewayError::Connection(e.to_string()))?;
            socket
                .set_linger(0)
                .map_err(|e| GatewayError::Connection(e.to_string()))?;
            socket
                .connect(&self.server_address)
                .map_err(|e| GatewayError::Connection(e.to_string()))?;
            self.socket = Some(socket);
        }
        Ok(self.socket.as_ref().expect("socket populated above"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthCheckResult {
    pub exchange_connected: bool,
    pub server_running: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_order_failure_envelope_maps_to_server_error() {
        // No live server behind this endpoint: the REQ socket will time out
        // waiting for a reply, which must surface as a retryable transport
        // error rather than panicking or hanging past the configured bound.
        let mut client = GatewayClient::new("tcp://127.0.0.1:59991", 50, 0);
        let result = client.health_check();
        assert!(matches!(result, Err(GatewayError::Timeout(_))));
    }

    #[test]
    fn is_connected_reports_false_when_unreachable() {
        let mut client = GatewayClient::new("tcp://127.0.0.1:59992", 50, 0);
        assert!(!client.is_connected());
    }

    /// Spec §8 scenario 4: the first two attempts time out because nothing
    /// is listening yet, the client retries as designed, and the third
    /// attempt — issued once a server has bound the endpoint — succeeds.
    /// Exercises the real retry loop in [`GatewayClient::call`], not a mock.
    #[test]
    fn send_order_retries_past_two_timeouts_then_succeeds() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let endpoint = format!("tcp://127.0.0.1:{port}");

        let server_endpoint = endpoint.clone();
        std::thread::spawn(move || {
            // Long enough that the client's first two attempts (100ms
            // timeout each) have already failed before this binds, with
            // margin to spare before the third attempt starts at ~200ms.
            std::thread::sleep(std::time::Duration::from_millis(150));
            let ctx = zmq::Context::new();
            let socket = ctx.socket(zmq::REP).unwrap();
            socket.bind(&server_endpoint).unwrap();
            let request = socket.recv_bytes(0).unwrap();
            let _: RequestEnvelope = serde_json::from_slice(&request).unwrap();
            let reply = ResponseEnvelope::ok(serde_json::json!({
                "is_send_order": true,
                "order_serial": "RETRY-OK",
            }));
            socket.send(serde_json::to_vec(&reply).unwrap(), 0).unwrap();
        });

        let mut client = GatewayClient::new(endpoint, 100, 2);
        let request = OrderRequest {
            order_account: "99999".to_string(),
            item_code: "WINZ25".to_string(),
            side: pipeline_core::Side::Buy,
            order_type: pipeline_core::OrderType::Market,
            price: 0,
            quantity: 1,
            open_close: pipeline_core::OpenClose::Auto,
            note: String::new(),
            day_trade: pipeline_core::DayTrade::No,
            time_in_force: pipeline_core::TimeInForce::Ioc,
        };

        let response = client.send_order(&request).unwrap();
        assert!(response.accepted);
        assert_eq!(response.order_serial, "RETRY-OK");
    }
}
