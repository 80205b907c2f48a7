//! Tick Publisher: binds a PUB socket and fans out normalized ticks (§4.3).

use std::str::FromStr;
use std::thread;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::warn;

use pipeline_core::Tick;

use crate::error::TickError;

/// Topic frame every tick is published under.
pub const TOPIC: &str = "TICK";

/// Grace period after binding before the first emission, so slow-joining
/// subscribers have time to complete the pub/sub handshake (§4.3).
const SLOW_JOINER_PAUSE: Duration = Duration::from_millis(500);

/// Owns the PUB socket. One process, one publisher, many subscribers.
pub struct TickPublisher {
    _context: zmq::Context,
    socket: zmq::Socket,
}

impl std::fmt::Debug for TickPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickPublisher").finish_non_exhaustive()
    }
}

impl TickPublisher {
    /// Binds `endpoint` and waits out the slow-joiner pause before
    /// returning, so the first call to [`publish`](Self::publish) is safe
    /// immediately.
    pub fn bind(endpoint: &str) -> Result<Self, TickError> {
        let context = zmq::Context::new();
        let socket = context
            .socket(zmq::PUB)
            .map_err(|e| TickError::Transport(e.to_string()))?;
        socket
            .bind(endpoint)
            .map_err(|e| TickError::Transport(e.to_string()))?;
        thread::sleep(SLOW_JOINER_PAUSE);
        Ok(Self {
            _context: context,
            socket,
        })
    }

    /// Normalizes a raw broker-callback price string and publishes the
    /// resulting tick. A price that fails to parse is emitted as zero with
    /// a warning rather than dropped (§4.3) — downstream consumers must
    /// tolerate a zero price.
    pub fn publish_raw(&self, commodity_id: &str, raw_match_price: &str) -> Result<(), TickError> {
        let match_price = Decimal::from_str(raw_match_price).unwrap_or_else(|_| {
            warn!(raw_match_price, "failed to parse match price, emitting zero");
            Decimal::ZERO
        });
        self.publish(Tick::normalize(commodity_id, match_price))
    }

    /// Publishes an already-built tick as the two-frame `[TICK, payload]`
    /// message.
    pub fn publish(&self, tick: Tick) -> Result<(), TickError> {
        let payload = serde_json::to_vec(&tick).map_err(|e| TickError::Decode(e.to_string()))?;
        self.socket
            .send_multipart([TOPIC.as_bytes(), payload.as_slice()], 0)
            .map_err(|e| TickError::Transport(e.to_string()))
    }

    /// The endpoint ZeroMQ actually bound to — useful when `endpoint` used
    /// a wildcard port.
    pub fn bound_endpoint(&self) -> Result<String, TickError> {
        self.socket
            .get_last_endpoint()
            .map_err(|e| TickError::Transport(e.to_string()))?
            .map_err(|_| TickError::Transport("bound endpoint is not valid UTF-8".to_string()))
    }
}
