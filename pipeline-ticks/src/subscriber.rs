//! Tick Subscriber: a SUB socket subscribed to the tick topic.
//!
//! Subscribers are never tracked by the publisher — a subscriber that
//! connects late simply misses whatever was published before it joined
//! (§4.3). This type only wraps the consumer side.

use std::time::Duration;

use pipeline_core::Tick;

use crate::error::TickError;
use crate::publisher::TOPIC;

/// How long `recv` blocks waiting for a frame before returning `Ok(None)`.
const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(200);

pub struct TickSubscriber {
    _context: zmq::Context,
    socket: zmq::Socket,
}

impl std::fmt::Debug for TickSubscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickSubscriber").finish_non_exhaustive()
    }
}

impl TickSubscriber {
    pub fn connect(endpoint: &str) -> Result<Self, TickError> {
        Self::connect_with_timeout(endpoint, DEFAULT_POLL_TIMEOUT)
    }

    pub fn connect_with_timeout(endpoint: &str, poll_timeout: Duration) -> Result<Self, TickError> {
        let context = zmq::Context::new();
        let socket = context
            .socket(zmq::SUB)
            .map_err(|e| TickError::Transport(e.to_string()))?;
        socket
            .connect(endpoint)
            .map_err(|e| TickError::Transport(e.to_string()))?;
        socket
            .set_subscribe(TOPIC.as_bytes())
            .map_err(|e| TickError::Transport(e.to_string()))?;
        socket
            .set_rcvtimeo(poll_timeout.as_millis() as i32)
            .map_err(|e| TickError::Transport(e.to_string()))?;
        Ok(Self {
            _context: context,
            socket,
        })
    }

    /// Blocks up to the configured poll timeout for the next tick.
    /// `Ok(None)` on timeout is a normal, expected outcome, not an error.
    pub fn recv(&self) -> Result<Option<Tick>, TickError> {
        match self.socket.recv_multipart(0) {
            Ok(frames) => {
                let payload = frames
                    .get(1)
                    .ok_or_else(|| TickError::Decode("tick frame missing payload".to_string()))?;
                let tick: Tick =
                    serde_json::from_slice(payload).map_err(|e| TickError::Decode(e.to_string()))?;
                Ok(Some(tick))
            }
            Err(zmq::Error::EAGAIN) => Ok(None),
            Err(e) => Err(TickError::Transport(e.to_string())),
        }
    }
}
