//! Signal producer: the Strategy Engine's side of the channel (§4.5).
//!
//! PUSH connects; the Order Executor's [`crate::consumer::SignalConsumer`]
//! binds — the opposite of the naive guess, confirmed by the original
//! `zmq_pusher.py` / `zmq_puller.py` pairing.

use pipeline_core::TradingSignal;

use crate::error::SignalError;

pub struct SignalProducer {
    _context: zmq::Context,
    socket: zmq::Socket,
}

impl std::fmt::Debug for SignalProducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalProducer").finish_non_exhaustive()
    }
}

impl SignalProducer {
    pub fn connect(endpoint: &str) -> Result<Self, SignalError> {
        let context = zmq::Context::new();
        let socket = context
            .socket(zmq::PUSH)
            .map_err(|e| SignalError::Transport(e.to_string()))?;
        socket
            .connect(endpoint)
            .map_err(|e| SignalError::Transport(e.to_string()))?;
        Ok(Self {
            _context: context,
            socket,
        })
    }

    /// Pushes a signal as a single serialized frame. Callers are expected
    /// to still commit the condition's state transition even if this
    /// returns an error (§4.4) — delivery is at-most-once by design.
    pub fn send(&self, signal: &TradingSignal) -> Result<(), SignalError> {
        self.send_raw(serde_json::to_vec(signal).map_err(|e| SignalError::Decode(e.to_string()))?)
    }

    /// Pushes a raw, already-encoded frame, bypassing signal serialization.
    /// Exposed so callers (and this crate's own tests) can exercise the
    /// consumer's handling of payloads that don't decode as a Trading Signal.
    pub fn send_raw(&self, payload: Vec<u8>) -> Result<(), SignalError> {
        self.socket
            .send(payload, 0)
            .map_err(|e| SignalError::Transport(e.to_string()))
    }
}
