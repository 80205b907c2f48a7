//! Signal consumer: the Order Executor's side of the channel (§4.5, §4.6).

use std::time::Duration;

use pipeline_core::TradingSignal;

use crate::error::SignalError;

/// Default short-poll timeout for the executor loop (§4.6).
const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

pub struct SignalConsumer {
    _context: zmq::Context,
    socket: zmq::Socket,
}

impl std::fmt::Debug for SignalConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalConsumer").finish_non_exhaustive()
    }
}

impl SignalConsumer {
    pub fn bind(endpoint: &str) -> Result<Self, SignalError> {
        Self::bind_with_timeout(endpoint, DEFAULT_POLL_TIMEOUT)
    }

    pub fn bind_with_timeout(endpoint: &str, poll_timeout: Duration) -> Result<Self, SignalError> {
        let context = zmq::Context::new();
        let socket = context
            .socket(zmq::PULL)
            .map_err(|e| SignalError::Transport(e.to_string()))?;
        socket
            .bind(endpoint)
            .map_err(|e| SignalError::Transport(e.to_string()))?;
        socket
            .set_rcvtimeo(poll_timeout.as_millis() as i32)
            .map_err(|e| SignalError::Transport(e.to_string()))?;
        Ok(Self {
            _context: context,
            socket,
        })
    }

    pub fn bound_endpoint(&self) -> Result<String, SignalError> {
        self.socket
            .get_last_endpoint()
            .map_err(|e| SignalError::Transport(e.to_string()))?
            .map_err(|_| SignalError::Transport("bound endpoint is not valid UTF-8".to_string()))
    }

    /// Polls for the next signal. `Ok(None)` on timeout is routine.
    /// `Err(SignalError::Decode(_))` means a frame arrived but was not a
    /// well-formed [`TradingSignal`] — still a received message, just not
    /// an actionable one (§4.6 step 1).
    pub fn recv(&self) -> Result<Option<TradingSignal>, SignalError> {
        match self.socket.recv_bytes(0) {
            Ok(raw) => {
                let signal: TradingSignal =
                    serde_json::from_slice(&raw).map_err(|e| SignalError::Decode(e.to_string()))?;
                Ok(Some(signal))
            }
            Err(zmq::Error::EAGAIN) => Ok(None),
            Err(e) => Err(SignalError::Transport(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::SignalProducer;
    use chrono::Utc;
    use pipeline_core::Side;

    #[test]
    fn producer_push_is_received_by_consumer_pull() {
        let consumer = SignalConsumer::bind("tcp://127.0.0.1:*").unwrap();
        let endpoint = consumer.bound_endpoint().unwrap();
        let producer = SignalProducer::connect(&endpoint).unwrap();

        let signal = TradingSignal::new(Utc::now(), Side::Buy, "WINZ25");
        producer.send(&signal).unwrap();

        let received = loop {
            if let Some(signal) = consumer.recv().unwrap() {
                break signal;
            }
        };
        assert_eq!(received, signal);
    }

    #[test]
    fn malformed_payload_is_reported_as_decode_error_not_transport_error() {
        let consumer = SignalConsumer::bind("tcp://127.0.0.1:*").unwrap();
        let endpoint = consumer.bound_endpoint().unwrap();
        let producer = SignalProducer::connect(&endpoint).unwrap();

        producer.send_raw(b"not json".to_vec()).unwrap();

        let result = loop {
            match consumer.recv() {
                Ok(None) => continue,
                other => break other,
            }
        };
        assert!(matches!(result, Err(SignalError::Decode(_))));
    }
}
