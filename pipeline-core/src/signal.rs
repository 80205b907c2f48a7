//! Trading signal — the instruction the Strategy Engine hands to the Order Executor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::condition::Side;

/// An instruction to BUY or SELL a commodity, emitted by the Strategy Engine
/// and consumed exactly once by the Order Executor.
///
/// Immutable; carries no quantity or price — those are policy decisions made
/// by the executor (§4.6), not by the strategy that spotted the condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub when: DateTime<Utc>,
    pub operation: Side,
    pub commodity_id: String,
}

impl TradingSignal {
    pub fn new(when: DateTime<Utc>, operation: Side, commodity_id: impl Into<String>) -> Self {
        Self {
            when,
            operation,
            commodity_id: commodity_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json_preserving_enum_name() {
        let signal = TradingSignal::new(Utc::now(), Side::Sell, "WINZ25");
        let encoded = serde_json::to_string(&signal).unwrap();
        assert!(encoded.contains("\"SELL\""));
        let decoded: TradingSignal = serde_json::from_str(&encoded).unwrap();
        assert_eq!(signal, decoded);
    }
}
