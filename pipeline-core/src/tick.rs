//! Market tick — a single price observation for a commodity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single market-data observation, produced by the native broker callback
/// and fanned out by the Tick Publisher.
///
/// Immutable once constructed; discarded by the publisher after the frame
/// has been sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub commodity_id: String,
    pub match_price: Decimal,
    pub observed_at: DateTime<Utc>,
}

impl Tick {
    /// Builds a tick from raw broker-callback fields, applying the
    /// normalization rules from the Tick Publisher design: the commodity id
    /// is upper-cased and the observation timestamp is stamped at handoff
    /// time rather than trusted from the caller.
    pub fn normalize(commodity_id: &str, match_price: Decimal) -> Self {
        Self {
            commodity_id: commodity_id.to_uppercase(),
            match_price,
            observed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn normalize_upper_cases_commodity_id() {
        let tick = Tick::normalize("wdon", dec!(18050));
        assert_eq!(tick.commodity_id, "WDON");
    }

    #[test]
    fn round_trips_through_json() {
        let tick = Tick::normalize("WINZ25", dec!(135210.5));
        let encoded = serde_json::to_string(&tick).unwrap();
        let decoded: Tick = serde_json::from_str(&encoded).unwrap();
        assert_eq!(tick, decoded);
    }
}
