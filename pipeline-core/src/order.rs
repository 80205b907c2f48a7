//! Order Request / Order Response DTOs exchanged over the Gateway RPC.

use serde::{Deserialize, Serialize};

use crate::condition::Side;

/// Market order only — the Non-goals exclude limit/stop order types, but the
/// type still exists (rather than being collapsed away) the way the corpus
/// models narrow exchange-order-type enums even when only one variant is
/// wired up today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Market,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OpenClose {
    Auto,
    Open,
    Close,
}

/// Unlike the other order enums, the wire literal is title-case (`"Yes"` /
/// `"No"`), matching the original's `DayTrade` value object exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayTrade {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    Ioc,
    Fok,
    Gtc,
}

/// Order Request DTO carried as the `parameters` object of a `send_order`
/// Gateway RPC call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order_account: String,
    pub item_code: String,
    pub side: Side,
    pub order_type: OrderType,
    pub price: i64,
    pub quantity: i64,
    pub open_close: OpenClose,
    pub note: String,
    pub day_trade: DayTrade,
    pub time_in_force: TimeInForce,
}

/// Order Response DTO carried as the `data` object of a `send_order` reply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderResponse {
    pub accepted: bool,
    pub order_serial: String,
    pub error_code: String,
    pub error_message: String,
}
