//! The RPC envelope: length-delimited JSON request/response frames (§4.1, §6).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"operation": "<op>", "parameters": { ... }}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub operation: String,
    #[serde(default)]
    pub parameters: Value,
}

impl RequestEnvelope {
    pub fn new(operation: impl Into<String>, parameters: Value) -> Self {
        Self {
            operation: operation.into(),
            parameters,
        }
    }
}

/// `{"success": bool, "data": {...}|null, "error_message": string|null, "error_code": string|null}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl ResponseEnvelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error_message: None,
            error_code: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error_message: Some(message.into()),
            error_code: Some(code.into()),
        }
    }
}

/// Operation names recognized by the Gateway Server. Kept as plain string
/// constants — rather than an enum the wire format would need to mirror
/// exactly — since the protocol's `operation` field is free text and an
/// unknown value is itself a valid, well-handled outcome (`UNKNOWN_OPERATION`).
pub mod operations {
    pub const SEND_ORDER: &str = "send_order";
    pub const GET_POSITIONS: &str = "get_positions";
    pub const HEALTH_CHECK: &str = "health_check";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_envelope_round_trips() {
        let req = RequestEnvelope::new("health_check", Value::Null);
        let encoded = serde_json::to_string(&req).unwrap();
        let decoded: RequestEnvelope = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.operation, "health_check");
    }

    #[test]
    fn error_response_omits_data() {
        let resp = ResponseEnvelope::error("MISSING_ACCOUNT", "account is required");
        let encoded = serde_json::to_value(&resp).unwrap();
        assert!(encoded.get("data").is_none());
        assert_eq!(encoded["success"], false);
    }
}
