//! Health Snapshot — returned by the Gateway's `health_check` operation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub status: HealthStatus,
    pub exchange_connected: bool,
    pub timestamp: i64,
}

impl HealthSnapshot {
    pub fn new(exchange_connected: bool, timestamp: i64) -> Self {
        Self {
            status: if exchange_connected {
                HealthStatus::Healthy
            } else {
                HealthStatus::Unhealthy
            },
            exchange_connected,
            timestamp,
        }
    }
}
