//! Component status vocabulary and the result/health DTOs returned by the
//! [`crate::manager::LifecycleManager`] (§4.7).

use std::time::Duration;

/// `STOPPED, STARTING, RUNNING, STOPPING, ERROR` (§4.7). A component never
/// skips a state on its way from `Stopped` to `Running` or back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    Stopped,
    Starting,
    Running,
    Stopping,
    Error,
}

/// The three components the Lifecycle Manager supervises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComponentKey {
    Gateway,
    Strategy,
    OrderExecutor,
}

impl ComponentKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKey::Gateway => "gateway",
            ComponentKey::Strategy => "strategy",
            ComponentKey::OrderExecutor => "order_executor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemStartupResult {
    pub success: bool,
    pub gateway_status: ComponentStatus,
    pub strategy_status: ComponentStatus,
    pub order_executor_status: ComponentStatus,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemHealth {
    pub is_healthy: bool,
    pub gateway_status: ComponentStatus,
    pub strategy_status: ComponentStatus,
    pub order_executor_status: ComponentStatus,
    pub uptime: Option<Duration>,
}
