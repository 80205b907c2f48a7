//! Process configuration loaded from environment variables.
//!
//! Argument parsing and config-file formats are out of scope (§1); what is
//! in scope is the *shape* every process binary loads its transport
//! endpoints and timeouts from, matching the teacher's
//! `Credentials::from_env` pattern (`profitdll/src/api.rs`) rather than
//! reaching for a config-file crate.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Endpoints, timeouts, and data-directory layout shared by every pipeline
/// process. Each process loads only the fields it needs, but the struct is
/// kept whole so the defaults (§6) live in exactly one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub tick_pub_endpoint: String,
    pub signal_endpoint: String,
    pub gateway_endpoint: String,
    pub gateway_request_timeout: Duration,
    pub gateway_retry_count: u32,
    pub data_dir: PathBuf,
    pub tmp_dir: PathBuf,
    pub default_order_quantity: i64,
    pub session_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tick_pub_endpoint: "tcp://127.0.0.1:5555".to_string(),
            signal_endpoint: "tcp://127.0.0.1:5556".to_string(),
            gateway_endpoint: "tcp://127.0.0.1:5557".to_string(),
            gateway_request_timeout: Duration::from_millis(5_000),
            gateway_retry_count: 3,
            data_dir: PathBuf::from("data"),
            tmp_dir: PathBuf::from("tmp"),
            default_order_quantity: 1,
            session_timeout: Duration::from_secs(28_800),
        }
    }
}

impl PipelineConfig {
    /// Loads configuration from environment variables, falling back to the
    /// defaults in §6 of the specification for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tick_pub_endpoint: env::var("TICK_PUB_ENDPOINT").unwrap_or(defaults.tick_pub_endpoint),
            signal_endpoint: env::var("SIGNAL_ENDPOINT").unwrap_or(defaults.signal_endpoint),
            gateway_endpoint: env::var("GATEWAY_ENDPOINT").unwrap_or(defaults.gateway_endpoint),
            gateway_request_timeout: env::var("GATEWAY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.gateway_request_timeout),
            gateway_retry_count: env::var("GATEWAY_RETRY_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.gateway_retry_count),
            data_dir: env::var("PIPELINE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            tmp_dir: env::var("PIPELINE_TMP_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.tmp_dir),
            default_order_quantity: env::var("EXECUTOR_DEFAULT_QUANTITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_order_quantity),
            session_timeout: env::var("SESSION_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_timeout),
        }
    }

    pub fn session_file(&self) -> PathBuf {
        self.tmp_dir.join("session.json")
    }

    pub fn conditions_file(&self) -> PathBuf {
        self.data_dir.join("conditions.json")
    }

    pub fn pid_dir(&self) -> PathBuf {
        self.tmp_dir.join("pids")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_endpoints() {
        let config = PipelineConfig::default();
        assert_eq!(config.tick_pub_endpoint, "tcp://127.0.0.1:5555");
        assert_eq!(config.signal_endpoint, "tcp://127.0.0.1:5556");
        assert_eq!(config.gateway_endpoint, "tcp://127.0.0.1:5557");
        assert_eq!(config.default_order_quantity, 1);
    }
}
