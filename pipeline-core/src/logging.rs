//! # Logging Configuration
//!
//! Standardized logging setup for every pipeline process.
//!
//! ## Usage
//! ```rust,ignore
//! use pipeline_core::logging::init_logging;
//!
//! fn main() {
//!     init_logging();
//!     tracing::info!("gateway host starting");
//! }
//! ```
//!
//! ### Environment Configuration
//! ```bash
//! export RUST_LOG=debug
//! export RUST_LOG=pipeline_gateway=debug,pipeline_strategy=info
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes human-readable logging with `RUST_LOG`-driven filtering,
/// defaulting to INFO.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(tracing_subscriber::fmt::layer())
        .init()
}

/// Initializes JSON logging for aggregation, otherwise identical to
/// [`init_logging`].
pub fn init_json_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
        .init()
}
