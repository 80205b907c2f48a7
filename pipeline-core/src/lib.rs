#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    unused_extern_crates,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms
)]
#![allow(clippy::too_many_arguments)]

//! Shared data model and ambient infrastructure for the trading pipeline.
//!
//! Every other crate in the workspace depends on this one for the wire/
//! storage types (`Tick`, `TradingSignal`, `Condition`, `Session`, the order
//! request/response DTOs), the crate-spanning error taxonomy, and the
//! logging/shutdown conventions used across the pipeline's processes.

pub mod condition;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod order;
pub mod session;
pub mod shutdown;
pub mod signal;
pub mod tick;

pub use condition::{Condition, ConditionPhase, ConditionSpec, Side};
pub use config::PipelineConfig;
pub use error::CoreError;
pub use health::HealthSnapshot;
pub use order::{DayTrade, OpenClose, OrderRequest, OrderResponse, OrderType, TimeInForce};
pub use session::Session;
pub use shutdown::{AsyncShutdown, Shutdown, SyncShutdown};
pub use signal::TradingSignal;
pub use tick::Tick;
