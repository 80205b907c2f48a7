#![forbid(unsafe_code)]
#![warn(unused, missing_debug_implementations, rust_2018_idioms)]

//! Broker Gateway: the request/reply service that serializes every native
//! broker-library call through a single worker (§4.1, §4.2).
//!
//! [`server::GatewayServer`] binds a ZeroMQ REP socket and owns the only
//! live [`pipeline_broker::BrokerCapability`] in the deployment.
//! [`client::GatewayClient`] is the thin REQ-socket façade every other
//! process uses instead of touching the broker directly.

pub mod client;
pub mod error;
pub mod protocol;
pub mod server;

pub use client::GatewayClient;
pub use error::GatewayError;
pub use server::{GatewayServer, GatewayState};
