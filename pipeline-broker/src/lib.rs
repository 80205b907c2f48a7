#![forbid(unsafe_code)]
#![warn(unused, missing_debug_implementations, rust_2018_idioms)]

//! Neutral abstraction over the native broker library.
//!
//! Purpose: the Gateway Server is the only process allowed to touch the
//! real broker SDK; everywhere else in the workspace only sees the
//! [`BrokerCapability`] trait. The concrete broker SDK binding itself is out
//! of scope (§1) — this crate ships a [`mock`] implementation good enough to
//! drive the Gateway Server's serialization discipline and tests, mirroring
//! the teacher's `ProfitBackend` mock/real split (`profitdll/src/api.rs`,
//! `profitdll/src/mock.rs`) with "mock" as the only backend that actually
//! ships here.

pub mod capability;
pub mod error;
pub mod mock;

pub use capability::{BrokerCapability, Position};
pub use error::BrokerError;
pub use mock::MockBroker;
