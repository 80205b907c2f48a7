#![forbid(unsafe_code)]
#![warn(unused, missing_debug_implementations, rust_2018_idioms)]

//! Tick Publisher/Subscriber: pub/sub fan-out of market ticks (§4.3).

pub mod error;
pub mod publisher;
pub mod subscriber;

pub use error::TickError;
pub use publisher::{TickPublisher, TOPIC};
pub use subscriber::TickSubscriber;
