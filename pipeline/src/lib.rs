#![forbid(unsafe_code)]
#![warn(unused, missing_debug_implementations, rust_2018_idioms)]

//! Facade crate: re-exports the pipeline ecosystem for downstream
//! consumers and hosts the process entry points under `src/bin/`.

pub use pipeline_broker as broker;
pub use pipeline_conditions as conditions;
pub use pipeline_core as core;
pub use pipeline_executor as executor;
pub use pipeline_gateway as gateway;
pub use pipeline_lifecycle as lifecycle;
pub use pipeline_session as session;
pub use pipeline_signals as signals;
pub use pipeline_strategy as strategy;
pub use pipeline_ticks as ticks;
