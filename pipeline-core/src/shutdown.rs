//! # Shutdown Management
//!
//! Traits for components that participate in the pipeline's ordered
//! startup/shutdown sequencing (§4.7), plus the `Shutdown` signal type used
//! to request it.
//!
//! ### Synchronous Shutdown
//! ```rust,ignore
//! use pipeline_core::shutdown::SyncShutdown;
//!
//! struct SimpleComponent;
//!
//! impl SyncShutdown for SimpleComponent {
//!     type Result = ();
//!     fn shutdown(&mut self) -> Self::Result {}
//! }
//! ```
//!
//! ### Asynchronous Shutdown
//! ```rust,ignore
//! use pipeline_core::shutdown::AsyncShutdown;
//!
//! struct AsyncComponent;
//!
//! impl AsyncShutdown for AsyncComponent {
//!     type Result = Result<(), String>;
//!     fn shutdown(&mut self) -> impl std::future::Future<Output = Self::Result> {
//!         async move { Ok(()) }
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::future::Future;

/// Components that can shut down without awaiting anything — the Gateway
/// Server's worker thread join, the Tick Publisher's socket close.
pub trait SyncShutdown {
    type Result;
    fn shutdown(&mut self) -> Self::Result;
}

/// Components whose shutdown needs to await something — draining a signal
/// channel, joining a tokio task.
pub trait AsyncShutdown {
    type Result;
    fn shutdown(&mut self) -> impl Future<Output = Self::Result>;
}

/// A shutdown signal that can be threaded through a stop-flag or channel to
/// request that all components begin graceful shutdown.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize,
)]
pub struct Shutdown;
