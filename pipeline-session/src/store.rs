//! The Session Store interface (§4.8).

use pipeline_core::Session;

use crate::error::SessionError;

/// Persistent record of the logged-in user, account, and traded symbol.
///
/// A singleton per process group: the Gateway host process is the only
/// writer, the Strategy and Order Executor processes only ever read it.
pub trait SessionStore: Send {
    fn create_session(&mut self, account: &str) -> Result<Session, SessionError>;

    fn get_current_user(&self) -> Result<Option<Session>, SessionError>;

    /// `false` once `now > expires_at`, matching the store design's
    /// wall-clock comparison rather than trusting a cached `logged_in` flag.
    fn is_user_logged_in(&self) -> Result<bool, SessionError>;

    fn destroy_session(&mut self) -> Result<(), SessionError>;

    /// Extends `expires_at` by the store's configured session timeout, but
    /// only while the session is currently active; renewing an expired or
    /// absent session is an error.
    fn renew_session(&mut self) -> Result<Session, SessionError>;

    fn get_order_account(&self) -> Result<Option<String>, SessionError>;
    fn set_order_account(&mut self, order_account: &str) -> Result<(), SessionError>;

    fn get_item_code(&self) -> Result<Option<String>, SessionError>;
    fn set_item_code(&mut self, item_code: &str) -> Result<(), SessionError>;
}
