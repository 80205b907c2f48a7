//! Session — the ambient authenticated-user context shared across processes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The currently authenticated user context: account, traded symbol, and
/// expiry. Singleton per process group; persisted so the Strategy and Order
/// Executor processes (which never log in themselves) can read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub account: String,
    pub logged_in: bool,
    pub expires_at: DateTime<Utc>,
    pub order_account: Option<String>,
    pub item_code: Option<String>,
}

impl Session {
    pub fn new(account: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            account: account.into(),
            logged_in: true,
            expires_at,
            order_account: None,
            item_code: None,
        }
    }

    /// A session is considered logged in only while `logged_in` is set *and*
    /// the wall clock has not passed `expires_at` — matching
    /// `is_user_logged_in()`'s `now > expires_at` check in the store design.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.logged_in && now <= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expired_session_is_not_active() {
        let session = Session::new("12345", Utc::now() - Duration::seconds(1));
        assert!(!session.is_active(Utc::now()));
    }

    #[test]
    fn unexpired_session_is_active() {
        let session = Session::new("12345", Utc::now() + Duration::seconds(60));
        assert!(session.is_active(Utc::now()));
    }
}
