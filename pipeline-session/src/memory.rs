//! In-memory Session Store, used in tests and single-process deployments.

use chrono::{Duration, Utc};

use pipeline_core::Session;

use crate::error::SessionError;
use crate::store::SessionStore;

#[derive(Debug)]
pub struct InMemorySessionStore {
    session: Option<Session>,
    session_timeout: Duration,
}

impl InMemorySessionStore {
    pub fn new(session_timeout: Duration) -> Self {
        Self {
            session: None,
            session_timeout,
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn create_session(&mut self, account: &str) -> Result<Session, SessionError> {
        let session = Session::new(account, Utc::now() + self.session_timeout);
        self.session = Some(session.clone());
        Ok(session)
    }

    fn get_current_user(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.session.clone())
    }

    fn is_user_logged_in(&self) -> Result<bool, SessionError> {
        Ok(self
            .session
            .as_ref()
            .map(|session| session.is_active(Utc::now()))
            .unwrap_or(false))
    }

    fn destroy_session(&mut self) -> Result<(), SessionError> {
        self.session = None;
        Ok(())
    }

    fn renew_session(&mut self) -> Result<Session, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoSession)?;
        if !session.is_active(Utc::now()) {
            return Err(SessionError::NoSession);
        }
        session.expires_at = Utc::now() + self.session_timeout;
        Ok(session.clone())
    }

    fn get_order_account(&self) -> Result<Option<String>, SessionError> {
        Ok(self.session.as_ref().and_then(|s| s.order_account.clone()))
    }

    fn set_order_account(&mut self, order_account: &str) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoSession)?;
        session.order_account = Some(order_account.to_string());
        Ok(())
    }

    fn get_item_code(&self) -> Result<Option<String>, SessionError> {
        Ok(self.session.as_ref().and_then(|s| s.item_code.clone()))
    }

    fn set_item_code(&mut self, item_code: &str) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoSession)?;
        session.item_code = Some(item_code.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_order_account_requires_a_session() {
        let mut store = InMemorySessionStore::new(Duration::seconds(60));
        assert!(matches!(
            store.set_order_account("99999"),
            Err(SessionError::NoSession)
        ));
    }

    #[test]
    fn create_then_read_round_trips() {
        let mut store = InMemorySessionStore::new(Duration::seconds(60));
        store.create_session("12345").unwrap();
        assert!(store.is_user_logged_in().unwrap());
        assert_eq!(
            store.get_current_user().unwrap().unwrap().account,
            "12345"
        );
    }
}
