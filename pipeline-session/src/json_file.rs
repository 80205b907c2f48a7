//! JSON-file-backed Session Store (§4.8).
//!
//! Every write is a whole-file rewrite; every read re-parses the file from
//! disk rather than trusting an in-process cache, since the Strategy and
//! Order Executor processes need to observe writes made by the host
//! process.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use tracing::warn;

use pipeline_core::Session;

use crate::error::SessionError;
use crate::store::SessionStore;

pub struct JsonFileSessionStore {
    path: PathBuf,
    session_timeout: Duration,
}

impl std::fmt::Debug for JsonFileSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileSessionStore")
            .field("path", &self.path)
            .finish()
    }
}

impl JsonFileSessionStore {
    pub fn new(path: impl AsRef<Path>, session_timeout: Duration) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            session_timeout,
        }
    }

    /// A malformed file is treated as "no session" rather than a hard
    /// error: a corrupted session on disk should not crash an auxiliary
    /// reader, only force a fresh login.
    fn read(&self) -> Result<Option<Session>, SessionError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if bytes.is_empty() {
            return Ok(None);
        }
        match serde_json::from_slice(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed session record, treating as logged out");
                Ok(None)
            }
        }
    }

    fn write(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_vec_pretty(session)
            .map_err(|e| SessionError::Decode(e.to_string()))?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    fn current_or_no_session(&self) -> Result<Session, SessionError> {
        self.read()?.ok_or(SessionError::NoSession)
    }
}

impl SessionStore for JsonFileSessionStore {
    fn create_session(&mut self, account: &str) -> Result<Session, SessionError> {
        let session = Session::new(account, Utc::now() + self.session_timeout);
        self.write(&session)?;
        Ok(session)
    }

    fn get_current_user(&self) -> Result<Option<Session>, SessionError> {
        self.read()
    }

    fn is_user_logged_in(&self) -> Result<bool, SessionError> {
        Ok(self
            .read()?
            .map(|session| session.is_active(Utc::now()))
            .unwrap_or(false))
    }

    fn destroy_session(&mut self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn renew_session(&mut self) -> Result<Session, SessionError> {
        let mut session = self.current_or_no_session()?;
        if !session.is_active(Utc::now()) {
            return Err(SessionError::NoSession);
        }
        session.expires_at = Utc::now() + self.session_timeout;
        self.write(&session)?;
        Ok(session)
    }

    fn get_order_account(&self) -> Result<Option<String>, SessionError> {
        Ok(self.read()?.and_then(|session| session.order_account))
    }

    fn set_order_account(&mut self, order_account: &str) -> Result<(), SessionError> {
        let mut session = self.current_or_no_session()?;
        session.order_account = Some(order_account.to_string());
        self.write(&session)
    }

    fn get_item_code(&self) -> Result<Option<String>, SessionError> {
        Ok(self.read()?.and_then(|session| session.item_code))
    }

    fn set_item_code(&mut self, item_code: &str) -> Result<(), SessionError> {
        let mut session = self.current_or_no_session()?;
        session.item_code = Some(item_code.to_string());
        self.write(&session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> JsonFileSessionStore {
        JsonFileSessionStore::new(dir.path().join("session.json"), Duration::seconds(60))
    }

    #[test]
    fn missing_file_reports_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        assert_eq!(store.get_current_user().unwrap(), None);
        assert!(!store.is_user_logged_in().unwrap());
    }

    #[test]
    fn created_session_round_trips_and_renew_extends_expiry() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        let created = store.create_session("12345").unwrap();
        assert!(store.is_user_logged_in().unwrap());

        let renewed = store.renew_session().unwrap();
        assert!(renewed.expires_at >= created.expires_at);
    }

    #[test]
    fn renewing_without_a_session_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        assert!(matches!(store.renew_session(), Err(SessionError::NoSession)));
    }

    #[test]
    fn destroy_clears_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        store.create_session("12345").unwrap();
        store.destroy_session().unwrap();
        assert_eq!(store.get_current_user().unwrap(), None);
    }

    #[test]
    fn order_account_and_item_code_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        store.create_session("12345").unwrap();
        store.set_order_account("99999").unwrap();
        store.set_item_code("WINZ25").unwrap();
        assert_eq!(store.get_order_account().unwrap().as_deref(), Some("99999"));
        assert_eq!(store.get_item_code().unwrap().as_deref(), Some("WINZ25"));
    }

    #[test]
    fn malformed_file_is_treated_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = JsonFileSessionStore::new(&path, Duration::seconds(60));
        assert_eq!(store.get_current_user().unwrap(), None);
    }
}
