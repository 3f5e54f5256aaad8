//! Per-browser-session chat state and the store that owns it.
//!
//! A session is either fully unauthenticated or fully authenticated; there
//! is no partial state. The transcript only ever grows within a session,
//! and logout wipes the whole record rather than flipping a flag.

use std::fmt;

use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use uuid::Uuid;

use crate::core::credentials::{Credentials, Identity, Role};
use crate::core::message::{Message, Speaker};

/// Login failure: the pair matched neither identity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthError;

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid credentials")
    }
}

impl std::error::Error for AuthError {}

#[derive(Debug, Default)]
pub struct Session {
    pub logged_in: bool,
    pub username: Option<String>,
    pub role: Option<Role>,
    /// Bumped on every transcript append so the rendered input field gets a
    /// fresh element identity on each redraw.
    pub input_counter: u64,
    pub transcript: Vec<Message>,
}

impl Session {
    /// Compare against both configured identity records. A match
    /// authenticates the session; a mismatch leaves it untouched.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
        credentials: &Credentials,
    ) -> Result<(), AuthError> {
        match credentials.authenticate(username, password) {
            Some(identity) => {
                self.authenticate_as(identity);
                Ok(())
            }
            None => Err(AuthError),
        }
    }

    pub(crate) fn authenticate_as(&mut self, identity: &Identity) {
        self.logged_in = true;
        self.username = Some(identity.username.clone());
        self.role = Some(identity.role);
    }

    /// Full reset, not just flipping the flag, so a stale transcript or
    /// role cannot leak into the next login.
    pub fn logout(&mut self) {
        *self = Session::default();
    }

    pub fn append_message(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.transcript.push(Message::new(speaker, text));
        self.input_counter += 1;
    }
}

/// In-process map from opaque cookie ID to session. All state lives here;
/// nothing survives a restart.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint an ID for a browser that does not have one yet.
    pub fn issue_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Return the session for `id`, creating it on first access. A fresh
    /// session auto-authenticates as the guest identity when skip-login is
    /// enabled.
    pub fn get_or_create(
        &self,
        id: &str,
        credentials: &Credentials,
    ) -> RefMut<'_, String, Session> {
        self.sessions.entry(id.to_string()).or_insert_with(|| {
            let mut session = Session::default();
            if credentials.skip_login {
                session.authenticate_as(&credentials.guest);
            }
            session
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::from_lookup(|_| None)
    }

    #[test]
    fn login_stores_the_matched_identity() {
        let credentials = credentials();
        let mut session = Session::default();

        session.login("guest", "guest", &credentials).unwrap();
        assert!(session.logged_in);
        assert_eq!(session.username.as_deref(), Some("guest"));
        assert_eq!(session.role, Some(Role::Guest));

        let mut session = Session::default();
        session.login("admin", "admin", &credentials).unwrap();
        assert_eq!(session.role, Some(Role::Admin));
    }

    #[test]
    fn failed_login_leaves_the_session_unauthenticated() {
        let credentials = credentials();
        let mut session = Session::default();

        assert_eq!(session.login("guest", "wrong", &credentials), Err(AuthError));
        assert!(!session.logged_in);
        assert!(session.username.is_none());
        assert!(session.role.is_none());
    }

    #[test]
    fn logout_resets_every_field() {
        let credentials = credentials();
        let mut session = Session::default();
        session.login("admin", "admin", &credentials).unwrap();
        session.append_message(Speaker::User, "hello");
        session.append_message(Speaker::Assistant, "hi");

        session.logout();
        assert!(!session.logged_in);
        assert!(session.username.is_none());
        assert!(session.role.is_none());
        assert!(session.transcript.is_empty());
        assert_eq!(session.input_counter, 0);
    }

    #[test]
    fn transcript_preserves_append_order() {
        let mut session = Session::default();
        session.append_message(Speaker::User, "one");
        session.append_message(Speaker::Assistant, "two");
        session.append_message(Speaker::User, "three");

        let texts: Vec<&str> = session
            .transcript
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert_eq!(session.input_counter, 3);
    }

    #[test]
    fn store_returns_the_same_session_for_the_same_id() {
        let credentials = credentials();
        let store = SessionStore::new();

        store
            .get_or_create("a", &credentials)
            .append_message(Speaker::User, "hello");

        assert_eq!(store.get_or_create("a", &credentials).transcript.len(), 1);
        assert!(store.get_or_create("b", &credentials).transcript.is_empty());
    }

    #[test]
    fn skip_login_auto_authenticates_as_the_guest_identity() {
        let credentials = Credentials::from_lookup(|name| match name {
            "GUEST_USER_NAME" => Some("alice".to_string()),
            "SKIP_LOGIN" => Some("true".to_string()),
            _ => None,
        });
        let store = SessionStore::new();

        let session = store.get_or_create("a", &credentials);
        assert!(session.logged_in);
        assert_eq!(session.username.as_deref(), Some("alice"));
        assert_eq!(session.role, Some(Role::Guest));
    }

    #[test]
    fn logout_is_not_undone_by_skip_login() {
        let credentials = Credentials::from_lookup(|name| match name {
            "SKIP_LOGIN" => Some("true".to_string()),
            _ => None,
        });
        let store = SessionStore::new();

        store.get_or_create("a", &credentials).logout();
        // The session already exists, so skip-login must not re-authenticate it.
        assert!(!store.get_or_create("a", &credentials).logged_in);
    }
}
