//! Session cookie extractor.
//!
//! Every request carries an opaque session ID in the `bb_session` cookie.
//! Requests without one get a freshly minted ID; the handler persists it by
//! attaching [`SessionId::cookie`] to its response.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{HeaderMap, HeaderName, COOKIE, SET_COOKIE};
use axum::http::request::Parts;

use crate::core::session::SessionStore;

pub const SESSION_COOKIE: &str = "bb_session";

pub struct SessionId {
    pub id: String,
    issued: bool,
}

impl SessionId {
    /// `Set-Cookie` header for a freshly issued ID, `None` when the browser
    /// already had one.
    pub fn cookie(&self) -> Option<[(HeaderName, String); 1]> {
        self.issued.then(|| {
            [(
                SET_COOKIE,
                format!(
                    "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
                    self.id
                ),
            )]
        })
    }
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = cookie_value(&parts.headers, SESSION_COOKIE) {
            return Ok(SessionId { id, issued: false });
        }
        Ok(SessionId {
            id: SessionStore::issue_id(),
            issued: true,
        })
    }
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn finds_the_session_cookie_among_others() {
        let headers = headers("theme=dark; bb_session=abc-123; lang=en");
        assert_eq!(
            cookie_value(&headers, SESSION_COOKIE).as_deref(),
            Some("abc-123")
        );
    }

    #[test]
    fn missing_or_empty_cookie_is_none() {
        assert!(cookie_value(&HeaderMap::new(), SESSION_COOKIE).is_none());
        assert!(cookie_value(&headers("bb_session="), SESSION_COOKIE).is_none());
        assert!(cookie_value(&headers("other=1"), SESSION_COOKIE).is_none());
    }

    #[test]
    fn issued_ids_produce_a_set_cookie_header() {
        let fresh = SessionId {
            id: "abc".to_string(),
            issued: true,
        };
        let [(name, value)] = fresh.cookie().unwrap();
        assert_eq!(name, SET_COOKIE);
        assert!(value.starts_with("bb_session=abc;"));
        assert!(value.contains("HttpOnly"));

        let existing = SessionId {
            id: "abc".to_string(),
            issued: false,
        };
        assert!(existing.cookie().is_none());
    }
}
