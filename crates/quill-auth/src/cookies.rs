//! Cookie access abstraction and the session cookie codec.
//!
//! The identity layer never touches a framework request directly; it reads
//! and writes cookies through [`CookieAccess`], a pluggable get_all/set_all
//! capability with one concrete adapter per request-handling framework.

use base64::Engine;
use serde::{Deserialize, Serialize};

use quill_core::{Error, Result, Session};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "quill-session";

/// A cookie as read from the incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePair {
    pub name: String,
    pub value: String,
}

/// A cookie to write onto the outgoing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    /// Max-Age in seconds. Zero or negative expires the cookie.
    pub max_age_secs: i64,
}

impl SetCookie {
    /// Session cookie with a default one-week lifetime.
    pub fn session(value: String) -> Self {
        Self {
            name: SESSION_COOKIE.to_string(),
            value,
            max_age_secs: 7 * 24 * 3600,
        }
    }

    /// An expired session cookie, used to sign out.
    pub fn clear_session() -> Self {
        Self {
            name: SESSION_COOKIE.to_string(),
            value: String::new(),
            max_age_secs: 0,
        }
    }

    /// Render as a Set-Cookie header value.
    pub fn to_header_value(&self) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name, self.value, self.max_age_secs.max(0)
        )
    }
}

/// Pluggable cookie read/write capability supplied to the session resolver.
///
/// `get_all` returns the request's cookies; `set_all` stages cookies to be
/// written onto the outgoing response. Implementations are per-request and
/// not shared across threads mid-request, but must be `Send` so resolution
/// can cross await points.
pub trait CookieAccess: Send {
    /// All cookies present on the incoming request.
    fn get_all(&self) -> Vec<CookiePair>;

    /// Stage cookies for the outgoing response.
    fn set_all(&mut self, cookies: Vec<SetCookie>);
}

/// Parse a `Cookie` request header into name/value pairs.
///
/// Malformed segments (no `=`) are skipped rather than rejected; browsers
/// send what they send.
pub fn parse_cookie_header(header: &str) -> Vec<CookiePair> {
    header
        .split(';')
        .filter_map(|segment| {
            let segment = segment.trim();
            let (name, value) = segment.split_once('=')?;
            if name.is_empty() {
                return None;
            }
            Some(CookiePair {
                name: name.trim().to_string(),
                value: value.trim().to_string(),
            })
        })
        .collect()
}

/// Wire form of the session cookie payload.
#[derive(Debug, Serialize, Deserialize)]
struct SessionPayload {
    access_token: String,
    refresh_token: String,
    expires_at: i64,
}

/// Encode a session as a base64(JSON) cookie value.
pub fn encode_session(session: &Session) -> Result<String> {
    let payload = SessionPayload {
        access_token: session.access_token.clone(),
        refresh_token: session.refresh_token.clone(),
        expires_at: session.expires_at,
    };
    let json = serde_json::to_vec(&payload)?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json))
}

/// Decode a session from a cookie value produced by [`encode_session`].
pub fn decode_session(value: &str) -> Result<Session> {
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(value.as_bytes())
        .map_err(|e| Error::Cookie(format!("invalid base64: {}", e)))?;
    let payload: SessionPayload = serde_json::from_slice(&bytes)
        .map_err(|e| Error::Cookie(format!("invalid payload: {}", e)))?;
    Ok(Session {
        access_token: payload.access_token,
        refresh_token: payload.refresh_token,
        expires_at: payload.expires_at,
    })
}

/// Read the session from a cookie set, if one is present and decodable.
pub fn session_from_cookies(cookies: &[CookiePair]) -> Result<Option<Session>> {
    let Some(cookie) = cookies.iter().find(|c| c.name == SESSION_COOKIE) else {
        return Ok(None);
    };
    if cookie.value.is_empty() {
        return Ok(None);
    }
    decode_session(&cookie.value).map(Some)
}
