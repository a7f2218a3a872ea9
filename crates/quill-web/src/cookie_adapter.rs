//! Axum adapter for the pluggable cookie capability.
//!
//! Bridges the framework-neutral [`CookieAccess`] trait onto axum's header
//! types: cookies are read from the request's `Cookie` headers up front, and
//! anything staged via `set_all` is appended to the outgoing response as
//! `Set-Cookie` headers once the handler or middleware is done.

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;

use quill_auth::{parse_cookie_header, CookieAccess, CookiePair, SetCookie};

/// Per-request cookie jar.
pub struct RequestCookies {
    incoming: Vec<CookiePair>,
    staged: Vec<SetCookie>,
}

impl RequestCookies {
    /// Read all cookies from the request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let incoming = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(parse_cookie_header)
            .collect();
        Self {
            incoming,
            staged: Vec::new(),
        }
    }

    /// Cookies staged for the outgoing response.
    pub fn staged(&self) -> &[SetCookie] {
        &self.staged
    }

    /// Append staged cookies to a response as Set-Cookie headers.
    pub fn apply_to(&self, response: &mut Response) {
        for cookie in &self.staged {
            if let Ok(value) = HeaderValue::from_str(&cookie.to_header_value()) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }
    }
}

impl CookieAccess for RequestCookies {
    fn get_all(&self) -> Vec<CookiePair> {
        self.incoming.clone()
    }

    fn set_all(&mut self, cookies: Vec<SetCookie>) {
        self.staged.extend(cookies);
    }
}

/// Append a single cookie to an already-built response.
pub fn append_cookie(response: &mut Response, cookie: &SetCookie) {
    if let Ok(value) = HeaderValue::from_str(&cookie.to_header_value()) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}
