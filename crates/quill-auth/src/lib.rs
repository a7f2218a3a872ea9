//! # quill-auth
//!
//! Session resolution for quill against the hosted identity service.
//!
//! This crate provides:
//! - A pluggable cookie read/write capability ([`CookieAccess`])
//! - The base64-JSON session cookie codec
//! - The identity service HTTP client ([`IdentityClient`])
//! - The per-request [`SessionResolver`]

pub mod client;
pub mod cookies;
pub mod resolver;

pub use client::{IdentityClient, SESSION_MISSING_MSG};
pub use cookies::{
    decode_session, encode_session, parse_cookie_header, session_from_cookies, CookieAccess,
    CookiePair, SetCookie, SESSION_COOKIE,
};
pub use resolver::SessionResolver;
