//! Session resolution: cookies in, optional user out.

use std::sync::Arc;

use tracing::{debug, error, warn};

use quill_core::{Error, IdentityProvider, Session, User};

use crate::cookies::{encode_session, session_from_cookies, CookieAccess, SetCookie};

/// Resolves "who, if anyone, is calling" from a request's cookie set.
///
/// Resolution never fails: every error degrades to `None` after logging per
/// the taxonomy below. A rotated session is written back through the cookie
/// capability so the browser survives token rotation.
///
/// Error taxonomy:
/// - no session cookie: expected, silent
/// - identity service says "session missing": expected, silent
/// - any other identity error: logged, treated as no-user
pub struct SessionResolver {
    identity: Arc<dyn IdentityProvider>,
}

impl SessionResolver {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// Resolve the current user, refreshing the session first if the access
    /// token has expired. Updated cookie values are staged through
    /// `cookies.set_all`.
    pub async fn resolve(&self, cookies: &mut dyn CookieAccess) -> Option<User> {
        let session = match session_from_cookies(&cookies.get_all()) {
            Ok(Some(session)) => session,
            Ok(None) => return None,
            Err(e) => {
                debug!(
                    subsystem = "auth",
                    component = "resolver",
                    error = %e,
                    "Discarding undecodable session cookie"
                );
                return None;
            }
        };

        let session = if session.is_expired() {
            match self.refresh_session(&session, cookies).await {
                Some(session) => session,
                None => return None,
            }
        } else {
            session
        };

        match self.identity.get_user(&session.access_token).await {
            Ok(user) => {
                debug!(
                    subsystem = "auth",
                    component = "resolver",
                    op = "resolve",
                    user_id = %user.id,
                    "Resolved session"
                );
                Some(user)
            }
            Err(Error::SessionMissing) => None,
            Err(e) => {
                error!(
                    subsystem = "auth",
                    component = "resolver",
                    op = "resolve",
                    error = %e,
                    "Identity service error while resolving user"
                );
                None
            }
        }
    }

    async fn refresh_session(
        &self,
        expired: &Session,
        cookies: &mut dyn CookieAccess,
    ) -> Option<Session> {
        match self.identity.refresh(&expired.refresh_token).await {
            Ok(rotated) => match encode_session(&rotated) {
                Ok(value) => {
                    debug!(
                        subsystem = "auth",
                        component = "resolver",
                        op = "refresh",
                        "Session refreshed, rotating cookie"
                    );
                    cookies.set_all(vec![SetCookie::session(value)]);
                    Some(rotated)
                }
                Err(e) => {
                    error!(
                        subsystem = "auth",
                        component = "resolver",
                        op = "refresh",
                        error = %e,
                        "Failed to encode rotated session"
                    );
                    None
                }
            },
            Err(Error::SessionMissing) => None,
            Err(e) => {
                warn!(
                    subsystem = "auth",
                    component = "resolver",
                    op = "refresh",
                    error = %e,
                    "Session refresh failed"
                );
                None
            }
        }
    }
}
