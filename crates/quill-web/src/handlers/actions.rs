//! Form action handlers: sign-in, sign-up, logout, note deletion.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use quill_auth::{encode_session, session_from_cookies, CookieAccess, SetCookie};

use crate::cookie_adapter::{append_cookie, RequestCookies};
use crate::state::AppState;

/// Credentials submitted by the login and sign-up forms.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Redirect carrying a freshly issued session cookie, or back to the form
/// with a generic error when the identity service declines.
fn session_redirect(session: quill_core::Result<quill_core::Session>, form_path: &str) -> Response {
    match session.and_then(|s| encode_session(&s)) {
        Ok(value) => {
            let mut response = Redirect::to("/").into_response();
            append_cookie(&mut response, &SetCookie::session(value));
            response
        }
        Err(e) => {
            // Credential failures are expected traffic; don't log them as faults.
            debug!(
                subsystem = "web",
                component = "actions",
                error = %e,
                "Sign-in attempt rejected"
            );
            Redirect::to(&format!("{}?error=1", form_path)).into_response()
        }
    }
}

/// POST `/login`.
pub async fn login(State(state): State<AppState>, Form(creds): Form<Credentials>) -> Response {
    let session = state
        .identity
        .password_grant(&creds.email, &creds.password)
        .await;
    session_redirect(session, "/login")
}

/// POST `/sign-up`.
pub async fn sign_up(State(state): State<AppState>, Form(creds): Form<Credentials>) -> Response {
    let session = state.identity.sign_up(&creds.email, &creds.password).await;
    session_redirect(session, "/sign-up")
}

/// POST `/logout` — best-effort server-side revocation, then clear the
/// session cookie and land on the login page.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookies = RequestCookies::from_headers(&headers);
    if let Ok(Some(session)) = session_from_cookies(&cookies.get_all()) {
        if let Err(e) = state.identity.logout(&session.access_token).await {
            warn!(
                subsystem = "web",
                component = "actions",
                op = "logout",
                error = %e,
                "Server-side logout failed, clearing cookie anyway"
            );
        }
    }

    let mut response = Redirect::to("/login").into_response();
    append_cookie(&mut response, &SetCookie::clear_session());
    response
}

/// POST `/notes/{id}/delete` — the sidebar delete action's server half.
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    let mut cookies = RequestCookies::from_headers(&headers);
    let Some(user) = state.resolver.resolve(&mut cookies).await else {
        let mut response = Redirect::to("/login").into_response();
        cookies.apply_to(&mut response);
        return response;
    };

    match state.notes.delete_owned(id, user.id).await {
        Ok(true) => {
            info!(
                subsystem = "web",
                component = "actions",
                op = "delete_note",
                note_id = %id,
                user_id = %user.id,
                "Note deleted"
            );
        }
        Ok(false) => {
            debug!(
                subsystem = "web",
                component = "actions",
                op = "delete_note",
                note_id = %id,
                user_id = %user.id,
                "Delete matched no owned note"
            );
        }
        Err(e) => {
            warn!(
                subsystem = "web",
                component = "actions",
                op = "delete_note",
                note_id = %id,
                error = %e,
                "Note deletion failed"
            );
        }
    }

    let mut response = Redirect::to("/").into_response();
    cookies.apply_to(&mut response);
    response
}

/// GET `/health` — liveness endpoint.
pub async fn health() -> Response {
    Json(serde_json::json!({
        "name": "quill-web",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
    .into_response()
}
