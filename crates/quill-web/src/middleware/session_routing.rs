//! Session routing middleware.
//!
//! Runs before every page render (static assets excluded) and applies two
//! guards in order:
//!
//! 1. Auth-route guard: a signed-in visitor requesting `/login` or `/sign-up`
//!    is redirected to the application root.
//! 2. Root auto-note guard: a signed-in visitor requesting `/` without a
//!    `noteId` query parameter is redirected to `/?noteId=<id>`, where the id
//!    is the user's most recent note, created first if none exists.
//!
//! Every datastore failure aborts the guard only: the request is served
//! unmodified after logging. Cookies rotated during session resolution are
//! written onto whichever response leaves this middleware.

use std::sync::OnceLock;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use quill_core::CreateNoteRequest;

use crate::cookie_adapter::RequestCookies;
use crate::state::AppState;

/// Paths that never enter the guard logic: static assets and images.
const ASSET_EXCLUSION_PATTERN: &str =
    r"(?i)^/(static/|favicon\.ico$)|\.(svg|png|jpg|jpeg|gif|webp)$";

fn asset_exclusion() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ASSET_EXCLUSION_PATTERN).expect("asset pattern is valid"))
}

/// Whether a request path is excluded from routing guards.
pub fn is_excluded_path(path: &str) -> bool {
    asset_exclusion().is_match(path)
}

/// Whether a raw query string carries a `noteId` parameter.
pub fn query_has_note_id(query: Option<&str>) -> bool {
    let Some(query) = query else {
        return false;
    };
    query.split('&').any(|pair| {
        let key = pair.split('=').next().unwrap_or("");
        key == "noteId"
    })
}

/// The user's most recent note id, inserting a fresh default note when the
/// user has none.
async fn ensure_note(state: &AppState, author_id: Uuid) -> quill_core::Result<Uuid> {
    if let Some(latest) = state.notes.latest_for_author(author_id).await? {
        return Ok(latest.id);
    }

    // Read-then-insert: two simultaneous first visits can each insert here.
    // The duplicate is benign, so no uniqueness is enforced at this layer.
    let note_id = state
        .notes
        .insert(CreateNoteRequest::auto_provisioned(author_id))
        .await?;

    info!(
        subsystem = "web",
        component = "session_routing",
        op = "auto_note",
        user_id = %author_id,
        note_id = %note_id,
        "Auto-provisioned first note"
    );
    Ok(note_id)
}

/// Session routing middleware function.
pub async fn session_routing_middleware(
    State(state): State<AppState>,
    req: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> Response {
    let path = req.uri().path().to_string();
    if is_excluded_path(&path) {
        return next.run(req).await;
    }

    let is_auth_route = path == "/login" || path == "/sign-up";
    let is_bare_root = path == "/" && !query_has_note_id(req.uri().query());

    if !is_auth_route && !is_bare_root {
        return next.run(req).await;
    }

    let mut cookies = RequestCookies::from_headers(req.headers());
    let user = state.resolver.resolve(&mut cookies).await;

    let mut response = if is_auth_route {
        match user {
            // Signed-in visitors have no business on the auth pages.
            Some(_) => Redirect::to(&state.base_url).into_response(),
            None => next.run(req).await,
        }
    } else {
        match user {
            Some(user) => match ensure_note(&state, user.id).await {
                Ok(note_id) => {
                    let location = match req.uri().query() {
                        Some(q) if !q.is_empty() => format!("/?{}&noteId={}", q, note_id),
                        _ => format!("/?noteId={}", note_id),
                    };
                    Redirect::to(&location).into_response()
                }
                Err(e) => {
                    // Guard aborts; the request is still served.
                    warn!(
                        subsystem = "web",
                        component = "session_routing",
                        op = "auto_note",
                        user_id = %user.id,
                        error = %e,
                        "Auto-note guard failed, serving request unmodified"
                    );
                    next.run(req).await
                }
            },
            None => next.run(req).await,
        }
    };

    cookies.apply_to(&mut response);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_paths_are_excluded() {
        assert!(is_excluded_path("/favicon.ico"));
        assert!(is_excluded_path("/static/app.css"));
        assert!(is_excluded_path("/images/logo.png"));
        assert!(is_excluded_path("/anime.PNG"));
        assert!(is_excluded_path("/img/photo.webp"));
    }

    #[test]
    fn test_page_paths_are_not_excluded() {
        assert!(!is_excluded_path("/"));
        assert!(!is_excluded_path("/login"));
        assert!(!is_excluded_path("/sign-up"));
        assert!(!is_excluded_path("/notes/abc/delete"));
    }

    #[test]
    fn test_query_has_note_id() {
        assert!(query_has_note_id(Some("noteId=abc")));
        assert!(query_has_note_id(Some("q=milk&noteId=abc")));
        assert!(!query_has_note_id(Some("q=milk")));
        assert!(!query_has_note_id(Some("notEId=abc")));
        assert!(!query_has_note_id(None));
    }
}
