//! Page handlers: server-rendered views.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use quill_core::{Note, NoteSummary, User};

use crate::cookie_adapter::RequestCookies;
use crate::sidebar::filter_notes;
use crate::state::AppState;
use crate::templates;

/// Query parameters recognized by the root route.
#[derive(Debug, Deserialize, Default)]
pub struct RootQuery {
    /// Selected note. Presence suppresses the middleware's auto-note guard.
    #[serde(rename = "noteId")]
    pub note_id: Option<String>,
    /// Live sidebar search string.
    #[serde(default)]
    pub q: Option<String>,
}

/// Render a template to a full HTML response, mapping render failures to a
/// bare 500 (no user-facing error surface exists for these paths).
fn render_page(state: &AppState, name: &str, ctx: minijinja::Value) -> Response {
    match templates::render(&state.templates, name, ctx) {
        Ok(html) => Html(html).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Fetch the selected note, if the id parses and the note belongs to the
/// caller. Any failure renders as "nothing selected".
async fn selected_note(state: &AppState, user: &User, note_id: Option<&str>) -> Option<Note> {
    let id = note_id.and_then(|raw| Uuid::parse_str(raw).ok())?;
    match state.notes.fetch(id).await {
        Ok(note) if note.author_id == user.id => Some(note),
        Ok(_) => {
            debug!(
                subsystem = "web",
                component = "pages",
                note_id = %id,
                user_id = %user.id,
                "Selected note belongs to another user"
            );
            None
        }
        Err(e) => {
            debug!(
                subsystem = "web",
                component = "pages",
                note_id = %id,
                error = %e,
                "Selected note not loadable"
            );
            None
        }
    }
}

/// GET `/` — the note page: sidebar (filtered), header, selected note.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<RootQuery>,
    headers: HeaderMap,
) -> Response {
    let mut cookies = RequestCookies::from_headers(&headers);
    let user = state.resolver.resolve(&mut cookies).await;

    let mut response = match user {
        None => render_page(
            &state,
            "index",
            context! { user => None::<User>, notes => Vec::<NoteSummary>::new(), query => "", selected => None::<Note> },
        ),
        Some(user) => {
            let notes = match state.notes.list_for_author(user.id).await {
                Ok(notes) => notes,
                Err(e) => {
                    warn!(
                        subsystem = "web",
                        component = "pages",
                        user_id = %user.id,
                        error = %e,
                        "Failed to list notes, rendering empty sidebar"
                    );
                    Vec::new()
                }
            };

            let search = query.q.as_deref().unwrap_or("");
            let filtered = filter_notes(&notes, search, state.filter);
            let selected = selected_note(&state, &user, query.note_id.as_deref()).await;

            render_page(
                &state,
                "index",
                context! {
                    user => user,
                    notes => filtered,
                    query => search,
                    selected => selected,
                },
            )
        }
    };

    cookies.apply_to(&mut response);
    response
}

/// Query parameter for the auth pages' generic failure banner.
#[derive(Debug, Deserialize, Default)]
pub struct AuthPageQuery {
    #[serde(default)]
    pub error: Option<String>,
}

/// GET `/login`.
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<AuthPageQuery>,
) -> Response {
    render_page(
        &state,
        "login",
        context! { user => None::<User>, error => query.error.is_some() },
    )
}

/// GET `/sign-up`.
pub async fn sign_up_page(
    State(state): State<AppState>,
    Query(query): Query<AuthPageQuery>,
) -> Response {
    render_page(
        &state,
        "sign_up",
        context! { user => None::<User>, error => query.error.is_some() },
    )
}
