//! # quill-web
//!
//! HTTP server for quill: route middleware, server-rendered pages, and the
//! sidebar search. The router is exposed here so integration tests can drive
//! it with in-memory backends.

pub mod cookie_adapter;
pub mod handlers;
pub mod middleware;
pub mod sidebar;
pub mod state;
pub mod templates;

use axum::{
    routing::{get, post},
    Router,
};

pub use state::AppState;

/// Build the application router with the session routing middleware applied
/// to every route. Observability layers (trace, request-id) are added by the
/// binary.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::index))
        .route(
            "/login",
            get(handlers::pages::login_page).post(handlers::actions::login),
        )
        .route(
            "/sign-up",
            get(handlers::pages::sign_up_page).post(handlers::actions::sign_up),
        )
        .route("/logout", post(handlers::actions::logout))
        .route("/notes/:id/delete", post(handlers::actions::delete_note))
        .route("/health", get(handlers::actions::health))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_routing_middleware,
        ))
        .with_state(state)
}
