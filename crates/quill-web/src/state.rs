//! Application state shared across handlers and middleware.

use std::sync::Arc;

use minijinja::Environment;

use quill_auth::SessionResolver;
use quill_core::{IdentityProvider, NoteRepository};

use crate::sidebar::FilterConfig;
use crate::templates;

/// Shared application state.
///
/// Repositories and the identity provider are held as trait objects so tests
/// can swap in in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    /// Note persistence.
    pub notes: Arc<dyn NoteRepository>,
    /// Identity service client.
    pub identity: Arc<dyn IdentityProvider>,
    /// Per-request session resolution.
    pub resolver: Arc<SessionResolver>,
    /// Absolute base URL of this application, used when redirecting away
    /// from auth routes.
    pub base_url: String,
    /// Compiled page templates.
    pub templates: Arc<Environment<'static>>,
    /// Sidebar filter configuration.
    pub filter: FilterConfig,
}

impl AppState {
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        identity: Arc<dyn IdentityProvider>,
        base_url: String,
    ) -> Self {
        let resolver = Arc::new(SessionResolver::new(identity.clone()));
        Self {
            notes,
            identity,
            resolver,
            base_url,
            templates: Arc::new(templates::environment()),
            filter: FilterConfig::default(),
        }
    }
}
