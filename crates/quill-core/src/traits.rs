//! Core traits for quill abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability: the Postgres
//! repository and the HTTP identity client in production, in-memory mocks
//! in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{CreateNoteRequest, Note, NoteSummary, Session, User};

/// Repository for note persistence.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note, returning its id.
    async fn insert(&self, req: CreateNoteRequest) -> Result<Uuid>;

    /// Fetch a full note by id.
    async fn fetch(&self, id: Uuid) -> Result<Note>;

    /// The author's most recently created note, if any
    /// (created time descending, limit 1).
    async fn latest_for_author(&self, author_id: Uuid) -> Result<Option<NoteSummary>>;

    /// All of the author's notes, most recent first.
    async fn list_for_author(&self, author_id: Uuid) -> Result<Vec<NoteSummary>>;

    /// Delete a note if it is owned by `author_id`. Returns whether a row
    /// was deleted.
    async fn delete_owned(&self, id: Uuid, author_id: Uuid) -> Result<bool>;
}

/// Client for the external identity service.
///
/// Every operation is a single request/response call; no retries or caching
/// happen at this layer.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the user a bearer access token belongs to.
    ///
    /// Returns `Error::SessionMissing` when the service reports no active
    /// session for the token; callers treat that as an empty result, not a
    /// failure.
    async fn get_user(&self, access_token: &str) -> Result<User>;

    /// Exchange a refresh token for a rotated session.
    async fn refresh(&self, refresh_token: &str) -> Result<Session>;

    /// Password sign-in, returning a fresh session.
    async fn password_grant(&self, email: &str, password: &str) -> Result<Session>;

    /// Register a new account, returning its first session.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session>;

    /// Revoke a session server-side. Best effort; callers clear the cookie
    /// regardless of the outcome.
    async fn logout(&self, access_token: &str) -> Result<()>;
}
