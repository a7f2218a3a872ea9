//! Core data models for quill.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default title given to auto-provisioned notes.
pub const DEFAULT_NOTE_TITLE: &str = "New Note";

/// A user's note.
///
/// Owned by exactly one user. Created either through the root auto-note
/// guard or an explicit user action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub created_at_utc: DateTime<Utc>,
}

impl Note {
    /// Display title, falling back to the first content line for untitled
    /// notes, then "Untitled".
    pub fn display_title(&self) -> String {
        if !self.title.trim().is_empty() {
            return self.title.clone();
        }
        self.content
            .lines()
            .find(|l| !l.trim().is_empty())
            .map(|l| l.trim().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

/// Lightweight note projection rendered in the sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteSummary {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at_utc: DateTime<Utc>,
}

impl From<Note> for NoteSummary {
    fn from(n: Note) -> Self {
        let title = n.display_title();
        Self {
            id: n.id,
            title,
            content: n.content,
            created_at_utc: n.created_at_utc,
        }
    }
}

/// Request for creating a new note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

impl CreateNoteRequest {
    /// The row the auto-note guard inserts on a first visit: default title,
    /// empty content.
    pub fn auto_provisioned(author_id: Uuid) -> Self {
        Self {
            title: DEFAULT_NOTE_TITLE.to_string(),
            content: String::new(),
            author_id,
        }
    }
}

/// The authenticated caller, as reported by the identity service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

/// A session derived per request from cookies.
///
/// Transient: never persisted by this codebase, carried only in the session
/// cookie between requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp (seconds) at which the access token expires.
    pub expires_at: i64,
}

impl Session {
    /// Whether the access token has expired as of `now` (Unix seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }

    /// Whether the access token has expired as of the current wall clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }
}
