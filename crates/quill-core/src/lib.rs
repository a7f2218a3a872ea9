//! # quill-core
//!
//! Core types, traits, and abstractions for the quill note-taking service.
//!
//! This crate provides the foundational data structures, the shared error
//! type, process configuration, and the trait definitions that the database
//! and auth crates implement.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use config::AppConfig;
pub use error::{Error, Result};
pub use models::{CreateNoteRequest, Note, NoteSummary, Session, User};
pub use traits::{IdentityProvider, NoteRepository};
