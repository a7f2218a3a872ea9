//! Request middleware.

pub mod session_routing;

pub use session_routing::{is_excluded_path, query_has_note_id, session_routing_middleware};
