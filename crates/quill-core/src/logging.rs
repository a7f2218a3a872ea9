//! Structured logging field name constants for quill.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, request still served |
//! | INFO  | Lifecycle events (startup, shutdown), auth transitions |
//! | DEBUG | Decision points (guard outcomes, cookie refresh) |
//! | TRACE | Per-item iteration (filter hits) |

/// Correlation ID propagated across a request. Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "web", "auth", "db"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "session_routing", "resolver", "pool", "sidebar"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "resolve", "auto_note", "filter", "refresh"
pub const OPERATION: &str = "op";

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// User UUID the request resolved to.
pub const USER_ID: &str = "user_id";

/// Request path being guarded.
pub const PATH: &str = "path";

/// Search query text.
pub const QUERY: &str = "query";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a filter or query.
pub const RESULT_COUNT: &str = "result_count";

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
