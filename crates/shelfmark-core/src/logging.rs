//! Structured logging schema and field name constants for shelfmark.
//!
//! All crates use these constants for consistent structured logging
//! fields, so log aggregation tools can query by standardized names
//! across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, request failed but service healthy |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "resolver", "db"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "classifier", "text_handler", "pool", "items"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "resolve", "save_item", "replace_tag"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Saved item UUID being operated on.
pub const ITEM_ID: &str = "item_id";

/// Owning user UUID.
pub const USER_ID: &str = "user_id";

/// URL as submitted by the caller.
pub const URL: &str = "url";

/// Terminal post-redirect URL.
pub const RESOLVED_URL: &str = "resolved_url";

/// Top-level media type of the resolved resource.
pub const MIME_TYPE: &str = "mime_type";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a query.
pub const RESULT_COUNT: &str = "result_count";

/// Upstream HTTP status code observed during resolution.
pub const STATUS: &str = "status";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
