//! Default configuration values shared across shelfmark crates.

/// Connect/read budget for one resolution round-trip (seconds).
pub const RESOLVE_TIMEOUT_SECS: u64 = 120;

/// Maximum redirect hops followed before the fetch is abandoned.
/// Guards against redirect loops during resolution.
pub const MAX_REDIRECTS: usize = 10;

/// Default HTTP listen address for the API server.
pub const HTTP_ADDR: &str = "0.0.0.0:8080";

/// Header carrying the owner identity on API requests.
pub const USER_ID_HEADER: &str = "X-Later-User-Id";
