//! Error types for shelfmark.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using shelfmark's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for shelfmark operations.
///
/// The resolver variants (`MalformedUrl` through `UnsupportedContentType`)
/// are raised during URL resolution and propagated to callers verbatim;
/// nothing in this crate retries them.
#[derive(Error, Debug)]
pub enum Error {
    /// The submitted URL does not parse under standard URI grammar.
    #[error("The URL is malformed: {0}")]
    MalformedUrl(String),

    /// Transport-level failure: connect refused, timeout, DNS, or a
    /// malformed response.
    #[error("Cannot retrieve data from the URL: {url}")]
    UnreachableResource { url: String },

    /// The remote server answered 401 or 403.
    #[error("There is no access to the resource at the specified URL: {url}")]
    AccessDenied { url: String },

    /// The remote server answered with a non-success status.
    #[error("The server returned an error for {url}. Response status: {status}")]
    ResolutionFailed { url: String, status: u16 },

    /// The remote server answered with a status code outside the
    /// registered HTTP status space.
    #[error("The server returned an unknown status code: {code}")]
    UnknownServerResponse { url: String, code: u16 },

    /// The resource's top-level media type is not text, image, or video.
    #[error("The content type [{content_type}] at the specified URL is not supported")]
    UnsupportedContentType { content_type: String },

    /// More than one stored item shares a resolved URL for one owner.
    /// Integrity-violation guard, never expected control flow.
    #[error("Multiple saved items share the resolved URL: {0}")]
    DuplicateResolvedUrl(String),

    /// Item not found for the given owner.
    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    /// The tag to replace is absent from the item's tag set.
    #[error("Item {item_id} does not have tag: {tag}")]
    TagNotPresent { item_id: Uuid, tag: String },

    /// Owner (user) not found.
    #[error("User not found: {0}")]
    OwnerNotFound(Uuid),

    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
