//! # shelfmark-resolver
//!
//! URL resolution and content classification for shelfmark.
//!
//! Given a raw URL, [`HttpMetadataResolver`] follows redirects to the
//! terminal location, classifies the resource by its top-level media
//! type, and extracts a title and media-presence flags through a
//! class-specific content handler.

pub mod handlers;
mod resolver;

pub use resolver::{HttpMetadataResolver, ResolverConfig};
