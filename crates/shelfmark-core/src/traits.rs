//! Core traits for shelfmark abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use std::collections::BTreeSet;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

/// Resolves a raw URL into classified metadata.
///
/// Implementations perform the network round-trips; callers treat any
/// failure as final (no retry happens behind this trait).
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Follow redirects from `raw_url`, classify the terminal resource,
    /// and extract its metadata.
    async fn resolve(&self, raw_url: &str) -> Result<ResolvedMetadata>;
}

/// Repository for saved items, keyed by owner and resolved URL.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items belonging to an owner.
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<SavedItem>>;

    /// Items for an owner whose resolved URL matches exactly.
    ///
    /// Returns a list rather than an option so the merge engine can
    /// detect integrity violations (more than one row).
    async fn find_by_owner_and_resolved_url(
        &self,
        owner_id: Uuid,
        resolved_url: &str,
    ) -> Result<Vec<SavedItem>>;

    /// Items for an owner whose tag set intersects the query set.
    async fn find_by_owner_and_tags(
        &self,
        owner_id: Uuid,
        tags: &BTreeSet<String>,
    ) -> Result<Vec<SavedItem>>;

    /// A single item by owner and id.
    async fn find_by_owner_and_id(
        &self,
        owner_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<SavedItem>>;

    /// Upsert by identity: insert a new row or replace the stored tag set.
    async fn save(&self, item: &SavedItem) -> Result<SavedItem>;

    /// Union tags into an existing item, leaving all other tags in place.
    ///
    /// Insert-only: concurrent merges against the same item cannot lose
    /// each other's tags. Returns the item as stored after the union.
    async fn add_tags(
        &self,
        owner_id: Uuid,
        item_id: Uuid,
        tags: &BTreeSet<String>,
    ) -> Result<SavedItem>;

    /// Delete by owner and id. No-op if the item is absent.
    async fn delete_by_owner_and_id(&self, owner_id: Uuid, item_id: Uuid) -> Result<()>;
}

/// Repository for user accounts (narrow glue contract).
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Register a new user.
    async fn create(&self, req: CreateUserRequest) -> Result<User>;

    /// List all users.
    async fn list(&self) -> Result<Vec<User>>;

    /// Check whether a user exists.
    async fn exists(&self, user_id: Uuid) -> Result<bool>;
}
