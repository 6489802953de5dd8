//! Dedup/merge engine for saved items.
//!
//! `save_item` resolves the submitted URL, then either creates a new
//! record or merges tags into the one existing record for that
//! (owner, resolved URL) pair. Resolved metadata is written once: a later
//! save never overwrites title or media flags.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use shelfmark_core::{
    Error, ItemRepository, MetadataResolver, Result, SaveItemRequest, SavedItem, UserRepository,
};

/// Validate a tag name: non-empty after trimming, at most 100 characters.
fn validate_tag(tag: &str) -> Result<()> {
    if tag.trim().is_empty() {
        return Err(Error::InvalidInput("Tag name cannot be empty".to_string()));
    }
    if tag.len() > 100 {
        return Err(Error::InvalidInput(
            "Tag name must be 100 characters or less".to_string(),
        ));
    }
    Ok(())
}

/// Saves, lists, retags, and deletes items on behalf of an owner.
pub struct ItemService {
    items: Arc<dyn ItemRepository>,
    users: Arc<dyn UserRepository>,
    resolver: Arc<dyn MetadataResolver>,
}

impl ItemService {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        users: Arc<dyn UserRepository>,
        resolver: Arc<dyn MetadataResolver>,
    ) -> Self {
        Self {
            items,
            users,
            resolver,
        }
    }

    /// Resolve a URL and create-or-merge the saved item.
    ///
    /// Resolution failures propagate unchanged and persist nothing.
    /// Finding more than one existing row for the resolved URL is an
    /// integrity violation, surfaced as `DuplicateResolvedUrl`.
    pub async fn save_item(&self, owner_id: Uuid, req: SaveItemRequest) -> Result<SavedItem> {
        for tag in &req.tags {
            validate_tag(tag)?;
        }
        if !self.users.exists(owner_id).await? {
            return Err(Error::OwnerNotFound(owner_id));
        }

        let meta = self.resolver.resolve(&req.url).await?;

        let mut existing = self
            .items
            .find_by_owner_and_resolved_url(owner_id, &meta.resolved_url)
            .await?;

        if existing.len() > 1 {
            warn!(
                subsystem = "api",
                component = "items",
                op = "save_item",
                user_id = %owner_id,
                resolved_url = %meta.resolved_url,
                result_count = existing.len(),
                "Integrity violation: multiple items share a resolved URL"
            );
            return Err(Error::DuplicateResolvedUrl(meta.resolved_url));
        }

        match existing.pop() {
            None => {
                let item = SavedItem::from_metadata(owner_id, meta, req.tags);
                info!(
                    subsystem = "api",
                    component = "items",
                    op = "save_item",
                    item_id = %item.id,
                    user_id = %owner_id,
                    resolved_url = %item.resolved_url,
                    mime_type = %item.mime_type,
                    "Created item"
                );
                self.items.save(&item).await
            }
            Some(item) => {
                info!(
                    subsystem = "api",
                    component = "items",
                    op = "save_item",
                    item_id = %item.id,
                    user_id = %owner_id,
                    resolved_url = %item.resolved_url,
                    "Merging tags into existing item"
                );
                // Insert-only tag union; first resolution wins for the
                // rest, and a concurrent merge cannot be overwritten by
                // this one's stale snapshot.
                self.items.add_tags(owner_id, item.id, &req.tags).await
            }
        }
    }

    /// All items for an owner.
    pub async fn get_items(&self, owner_id: Uuid) -> Result<Vec<SavedItem>> {
        self.items.find_by_owner(owner_id).await
    }

    /// Items for an owner matching any of the given tags.
    pub async fn get_items_by_tags(
        &self,
        owner_id: Uuid,
        tags: &BTreeSet<String>,
    ) -> Result<Vec<SavedItem>> {
        self.items.find_by_owner_and_tags(owner_id, tags).await
    }

    /// Swap one tag for another on an item.
    pub async fn replace_tag(
        &self,
        owner_id: Uuid,
        item_id: Uuid,
        old_tag: &str,
        new_tag: &str,
    ) -> Result<SavedItem> {
        validate_tag(new_tag)?;

        let mut item = self
            .items
            .find_by_owner_and_id(owner_id, item_id)
            .await?
            .ok_or(Error::ItemNotFound(item_id))?;

        if !item.tags.remove(old_tag) {
            return Err(Error::TagNotPresent {
                item_id,
                tag: old_tag.to_string(),
            });
        }
        item.tags.insert(new_tag.to_string());

        info!(
            subsystem = "api",
            component = "items",
            op = "replace_tag",
            item_id = %item_id,
            user_id = %owner_id,
            "Replaced tag"
        );

        self.items.save(&item).await
    }

    /// Delete an item. Idempotent: a missing item is not an error.
    pub async fn delete_item(&self, owner_id: Uuid, item_id: Uuid) -> Result<()> {
        self.items.delete_by_owner_and_id(owner_id, item_id).await
    }
}
