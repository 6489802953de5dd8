//! Core data model for shelfmark.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// CONTENT CLASSIFICATION
// =============================================================================

/// Classification of a resolved resource by its top-level media type.
///
/// A closed set: anything outside these three is a classification failure,
/// not a fourth class. Dispatch over this enum is always an exhaustive
/// `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentClass {
    Text,
    Image,
    Video,
}

impl ContentClass {
    /// Classify a raw `Content-Type` header value by its top-level type.
    ///
    /// Parameters after `;` and any subtype are ignored, so
    /// `text/html; charset=utf-8` classifies as `Text`. Media types
    /// compare case-insensitively, so `Text/HTML` does too. Returns
    /// `None` for unsupported or wildcard types.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match top_level_type(content_type).to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    /// The top-level type string stored on saved items.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// Extract the top-level type from a media type string
/// (`"text/html; charset=utf-8"` → `"text"`).
pub fn top_level_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .split('/')
        .next()
        .unwrap_or("")
        .trim()
}

// =============================================================================
// RESOLVED METADATA
// =============================================================================

/// Partial record produced by a content handler.
///
/// Holds only the class-specific fields; the resolver overlays URL,
/// media type, and timestamp to form a [`ResolvedMetadata`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialMetadata {
    pub title: String,
    pub has_image: bool,
    pub has_video: bool,
}

impl PartialMetadata {
    /// Compose the full metadata record by overlaying resolution context
    /// onto this handler output. Pure function, consumes self.
    pub fn into_resolved(
        self,
        normal_url: String,
        resolved_url: String,
        mime_type: String,
        date_resolved: DateTime<Utc>,
    ) -> ResolvedMetadata {
        ResolvedMetadata {
            normal_url,
            resolved_url,
            mime_type,
            title: self.title,
            has_image: self.has_image,
            has_video: self.has_video,
            date_resolved,
        }
    }
}

/// Transient value produced by the resolver for one submitted URL.
///
/// Immutable once constructed; never persisted on its own. The merge
/// engine folds it into a [`SavedItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMetadata {
    /// The URL exactly as submitted.
    pub normal_url: String,
    /// The terminal URI after following all redirects.
    pub resolved_url: String,
    /// Top-level media type: "text", "image", or "video".
    pub mime_type: String,
    pub title: String,
    pub has_image: bool,
    pub has_video: bool,
    pub date_resolved: DateTime<Utc>,
}

// =============================================================================
// SAVED ITEMS
// =============================================================================

/// The canonical stored record for a resolved resource.
///
/// Invariant: for a given owner, at most one item exists per resolved
/// URL. Two submissions that resolve identically converge to one record
/// with a unioned tag set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: Uuid,
    pub user_id: Uuid,
    /// The URL as originally submitted.
    pub url: String,
    /// The canonical post-redirect URL; dedup key within an owner.
    pub resolved_url: String,
    pub mime_type: String,
    pub title: String,
    pub has_image: bool,
    pub has_video: bool,
    pub date_resolved: DateTime<Utc>,
    pub tags: BTreeSet<String>,
}

impl SavedItem {
    /// Build a new item from freshly resolved metadata and submitted tags,
    /// assigning a time-ordered identity.
    pub fn from_metadata(user_id: Uuid, meta: ResolvedMetadata, tags: BTreeSet<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            url: meta.normal_url,
            resolved_url: meta.resolved_url,
            mime_type: meta.mime_type,
            title: meta.title,
            has_image: meta.has_image,
            has_video: meta.has_video,
            date_resolved: meta.date_resolved,
            tags,
        }
    }
}

/// Request body for saving a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveItemRequest {
    pub url: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

/// Request body for replacing one tag with another on a saved item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceTagRequest {
    pub old_tag: String,
    pub new_tag: String,
}

// =============================================================================
// USERS
// =============================================================================

/// Account lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserState {
    Active,
    Blocked,
    Deleted,
}

/// A registered owner of saved items.
///
/// Items hold a weak reference to their owner by id; deleting a user does
/// not cascade through this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub registration_date: DateTime<Utc>,
    pub state: UserState,
}

/// Request for registering a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_class_from_text_html() {
        assert_eq!(
            ContentClass::from_content_type("text/html; charset=utf-8"),
            Some(ContentClass::Text)
        );
    }

    #[test]
    fn test_content_class_ignores_header_case() {
        assert_eq!(
            ContentClass::from_content_type("Text/HTML; charset=utf-8"),
            Some(ContentClass::Text)
        );
        assert_eq!(
            ContentClass::from_content_type("IMAGE/PNG"),
            Some(ContentClass::Image)
        );
    }

    #[test]
    fn test_content_class_from_image_and_video() {
        assert_eq!(
            ContentClass::from_content_type("image/png"),
            Some(ContentClass::Image)
        );
        assert_eq!(
            ContentClass::from_content_type("video/mp4"),
            Some(ContentClass::Video)
        );
    }

    #[test]
    fn test_content_class_rejects_application_pdf() {
        assert_eq!(ContentClass::from_content_type("application/pdf"), None);
    }

    #[test]
    fn test_content_class_rejects_wildcard() {
        assert_eq!(ContentClass::from_content_type("*"), None);
        assert_eq!(ContentClass::from_content_type(""), None);
    }

    #[test]
    fn test_top_level_type_strips_subtype_and_params() {
        assert_eq!(top_level_type("text/html; charset=utf-8"), "text");
        assert_eq!(top_level_type("video/mp4"), "video");
        assert_eq!(top_level_type("*"), "*");
    }

    #[test]
    fn test_partial_into_resolved_overlays_context() {
        let now = Utc::now();
        let partial = PartialMetadata {
            title: "Example Page".to_string(),
            has_image: true,
            has_video: false,
        };
        let meta = partial.into_resolved(
            "http://example.com/a".to_string(),
            "http://example.com/a-final".to_string(),
            "text".to_string(),
            now,
        );
        assert_eq!(meta.normal_url, "http://example.com/a");
        assert_eq!(meta.resolved_url, "http://example.com/a-final");
        assert_eq!(meta.mime_type, "text");
        assert_eq!(meta.title, "Example Page");
        assert!(meta.has_image);
        assert!(!meta.has_video);
        assert_eq!(meta.date_resolved, now);
    }

    #[test]
    fn test_saved_item_from_metadata_keeps_both_urls() {
        let meta = ResolvedMetadata {
            normal_url: "http://example.com/a?ref=x".to_string(),
            resolved_url: "http://example.com/a-final".to_string(),
            mime_type: "text".to_string(),
            title: "T".to_string(),
            has_image: false,
            has_video: false,
            date_resolved: Utc::now(),
        };
        let user_id = Uuid::new_v4();
        let tags: BTreeSet<String> = ["read-later".to_string()].into();
        let item = SavedItem::from_metadata(user_id, meta, tags.clone());

        assert_eq!(item.user_id, user_id);
        assert_eq!(item.url, "http://example.com/a?ref=x");
        assert_eq!(item.resolved_url, "http://example.com/a-final");
        assert_eq!(item.tags, tags);
    }

    #[test]
    fn test_saved_item_ids_are_unique() {
        let meta = ResolvedMetadata {
            normal_url: "u".to_string(),
            resolved_url: "r".to_string(),
            mime_type: "text".to_string(),
            title: String::new(),
            has_image: false,
            has_video: false,
            date_resolved: Utc::now(),
        };
        let a = SavedItem::from_metadata(Uuid::new_v4(), meta.clone(), BTreeSet::new());
        let b = SavedItem::from_metadata(Uuid::new_v4(), meta, BTreeSet::new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_tag_set_collapses_duplicates() {
        let tags: BTreeSet<String> = ["news".to_string(), "news".to_string(), "daily".to_string()]
            .into_iter()
            .collect();
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_save_item_request_tags_default_to_empty() {
        let req: SaveItemRequest =
            serde_json::from_str(r#"{"url": "http://example.com"}"#).unwrap();
        assert!(req.tags.is_empty());
    }

    #[test]
    fn test_user_state_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&UserState::Active).unwrap(),
            "\"ACTIVE\""
        );
    }
}
