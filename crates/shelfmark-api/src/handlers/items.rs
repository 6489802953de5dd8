//! Handlers for the saved-item endpoints.

use std::collections::BTreeSet;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use shelfmark_core::{ReplaceTagRequest, SaveItemRequest, SavedItem};

use super::{owner_id, ApiError};
use crate::AppState;

/// Query parameters for `GET /items`.
#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    /// Comma-separated tag filter; an item matches if it carries any of
    /// the named tags.
    pub tags: Option<String>,
}

/// `POST /items` — resolve and save a URL for the calling owner.
pub async fn save_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SaveItemRequest>,
) -> Result<Json<SavedItem>, ApiError> {
    let owner = owner_id(&headers)?;
    let item = state.items.save_item(owner, req).await?;
    Ok(Json(item))
}

/// `GET /items` — list the owner's items, optionally filtered by tags.
pub async fn list_items(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<Vec<SavedItem>>, ApiError> {
    let owner = owner_id(&headers)?;

    let tags: BTreeSet<String> = query
        .tags
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    let items = if tags.is_empty() {
        state.items.get_items(owner).await?
    } else {
        state.items.get_items_by_tags(owner, &tags).await?
    };
    Ok(Json(items))
}

/// `PATCH /items/{item_id}/tags` — replace one tag with another.
pub async fn replace_tag(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<Uuid>,
    Json(req): Json<ReplaceTagRequest>,
) -> Result<Json<SavedItem>, ApiError> {
    let owner = owner_id(&headers)?;
    let item = state
        .items
        .replace_tag(owner, item_id, &req.old_tag, &req.new_tag)
        .await?;
    Ok(Json(item))
}

/// `DELETE /items/{item_id}` — idempotent delete.
pub async fn delete_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let owner = owner_id(&headers)?;
    state.items.delete_item(owner, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
