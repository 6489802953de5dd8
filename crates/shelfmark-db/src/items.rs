//! Saved-item repository implementation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use shelfmark_core::{Error, ItemRepository, Result, SavedItem};

/// Item columns plus the aggregated tag set.
const SELECT_ITEM: &str = r#"
    SELECT
        i.id, i.user_id, i.url, i.resolved_url, i.mime_type, i.title,
        i.has_image, i.has_video, i.date_resolved,
        COALESCE(array_agg(t.tag) FILTER (WHERE t.tag IS NOT NULL), '{}') AS tags
    FROM item i
    LEFT JOIN item_tag t ON t.item_id = i.id
"#;

fn row_to_item(row: PgRow) -> SavedItem {
    let tags: Vec<String> = row.get("tags");
    SavedItem {
        id: row.get("id"),
        user_id: row.get("user_id"),
        url: row.get("url"),
        resolved_url: row.get("resolved_url"),
        mime_type: row.get("mime_type"),
        title: row.get("title"),
        has_image: row.get("has_image"),
        has_video: row.get("has_video"),
        date_resolved: row.get("date_resolved"),
        tags: tags.into_iter().collect(),
    }
}

/// PostgreSQL implementation of ItemRepository.
///
/// Tags live in an `item_tag` join table with a composite primary key, so
/// the stored tag set can never hold duplicates; `save` replaces the tag
/// set inside a transaction.
#[derive(Clone)]
pub struct PgItemRepository {
    pool: Pool<Postgres>,
}

impl PgItemRepository {
    /// Create a new PgItemRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<SavedItem>> {
        let sql = format!(
            "{SELECT_ITEM} WHERE i.user_id = $1 GROUP BY i.id ORDER BY i.date_resolved, i.id"
        );
        let rows = sqlx::query(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "items",
            op = "find_by_owner",
            user_id = %owner_id,
            result_count = rows.len(),
            "Listed items"
        );

        Ok(rows.into_iter().map(row_to_item).collect())
    }

    async fn find_by_owner_and_resolved_url(
        &self,
        owner_id: Uuid,
        resolved_url: &str,
    ) -> Result<Vec<SavedItem>> {
        let sql = format!("{SELECT_ITEM} WHERE i.user_id = $1 AND i.resolved_url = $2 GROUP BY i.id");
        let rows = sqlx::query(&sql)
            .bind(owner_id)
            .bind(resolved_url)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.into_iter().map(row_to_item).collect())
    }

    async fn find_by_owner_and_tags(
        &self,
        owner_id: Uuid,
        tags: &BTreeSet<String>,
    ) -> Result<Vec<SavedItem>> {
        let query_tags: Vec<String> = tags.iter().cloned().collect();
        let sql = format!(
            r#"{SELECT_ITEM}
            WHERE i.user_id = $1
              AND EXISTS (
                  SELECT 1 FROM item_tag x
                  WHERE x.item_id = i.id AND x.tag = ANY($2)
              )
            GROUP BY i.id ORDER BY i.date_resolved, i.id"#
        );
        let rows = sqlx::query(&sql)
            .bind(owner_id)
            .bind(&query_tags)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.into_iter().map(row_to_item).collect())
    }

    async fn find_by_owner_and_id(
        &self,
        owner_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<SavedItem>> {
        let sql = format!("{SELECT_ITEM} WHERE i.user_id = $1 AND i.id = $2 GROUP BY i.id");
        let row = sqlx::query(&sql)
            .bind(owner_id)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(row_to_item))
    }

    async fn save(&self, item: &SavedItem) -> Result<SavedItem> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        // Resolved fields are written once; a later save of the same item
        // only reshapes the tag set (first resolution wins).
        sqlx::query(
            r#"
            INSERT INTO item
                (id, user_id, url, resolved_url, mime_type, title,
                 has_image, has_video, date_resolved)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(item.id)
        .bind(item.user_id)
        .bind(&item.url)
        .bind(&item.resolved_url)
        .bind(&item.mime_type)
        .bind(&item.title)
        .bind(item.has_image)
        .bind(item.has_video)
        .bind(item.date_resolved)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        let tags: Vec<String> = item.tags.iter().cloned().collect();

        sqlx::query("DELETE FROM item_tag WHERE item_id = $1 AND tag <> ALL($2)")
            .bind(item.id)
            .bind(&tags)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        sqlx::query(
            "INSERT INTO item_tag (item_id, tag) SELECT $1, unnest($2::text[])
             ON CONFLICT DO NOTHING",
        )
        .bind(item.id)
        .bind(&tags)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "items",
            op = "save",
            item_id = %item.id,
            user_id = %item.user_id,
            resolved_url = %item.resolved_url,
            "Saved item"
        );

        Ok(item.clone())
    }

    async fn add_tags(
        &self,
        owner_id: Uuid,
        item_id: Uuid,
        tags: &BTreeSet<String>,
    ) -> Result<SavedItem> {
        let new_tags: Vec<String> = tags.iter().cloned().collect();

        // One insert-only statement: two concurrent merges both land their
        // tags, and the ownership check rides along in the SELECT.
        sqlx::query(
            r#"
            INSERT INTO item_tag (item_id, tag)
            SELECT i.id, unnest($3::text[])
            FROM item i
            WHERE i.user_id = $1 AND i.id = $2
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(owner_id)
        .bind(item_id)
        .bind(&new_tags)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "items",
            op = "add_tags",
            item_id = %item_id,
            user_id = %owner_id,
            "Unioned tags into item"
        );

        self.find_by_owner_and_id(owner_id, item_id)
            .await?
            .ok_or(Error::ItemNotFound(item_id))
    }

    async fn delete_by_owner_and_id(&self, owner_id: Uuid, item_id: Uuid) -> Result<()> {
        // Tags go with the item via ON DELETE CASCADE. Absent rows are a
        // no-op, not an error.
        sqlx::query("DELETE FROM item WHERE user_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(item_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
