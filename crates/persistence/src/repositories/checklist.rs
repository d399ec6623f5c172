//! Checklist repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ChecklistItemEntity;
use crate::metrics::QueryTimer;

/// Repository for checklist_items.
#[derive(Clone)]
pub struct ChecklistRepository {
    pool: PgPool,
}

impl ChecklistRepository {
    /// Creates a new ChecklistRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn add_item(&self, trip_id: Uuid, label: &str) -> Result<ChecklistItemEntity, sqlx::Error> {
        let timer = QueryTimer::new("checklist", "add_checklist_item");
        let result = sqlx::query_as::<_, ChecklistItemEntity>(
            r#"
            INSERT INTO checklist_items (trip_id, label, done)
            VALUES ($1, $2, false)
            RETURNING id, trip_id, label, done, created_at
            "#,
        )
        .bind(trip_id)
        .bind(label)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Items of a trip in creation order.
    pub async fn list_by_trip(&self, trip_id: Uuid) -> Result<Vec<ChecklistItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("checklist", "list_checklist_items");
        let result = sqlx::query_as::<_, ChecklistItemEntity>(
            r#"
            SELECT id, trip_id, label, done, created_at
            FROM checklist_items
            WHERE trip_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    pub async fn update_label(
        &self,
        trip_id: Uuid,
        item_id: Uuid,
        label: &str,
    ) -> Result<Option<ChecklistItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("checklist", "update_checklist_item_label");
        let result = sqlx::query_as::<_, ChecklistItemEntity>(
            r#"
            UPDATE checklist_items
            SET label = $3
            WHERE id = $2 AND trip_id = $1
            RETURNING id, trip_id, label, done, created_at
            "#,
        )
        .bind(trip_id)
        .bind(item_id)
        .bind(label)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Flip the done flag in place.
    pub async fn toggle_done(
        &self,
        trip_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<ChecklistItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("checklist", "toggle_checklist_item");
        let result = sqlx::query_as::<_, ChecklistItemEntity>(
            r#"
            UPDATE checklist_items
            SET done = NOT done
            WHERE id = $2 AND trip_id = $1
            RETURNING id, trip_id, label, done, created_at
            "#,
        )
        .bind(trip_id)
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    pub async fn delete_item(&self, trip_id: Uuid, item_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("checklist", "delete_checklist_item");
        let result = sqlx::query(
            r#"
            DELETE FROM checklist_items
            WHERE id = $2 AND trip_id = $1
            "#,
        )
        .bind(trip_id)
        .bind(item_id)
        .execute(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.rows_affected() > 0)
    }
}
