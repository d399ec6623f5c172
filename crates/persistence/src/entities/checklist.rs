//! Checklist item entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the checklist_items table.
#[derive(Debug, Clone, FromRow)]
pub struct ChecklistItemEntity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub label: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ChecklistItemEntity> for domain::models::ChecklistItem {
    fn from(entity: ChecklistItemEntity) -> Self {
        Self {
            id: entity.id,
            trip_id: entity.trip_id,
            label: entity.label,
            done: entity.done,
            created_at: entity.created_at,
        }
    }
}
