//! Checklist item models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A to-do entry on a trip checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChecklistItem {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub label: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

/// Request payload for adding or renaming a checklist item.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ChecklistLabelRequest {
    #[validate(length(max = 500, message = "Label must be at most 500 characters"))]
    pub label: Option<String>,
}

impl ChecklistLabelRequest {
    /// Returns the label, or `None` when missing or blank.
    pub fn into_label(self) -> Option<String> {
        self.label.filter(|l| !l.trim().is_empty())
    }
}
