//! Invite code entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::membership::TripRoleDb;

/// Database row mapping for the trip_invite_codes table.
#[derive(Debug, Clone, FromRow)]
pub struct TripInviteCodeEntity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub code: String,
    pub role: TripRoleDb,
    pub max_uses: Option<i32>,
    pub used_count: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<TripInviteCodeEntity> for domain::models::InviteCode {
    fn from(entity: TripInviteCodeEntity) -> Self {
        Self {
            id: entity.id,
            trip_id: entity.trip_id,
            code: entity.code,
            role: entity.role.into(),
            max_uses: entity.max_uses,
            used_count: entity.used_count,
            expires_at: entity.expires_at,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }
}
