//! Trip membership entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::TripRole;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for trip_role that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "trip_role", rename_all = "lowercase")]
pub enum TripRoleDb {
    Admin,
    Viewer,
}

impl From<TripRoleDb> for TripRole {
    fn from(db_role: TripRoleDb) -> Self {
        match db_role {
            TripRoleDb::Admin => TripRole::Admin,
            TripRoleDb::Viewer => TripRole::Viewer,
        }
    }
}

impl From<TripRole> for TripRoleDb {
    fn from(role: TripRole) -> Self {
        match role {
            TripRole::Admin => TripRoleDb::Admin,
            TripRole::Viewer => TripRoleDb::Viewer,
        }
    }
}

/// Database row mapping for the trip_members table.
#[derive(Debug, Clone, FromRow)]
pub struct TripMemberEntity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub role: TripRoleDb,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TripMemberEntity> for domain::models::Membership {
    fn from(entity: TripMemberEntity) -> Self {
        Self {
            id: entity.id,
            trip_id: entity.trip_id,
            user_id: entity.user_id,
            role: entity.role.into(),
            joined_at: entity.joined_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Member row joined with the user's profile.
#[derive(Debug, Clone, FromRow)]
pub struct TripMemberWithUserEntity {
    pub user_id: Uuid,
    pub role: TripRoleDb,
    pub joined_at: DateTime<Utc>,
    pub name: Option<String>,
    pub email: String,
}

impl From<TripMemberWithUserEntity> for domain::models::MemberInfo {
    fn from(entity: TripMemberWithUserEntity) -> Self {
        Self {
            user_id: entity.user_id,
            role: entity.role.into(),
            is_owner: false,
            name: entity.name,
            email: Some(entity.email),
            joined_at: Some(entity.joined_at),
        }
    }
}
