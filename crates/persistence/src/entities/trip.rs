//! Trip entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::membership::TripRoleDb;

/// Database row mapping for the trips table.
#[derive(Debug, Clone, FromRow)]
pub struct TripEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TripEntity> for domain::models::Trip {
    fn from(entity: TripEntity) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            title: entity.title,
            description: entity.description,
            status: entity.status,
            start_date: entity.start_date,
            end_date: entity.end_date,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Trip row with counts and the caller's membership role, for listings.
#[derive(Debug, Clone, FromRow)]
pub struct TripWithCountsEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub day_count: i64,
    pub checklist_count: i64,
    /// Role from the caller's membership row, if any.
    pub member_role: Option<TripRoleDb>,
}

impl TripWithCountsEntity {
    /// Splits the row into the trip and its listing extras.
    pub fn into_parts(self) -> (domain::models::Trip, i64, i64, Option<TripRoleDb>) {
        let trip = domain::models::Trip {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        (trip, self.day_count, self.checklist_count, self.member_role)
    }
}
