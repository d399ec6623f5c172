//! Itinerary day entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the itinerary_days table.
#[derive(Debug, Clone, FromRow)]
pub struct ItineraryDayEntity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub position: i32,
    pub title: Option<String>,
    pub from_place: Option<String>,
    pub to_place: Option<String>,
    pub distance_km: Option<f64>,
    pub eta: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ItineraryDayEntity> for domain::models::ItineraryDay {
    fn from(entity: ItineraryDayEntity) -> Self {
        Self {
            id: entity.id,
            trip_id: entity.trip_id,
            position: entity.position,
            title: entity.title,
            from_place: entity.from_place,
            to_place: entity.to_place,
            distance_km: entity.distance_km,
            eta: entity.eta,
            notes: entity.notes,
            created_at: entity.created_at,
        }
    }
}
