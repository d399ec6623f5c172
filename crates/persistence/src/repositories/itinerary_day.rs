//! Itinerary day repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::NewItineraryDay;

use crate::entities::ItineraryDayEntity;
use crate::metrics::QueryTimer;

/// Repository for itinerary_days.
#[derive(Clone)]
pub struct ItineraryDayRepository {
    pool: PgPool,
}

impl ItineraryDayRepository {
    /// Creates a new ItineraryDayRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a day; its position is the trip's day count plus one.
    pub async fn add_day(
        &self,
        trip_id: Uuid,
        day: &NewItineraryDay,
    ) -> Result<ItineraryDayEntity, sqlx::Error> {
        let timer = QueryTimer::new("itinerary_day", "add_itinerary_day");
        let result = sqlx::query_as::<_, ItineraryDayEntity>(
            r#"
            INSERT INTO itinerary_days (trip_id, position, title, from_place, to_place, distance_km, eta, notes)
            VALUES (
                $1,
                (SELECT COUNT(*) FROM itinerary_days WHERE trip_id = $1) + 1,
                $2, $3, $4, $5, $6, $7
            )
            RETURNING id, trip_id, position, title, from_place, to_place, distance_km, eta, notes, created_at
            "#,
        )
        .bind(trip_id)
        .bind(&day.title)
        .bind(&day.from_place)
        .bind(&day.to_place)
        .bind(day.distance_km)
        .bind(&day.eta)
        .bind(&day.notes)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Days of a trip in position order.
    pub async fn list_by_trip(&self, trip_id: Uuid) -> Result<Vec<ItineraryDayEntity>, sqlx::Error> {
        let timer = QueryTimer::new("itinerary_day", "list_itinerary_days");
        let result = sqlx::query_as::<_, ItineraryDayEntity>(
            r#"
            SELECT id, trip_id, position, title, from_place, to_place, distance_km, eta, notes, created_at
            FROM itinerary_days
            WHERE trip_id = $1
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Update a day's notes. `None` keeps them, `Some(None)` clears them.
    /// Returns `None` if the day is not in the trip.
    pub async fn update_notes(
        &self,
        trip_id: Uuid,
        day_id: Uuid,
        notes: Option<Option<&str>>,
    ) -> Result<Option<ItineraryDayEntity>, sqlx::Error> {
        let timer = QueryTimer::new("itinerary_day", "update_itinerary_day_notes");
        let result = sqlx::query_as::<_, ItineraryDayEntity>(
            r#"
            UPDATE itinerary_days
            SET notes = CASE WHEN $4 THEN $3 ELSE notes END
            WHERE id = $2 AND trip_id = $1
            RETURNING id, trip_id, position, title, from_place, to_place, distance_km, eta, notes, created_at
            "#,
        )
        .bind(trip_id)
        .bind(day_id)
        .bind(notes.flatten())
        .bind(notes.is_some())
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Delete a day. Returns false if the day is not in the trip.
    pub async fn delete_day(&self, trip_id: Uuid, day_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("itinerary_day", "delete_itinerary_day");
        let result = sqlx::query(
            r#"
            DELETE FROM itinerary_days
            WHERE id = $2 AND trip_id = $1
            "#,
        )
        .bind(trip_id)
        .bind(day_id)
        .execute(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.rows_affected() > 0)
    }
}
