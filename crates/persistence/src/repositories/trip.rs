//! Trip repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{NewTrip, TripOwnership, TripPatch};
use domain::stores::TripDirectory;
use domain::DomainError;

use super::membership::delete_members_by_trip;
use crate::entities::{TripEntity, TripWithCountsEntity};
use crate::metrics::QueryTimer;

/// Repository for trip-related database operations.
#[derive(Clone)]
pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    /// Creates a new TripRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new trip owned by `new_trip.owner_id`.
    pub async fn create_trip(&self, new_trip: &NewTrip) -> Result<TripEntity, sqlx::Error> {
        let timer = QueryTimer::new("trip", "create_trip");
        let result = sqlx::query_as::<_, TripEntity>(
            r#"
            INSERT INTO trips (owner_id, title, description, status, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, title, description, status, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(new_trip.owner_id)
        .bind(&new_trip.title)
        .bind(&new_trip.description)
        .bind(&new_trip.status)
        .bind(new_trip.start_date)
        .bind(new_trip.end_date)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Find a trip by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TripEntity>, sqlx::Error> {
        let timer = QueryTimer::new("trip", "find_trip_by_id");
        let result = sqlx::query_as::<_, TripEntity>(
            r#"
            SELECT id, owner_id, title, description, status, start_date, end_date, created_at, updated_at
            FROM trips
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Trips the user owns or is a member of, newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TripWithCountsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("trip", "list_trips_for_user");
        let result = sqlx::query_as::<_, TripWithCountsEntity>(
            r#"
            SELECT
                t.id, t.owner_id, t.title, t.description, t.status,
                t.start_date, t.end_date, t.created_at, t.updated_at,
                (SELECT COUNT(*) FROM itinerary_days d WHERE d.trip_id = t.id) as day_count,
                (SELECT COUNT(*) FROM checklist_items c WHERE c.trip_id = t.id) as checklist_count,
                m.role as member_role
            FROM trips t
            LEFT JOIN trip_members m ON m.trip_id = t.id AND m.user_id = $1
            WHERE t.owner_id = $1 OR m.user_id IS NOT NULL
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Apply a partial update. Returns `None` if the trip is gone.
    pub async fn update_trip(
        &self,
        id: Uuid,
        patch: &TripPatch,
    ) -> Result<Option<TripEntity>, sqlx::Error> {
        let timer = QueryTimer::new("trip", "update_trip");
        let result = sqlx::query_as::<_, TripEntity>(
            r#"
            UPDATE trips SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                status = COALESCE($5, status),
                start_date = CASE WHEN $6 THEN $7 ELSE start_date END,
                end_date = CASE WHEN $8 THEN $9 ELSE end_date END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, owner_id, title, description, status, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(patch.description.is_some())
        .bind(patch.description.clone().flatten())
        .bind(&patch.status)
        .bind(patch.start_date.is_some())
        .bind(patch.start_date.flatten())
        .bind(patch.end_date.is_some())
        .bind(patch.end_date.flatten())
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Delete a trip with its memberships. Days, checklist items and invite
    /// codes go by cascade.
    pub async fn delete_trip(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("trip", "delete_trip");
        let result = self.delete_trip_tx(id).await;
        timer.finish(&result);
        result
    }

    async fn delete_trip_tx(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let removed_members = delete_members_by_trip(&mut *tx, id).await?;

        let result = sqlx::query(
            r#"
            DELETE FROM trips
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(trip_id = %id, removed_members, "Trip deleted");
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl TripDirectory for TripRepository {
    async fn find_ownership(&self, trip_id: Uuid) -> Result<Option<TripOwnership>, DomainError> {
        let timer = QueryTimer::new("trip", "find_trip_owner");
        let result = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT owner_id
            FROM trips
            WHERE id = $1
            "#,
        )
        .bind(trip_id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);

        Ok(result?.map(|owner_id| TripOwnership { trip_id, owner_id }))
    }
}
