//! Trip membership repository for database operations.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use domain::models::{Membership, TripRole};
use domain::stores::MembershipStore;
use domain::DomainError;

use crate::entities::{TripMemberEntity, TripMemberWithUserEntity, TripRoleDb};
use crate::metrics::QueryTimer;

/// Repository for trip_members.
#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    /// Creates a new MembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Members of a trip with their profiles, oldest first.
    pub async fn list_with_users(
        &self,
        trip_id: Uuid,
    ) -> Result<Vec<TripMemberWithUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("membership", "list_trip_members_with_users");
        let result = sqlx::query_as::<_, TripMemberWithUserEntity>(
            r#"
            SELECT m.user_id, m.role, m.joined_at, u.name, u.email
            FROM trip_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.trip_id = $1
            ORDER BY m.joined_at ASC
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Find a single membership row.
    pub async fn find_member(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TripMemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("membership", "find_trip_member");
        let result = sqlx::query_as::<_, TripMemberEntity>(
            r#"
            SELECT id, trip_id, user_id, role, joined_at, updated_at
            FROM trip_members
            WHERE trip_id = $1 AND user_id = $2
            "#,
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// All membership rows of a trip.
    pub async fn list_members(&self, trip_id: Uuid) -> Result<Vec<TripMemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("membership", "list_trip_members");
        let result = sqlx::query_as::<_, TripMemberEntity>(
            r#"
            SELECT id, trip_id, user_id, role, joined_at, updated_at
            FROM trip_members
            WHERE trip_id = $1
            ORDER BY joined_at ASC
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Remove one membership row.
    pub async fn remove_member(&self, trip_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("membership", "remove_trip_member");
        let result = sqlx::query(
            r#"
            DELETE FROM trip_members
            WHERE trip_id = $1 AND user_id = $2
            "#,
        )
        .bind(trip_id)
        .bind(user_id)
        .execute(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.rows_affected() > 0)
    }
}

/// Inserts or overwrites the role of a membership row on `conn`.
///
/// Runs on a plain connection so that redemption can call it inside its
/// transaction.
pub(crate) async fn upsert_member(
    conn: &mut PgConnection,
    trip_id: Uuid,
    user_id: Uuid,
    role: TripRoleDb,
) -> Result<TripMemberEntity, sqlx::Error> {
    let timer = QueryTimer::new("membership", "upsert_trip_member");
    let result = sqlx::query_as::<_, TripMemberEntity>(
        r#"
        INSERT INTO trip_members (trip_id, user_id, role)
        VALUES ($1, $2, $3)
        ON CONFLICT (trip_id, user_id) DO UPDATE SET
            role = EXCLUDED.role,
            updated_at = NOW()
        RETURNING id, trip_id, user_id, role, joined_at, updated_at
        "#,
    )
    .bind(trip_id)
    .bind(user_id)
    .bind(role)
    .fetch_one(conn)
    .await;
    timer.finish(&result);
    result
}

/// Deletes every membership row of a trip on `conn`.
pub(crate) async fn delete_members_by_trip(
    conn: &mut PgConnection,
    trip_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let timer = QueryTimer::new("membership", "delete_trip_members_by_trip");
    let result = sqlx::query(
        r#"
        DELETE FROM trip_members
        WHERE trip_id = $1
        "#,
    )
    .bind(trip_id)
    .execute(conn)
    .await;
    timer.finish(&result);
    Ok(result?.rows_affected())
}

#[async_trait::async_trait]
impl MembershipStore for MembershipRepository {
    async fn upsert(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
        role: TripRole,
    ) -> Result<Membership, DomainError> {
        let mut conn = self.pool.acquire().await?;
        let entity = upsert_member(&mut *conn, trip_id, user_id, role.into()).await?;
        Ok(entity.into())
    }

    async fn find(&self, trip_id: Uuid, user_id: Uuid) -> Result<Option<Membership>, DomainError> {
        Ok(self.find_member(trip_id, user_id).await?.map(Into::into))
    }

    async fn list_by_trip(&self, trip_id: Uuid) -> Result<Vec<Membership>, DomainError> {
        Ok(self
            .list_members(trip_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn delete_by_trip(&self, trip_id: Uuid) -> Result<u64, DomainError> {
        let mut conn = self.pool.acquire().await?;
        Ok(delete_members_by_trip(&mut *conn, trip_id).await?)
    }

    async fn remove(&self, trip_id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.remove_member(trip_id, user_id).await?)
    }
}
