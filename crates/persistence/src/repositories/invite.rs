//! Invite code repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::invite::{generate_invite_code, MAX_CODE_GENERATION_ATTEMPTS};
use domain::models::{InviteCode, NewInvite, Redemption};
use domain::stores::InviteRegistry;
use domain::DomainError;

use super::membership::upsert_member;
use crate::entities::{TripInviteCodeEntity, TripRoleDb};
use crate::metrics::QueryTimer;

/// Repository for trip_invite_codes.
#[derive(Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    /// Creates a new InviteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a code unless it is already taken.
    ///
    /// Returns `None` on a code collision.
    pub async fn try_create_invite(
        &self,
        trip_id: Uuid,
        code: &str,
        role: TripRoleDb,
        max_uses: Option<i32>,
        expires_at: Option<DateTime<Utc>>,
        created_by: Uuid,
    ) -> Result<Option<TripInviteCodeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("invite", "create_trip_invite");
        let result = sqlx::query_as::<_, TripInviteCodeEntity>(
            r#"
            INSERT INTO trip_invite_codes (trip_id, code, role, max_uses, expires_at, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (code) DO NOTHING
            RETURNING id, trip_id, code, role, max_uses, used_count, expires_at, created_by, created_at
            "#,
        )
        .bind(trip_id)
        .bind(code)
        .bind(role)
        .bind(max_uses)
        .bind(expires_at)
        .bind(created_by)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Find invite by code.
    pub async fn find_invite_by_code(
        &self,
        code: &str,
    ) -> Result<Option<TripInviteCodeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("invite", "find_trip_invite_by_code");
        let result = sqlx::query_as::<_, TripInviteCodeEntity>(
            r#"
            SELECT id, trip_id, code, role, max_uses, used_count, expires_at, created_by, created_at
            FROM trip_invite_codes
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// List all codes of a trip, newest first.
    pub async fn list_invites(&self, trip_id: Uuid) -> Result<Vec<TripInviteCodeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("invite", "list_trip_invites");
        let result = sqlx::query_as::<_, TripInviteCodeEntity>(
            r#"
            SELECT id, trip_id, code, role, max_uses, used_count, expires_at, created_by, created_at
            FROM trip_invite_codes
            WHERE trip_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Locks the code row, checks it against the clock, upserts the
    /// membership and bumps the use count, all in one transaction.
    async fn redeem_code(&self, code: &str, user_id: Uuid) -> Result<Redemption, DomainError> {
        let timer = QueryTimer::new("invite", "redeem_trip_invite");
        let result = self.redeem_code_tx(code, user_id).await;
        timer.finish(&result);
        result
    }

    async fn redeem_code_tx(&self, code: &str, user_id: Uuid) -> Result<Redemption, DomainError> {
        let mut tx = self.pool.begin().await?;

        let entity = sqlx::query_as::<_, TripInviteCodeEntity>(
            r#"
            SELECT id, trip_id, code, role, max_uses, used_count, expires_at, created_by, created_at
            FROM trip_invite_codes
            WHERE code = $1
            FOR UPDATE
            "#,
        )
        .bind(code)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DomainError::InviteNotFound)?;

        let invite = InviteCode::from(entity);
        invite.ensure_redeemable_at(Utc::now())?;

        let membership = upsert_member(&mut *tx, invite.trip_id, user_id, invite.role.into()).await?;

        let used_count = if invite.max_uses.is_some() {
            sqlx::query_scalar::<_, i32>(
                r#"
                UPDATE trip_invite_codes
                SET used_count = used_count + 1
                WHERE id = $1 AND used_count < max_uses
                RETURNING used_count
                "#,
            )
            .bind(invite.id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DomainError::InviteExhausted)?
        } else {
            invite.used_count
        };

        tx.commit().await?;

        Ok(Redemption {
            trip_id: invite.trip_id,
            role: invite.role,
            used_count,
            membership: membership.into(),
        })
    }
}

#[async_trait::async_trait]
impl InviteRegistry for InviteRepository {
    async fn issue(&self, invite: NewInvite) -> Result<InviteCode, DomainError> {
        for _ in 0..MAX_CODE_GENERATION_ATTEMPTS {
            let code = generate_invite_code();
            let created = self
                .try_create_invite(
                    invite.trip_id,
                    &code,
                    invite.role.into(),
                    invite.usage.max_uses(),
                    invite.expires_at,
                    invite.created_by,
                )
                .await?;

            if let Some(entity) = created {
                return Ok(entity.into());
            }
            tracing::debug!(trip_id = %invite.trip_id, "Invite code collision, retrying");
        }

        Err(DomainError::StorageUnavailable(
            "Failed to generate unique invite code".to_string(),
        ))
    }

    async fn redeem(&self, code: &str, user_id: Uuid) -> Result<Redemption, DomainError> {
        self.redeem_code(code, user_id).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, DomainError> {
        Ok(self.find_invite_by_code(code).await?.map(Into::into))
    }

    async fn list_by_trip(&self, trip_id: Uuid) -> Result<Vec<InviteCode>, DomainError> {
        Ok(self
            .list_invites(trip_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
