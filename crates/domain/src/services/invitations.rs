//! Invite issuance and redemption on top of the guard and registry.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::authorization::{AccessLevel, TripGuard};
use crate::errors::DomainError;
use crate::models::invite::is_well_formed_code;
use crate::models::{InviteCode, NewInvite, Redemption, TripRole, UsageMode};
use crate::stores::{InviteRegistry, MembershipStore, TripDirectory};

/// Result of presenting an invite code.
#[derive(Debug, Clone)]
pub enum JoinOutcome {
    /// The code was consumed and the membership written.
    Joined(Redemption),
    /// The principal owns the trip; nothing was consumed or written.
    AlreadyOwner { trip_id: Uuid },
}

impl JoinOutcome {
    pub fn trip_id(&self) -> Uuid {
        match self {
            JoinOutcome::Joined(redemption) => redemption.trip_id,
            JoinOutcome::AlreadyOwner { trip_id } => *trip_id,
        }
    }
}

pub struct InvitationService<'a> {
    trips: &'a dyn TripDirectory,
    memberships: &'a dyn MembershipStore,
    registry: &'a dyn InviteRegistry,
}

impl<'a> InvitationService<'a> {
    pub fn new(
        trips: &'a dyn TripDirectory,
        memberships: &'a dyn MembershipStore,
        registry: &'a dyn InviteRegistry,
    ) -> Self {
        Self {
            trips,
            memberships,
            registry,
        }
    }

    /// Issues a code on `trip_id`. The principal needs write access.
    pub async fn issue(
        &self,
        principal: Uuid,
        trip_id: Uuid,
        role: TripRole,
        usage: UsageMode,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<InviteCode, DomainError> {
        TripGuard::new(self.trips, self.memberships)
            .check(Some(principal), trip_id, AccessLevel::Write)
            .await?;

        let invite = self
            .registry
            .issue(NewInvite {
                trip_id,
                role,
                usage,
                expires_at,
                created_by: principal,
            })
            .await?;

        tracing::info!(
            trip_id = %trip_id,
            user_id = %principal,
            code = %invite.code,
            role = %role,
            "Invite code issued"
        );

        Ok(invite)
    }

    /// Lists the codes of a trip. The principal needs write access.
    pub async fn list(&self, principal: Uuid, trip_id: Uuid) -> Result<Vec<InviteCode>, DomainError> {
        TripGuard::new(self.trips, self.memberships)
            .check(Some(principal), trip_id, AccessLevel::Write)
            .await?;

        self.registry.list_by_trip(trip_id).await
    }

    /// Redeems `code` for `principal`.
    pub async fn join(&self, principal: Uuid, code: &str) -> Result<JoinOutcome, DomainError> {
        if !is_well_formed_code(code) {
            return Err(DomainError::InviteNotFound);
        }

        let invite = self
            .registry
            .find_by_code(code)
            .await?
            .ok_or(DomainError::InviteNotFound)?;
        if let Err(err) = invite.ensure_redeemable_at(Utc::now()) {
            tracing::info!(
                trip_id = %invite.trip_id,
                user_id = %principal,
                code = %code,
                reason = %err,
                "Invite redemption rejected"
            );
            return Err(err);
        }

        let trip = self
            .trips
            .find_ownership(invite.trip_id)
            .await?
            .ok_or(DomainError::InviteNotFound)?;

        if trip.owner_id == principal {
            tracing::info!(
                trip_id = %trip.trip_id,
                user_id = %principal,
                code = %code,
                "Owner presented own invite code"
            );
            return Ok(JoinOutcome::AlreadyOwner {
                trip_id: trip.trip_id,
            });
        }

        match self.registry.redeem(code, principal).await {
            Ok(redemption) => {
                tracing::info!(
                    trip_id = %redemption.trip_id,
                    user_id = %principal,
                    code = %code,
                    role = %redemption.role,
                    used_count = redemption.used_count,
                    "Invite code redeemed"
                );
                Ok(JoinOutcome::Joined(redemption))
            }
            Err(err) => {
                tracing::info!(
                    trip_id = %invite.trip_id,
                    user_id = %principal,
                    code = %code,
                    reason = %err,
                    "Invite redemption rejected"
                );
                Err(err)
            }
        }
    }
}
