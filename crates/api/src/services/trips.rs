//! Trip resource operations.
//!
//! Every operation on an existing trip goes through [`TripGuard`] first:
//! reads need any role, mutations need admin. Denials surface as
//! `DomainError::NotFound`/`Forbidden`, which the HTTP layer renders as 404.

use chrono::{DateTime, Utc};
use domain::models::{
    ChecklistItem, EffectiveRole, InviteCode, ItineraryDay, MemberInfo, NewItineraryDay, NewTrip,
    Trip, TripDetail, TripPatch, TripRole, TripSummary, UsageMode,
};
use domain::services::{
    resolve_with_member_role, AccessGrant, AccessLevel, InvitationService, JoinOutcome, TripGuard,
};
use domain::DomainError;
use persistence::repositories::{
    ChecklistRepository, InviteRepository, ItineraryDayRepository, MembershipRepository,
    TripRepository, UserRepository,
};
use sqlx::PgPool;
use uuid::Uuid;

pub struct TripService {
    trips: TripRepository,
    memberships: MembershipRepository,
    invites: InviteRepository,
    days: ItineraryDayRepository,
    checklist: ChecklistRepository,
    users: UserRepository,
}

impl TripService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            trips: TripRepository::new(pool.clone()),
            memberships: MembershipRepository::new(pool.clone()),
            invites: InviteRepository::new(pool.clone()),
            days: ItineraryDayRepository::new(pool.clone()),
            checklist: ChecklistRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    fn guard(&self) -> TripGuard<'_> {
        TripGuard::new(&self.trips, &self.memberships)
    }

    fn invitations(&self) -> InvitationService<'_> {
        InvitationService::new(&self.trips, &self.memberships, &self.invites)
    }

    async fn check(
        &self,
        principal: Uuid,
        trip_id: Uuid,
        level: AccessLevel,
    ) -> Result<AccessGrant, DomainError> {
        self.guard().check(Some(principal), trip_id, level).await
    }

    /// Trips the principal owns or belongs to, newest first.
    pub async fn list(&self, principal: Uuid) -> Result<Vec<TripSummary>, DomainError> {
        let rows = self.trips.list_for_user(principal).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let (trip, day_count, checklist_count, member_role) = row.into_parts();
                let current_role = resolve_with_member_role(
                    Some(principal),
                    trip.owner_id,
                    member_role.map(Into::into),
                );
                TripSummary {
                    trip,
                    day_count,
                    checklist_count,
                    current_role,
                }
            })
            .collect())
    }

    pub async fn create(&self, new_trip: NewTrip) -> Result<Trip, DomainError> {
        let trip: Trip = self.trips.create_trip(&new_trip).await?.into();
        tracing::info!(trip_id = %trip.id, user_id = %trip.owner_id, "Trip created");
        Ok(trip)
    }

    /// Full trip as seen by `principal`. Requires read access.
    pub async fn detail(&self, principal: Uuid, trip_id: Uuid) -> Result<TripDetail, DomainError> {
        let grant = self.check(principal, trip_id, AccessLevel::Read).await?;
        self.load_detail(trip_id, grant.role).await
    }

    async fn load_detail(
        &self,
        trip_id: Uuid,
        current_role: EffectiveRole,
    ) -> Result<TripDetail, DomainError> {
        let trip: Trip = self
            .trips
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Trip".to_string()))?
            .into();

        let days = self.days.list_by_trip(trip_id).await?;
        let checklist = self.checklist.list_by_trip(trip_id).await?;
        let members = self.memberships.list_members(trip_id).await?;

        Ok(TripDetail {
            trip,
            days: days.into_iter().map(Into::into).collect(),
            checklist: checklist.into_iter().map(Into::into).collect(),
            members: members.into_iter().map(Into::into).collect(),
            can_edit: current_role.can_write(),
            current_role,
        })
    }

    pub async fn update(
        &self,
        principal: Uuid,
        trip_id: Uuid,
        patch: TripPatch,
    ) -> Result<Trip, DomainError> {
        self.check(principal, trip_id, AccessLevel::Write).await?;

        if patch.is_empty() {
            return Err(DomainError::MissingField("no fields to update".to_string()));
        }

        let trip: Trip = self
            .trips
            .update_trip(trip_id, &patch)
            .await?
            .ok_or_else(|| DomainError::NotFound("Trip".to_string()))?
            .into();

        tracing::info!(trip_id = %trip_id, user_id = %principal, "Trip updated");
        Ok(trip)
    }

    pub async fn delete(&self, principal: Uuid, trip_id: Uuid) -> Result<(), DomainError> {
        self.check(principal, trip_id, AccessLevel::Write).await?;

        if !self.trips.delete_trip(trip_id).await? {
            return Err(DomainError::NotFound("Trip".to_string()));
        }

        tracing::info!(trip_id = %trip_id, user_id = %principal, "Trip deleted");
        Ok(())
    }

    pub async fn add_day(
        &self,
        principal: Uuid,
        trip_id: Uuid,
        day: NewItineraryDay,
    ) -> Result<ItineraryDay, DomainError> {
        self.check(principal, trip_id, AccessLevel::Write).await?;
        let day: ItineraryDay = self.days.add_day(trip_id, &day).await?.into();
        tracing::debug!(trip_id = %trip_id, day_id = %day.id, position = day.position, "Day added");
        Ok(day)
    }

    pub async fn update_day_notes(
        &self,
        principal: Uuid,
        trip_id: Uuid,
        day_id: Uuid,
        notes: Option<Option<String>>,
    ) -> Result<ItineraryDay, DomainError> {
        self.check(principal, trip_id, AccessLevel::Write).await?;
        self.days
            .update_notes(trip_id, day_id, notes.as_ref().map(Option::as_deref))
            .await?
            .map(Into::into)
            .ok_or_else(|| DomainError::NotFound("Day".to_string()))
    }

    pub async fn delete_day(
        &self,
        principal: Uuid,
        trip_id: Uuid,
        day_id: Uuid,
    ) -> Result<(), DomainError> {
        self.check(principal, trip_id, AccessLevel::Write).await?;
        if !self.days.delete_day(trip_id, day_id).await? {
            return Err(DomainError::NotFound("Day".to_string()));
        }
        Ok(())
    }

    pub async fn add_checklist_item(
        &self,
        principal: Uuid,
        trip_id: Uuid,
        label: String,
    ) -> Result<ChecklistItem, DomainError> {
        self.check(principal, trip_id, AccessLevel::Write).await?;
        Ok(self.checklist.add_item(trip_id, &label).await?.into())
    }

    pub async fn rename_checklist_item(
        &self,
        principal: Uuid,
        trip_id: Uuid,
        item_id: Uuid,
        label: String,
    ) -> Result<ChecklistItem, DomainError> {
        self.check(principal, trip_id, AccessLevel::Write).await?;
        self.checklist
            .update_label(trip_id, item_id, &label)
            .await?
            .map(Into::into)
            .ok_or_else(|| DomainError::NotFound("Checklist item".to_string()))
    }

    pub async fn toggle_checklist_item(
        &self,
        principal: Uuid,
        trip_id: Uuid,
        item_id: Uuid,
    ) -> Result<ChecklistItem, DomainError> {
        self.check(principal, trip_id, AccessLevel::Write).await?;
        self.checklist
            .toggle_done(trip_id, item_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| DomainError::NotFound("Checklist item".to_string()))
    }

    pub async fn delete_checklist_item(
        &self,
        principal: Uuid,
        trip_id: Uuid,
        item_id: Uuid,
    ) -> Result<(), DomainError> {
        self.check(principal, trip_id, AccessLevel::Write).await?;
        if !self.checklist.delete_item(trip_id, item_id).await? {
            return Err(DomainError::NotFound("Checklist item".to_string()));
        }
        Ok(())
    }

    /// Owner first, then membership rows by join time. Requires read access.
    pub async fn list_members(
        &self,
        principal: Uuid,
        trip_id: Uuid,
    ) -> Result<Vec<MemberInfo>, DomainError> {
        let grant = self.check(principal, trip_id, AccessLevel::Read).await?;
        let owner_id = grant.trip.owner_id;

        let owner = self.users.find_by_id(owner_id).await?;
        let mut members = vec![MemberInfo {
            user_id: owner_id,
            role: TripRole::Admin,
            is_owner: true,
            name: owner.as_ref().and_then(|u| u.name.clone()),
            email: owner.map(|u| u.email),
            joined_at: None,
        }];

        members.extend(
            self.memberships
                .list_with_users(trip_id)
                .await?
                .into_iter()
                .filter(|row| row.user_id != owner_id)
                .map(MemberInfo::from),
        );

        Ok(members)
    }

    /// Removes a membership row. The owner has none, so removing the owner
    /// is a not-found.
    pub async fn remove_member(
        &self,
        principal: Uuid,
        trip_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DomainError> {
        let grant = self.check(principal, trip_id, AccessLevel::Write).await?;

        if user_id == grant.trip.owner_id
            || !self.memberships.remove_member(trip_id, user_id).await?
        {
            return Err(DomainError::NotFound("Member".to_string()));
        }

        tracing::info!(
            trip_id = %trip_id,
            user_id = %user_id,
            removed_by = %principal,
            "Trip member removed"
        );
        Ok(())
    }

    pub async fn issue_invite(
        &self,
        principal: Uuid,
        trip_id: Uuid,
        role: TripRole,
        usage: UsageMode,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<InviteCode, DomainError> {
        self.invitations()
            .issue(principal, trip_id, role, usage, expires_at)
            .await
    }

    pub async fn list_invites(
        &self,
        principal: Uuid,
        trip_id: Uuid,
    ) -> Result<Vec<InviteCode>, DomainError> {
        self.invitations().list(principal, trip_id).await
    }

    /// Redeems `code` and returns the outcome with the trip as now seen by
    /// the principal.
    pub async fn join(
        &self,
        principal: Uuid,
        code: &str,
    ) -> Result<(JoinOutcome, TripDetail), DomainError> {
        let outcome = self.invitations().join(principal, code).await?;
        let detail = self.detail(principal, outcome.trip_id()).await?;
        Ok((outcome, detail))
    }
}
