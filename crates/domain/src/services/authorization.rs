//! Authorization guard for trip-scoped actions.

use uuid::Uuid;

use super::role_resolution::resolve_effective_role;
use crate::errors::DomainError;
use crate::models::{EffectiveRole, Membership, TripOwnership};
use crate::stores::{MembershipStore, TripDirectory};

/// Access an action requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Any role other than none.
    Read,
    /// Administrator only.
    Write,
}

impl AccessLevel {
    pub fn is_satisfied_by(&self, role: EffectiveRole) -> bool {
        match self {
            AccessLevel::Read => role.can_read(),
            AccessLevel::Write => role.can_write(),
        }
    }
}

/// Decides whether `principal` may act on `trip` at `level`. Never fails.
pub fn authorize(
    principal: Option<Uuid>,
    trip: &TripOwnership,
    memberships: &[Membership],
    level: AccessLevel,
) -> bool {
    level.is_satisfied_by(resolve_effective_role(principal, trip, memberships))
}

/// Trip and role of an authorized principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessGrant {
    pub trip: TripOwnership,
    pub role: EffectiveRole,
}

/// Store-backed guard run before every trip read or mutation.
///
/// A missing trip and a principal without any role both fail with
/// [`DomainError::NotFound`]. A reader asking for write access fails with
/// [`DomainError::Forbidden`], which callers render the same way.
pub struct TripGuard<'a> {
    trips: &'a dyn TripDirectory,
    memberships: &'a dyn MembershipStore,
}

impl<'a> TripGuard<'a> {
    pub fn new(trips: &'a dyn TripDirectory, memberships: &'a dyn MembershipStore) -> Self {
        Self { trips, memberships }
    }

    /// Resolves the principal's role on a trip, or `None` if the trip is missing.
    pub async fn effective_role(
        &self,
        principal: Option<Uuid>,
        trip_id: Uuid,
    ) -> Result<Option<AccessGrant>, DomainError> {
        let Some(trip) = self.trips.find_ownership(trip_id).await? else {
            return Ok(None);
        };

        let membership = match principal {
            Some(user_id) if user_id != trip.owner_id => {
                self.memberships.find(trip_id, user_id).await?
            }
            _ => None,
        };

        let role = resolve_effective_role(principal, &trip, membership.as_slice());
        Ok(Some(AccessGrant { trip, role }))
    }

    pub async fn check(
        &self,
        principal: Option<Uuid>,
        trip_id: Uuid,
        level: AccessLevel,
    ) -> Result<AccessGrant, DomainError> {
        let grant = self
            .effective_role(principal, trip_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Trip".to_string()))?;

        if level.is_satisfied_by(grant.role) {
            return Ok(grant);
        }

        tracing::debug!(
            trip_id = %trip_id,
            role = %grant.role,
            required = ?level,
            "Trip access denied"
        );

        match grant.role {
            EffectiveRole::None => Err(DomainError::NotFound("Trip".to_string())),
            _ => Err(DomainError::Forbidden(
                "Trip requires administrator access".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TripRole;
    use crate::stores::{InMemoryMembershipStore, InMemoryTripDirectory};

    struct Fixture {
        trips: InMemoryTripDirectory,
        memberships: InMemoryMembershipStore,
        trip: TripOwnership,
        admin: Uuid,
        viewer: Uuid,
    }

    impl Fixture {
        async fn new() -> Self {
            let trips = InMemoryTripDirectory::new();
            let memberships = InMemoryMembershipStore::new();
            let trip = TripOwnership {
                trip_id: Uuid::new_v4(),
                owner_id: Uuid::new_v4(),
            };
            trips.insert(trip).await;

            let (admin, viewer) = (Uuid::new_v4(), Uuid::new_v4());
            memberships.upsert(trip.trip_id, admin, TripRole::Admin).await.unwrap();
            memberships.upsert(trip.trip_id, viewer, TripRole::Viewer).await.unwrap();

            Self {
                trips,
                memberships,
                trip,
                admin,
                viewer,
            }
        }

        fn guard(&self) -> TripGuard<'_> {
            TripGuard::new(&self.trips, &self.memberships)
        }
    }

    #[test]
    fn test_authorize_levels() {
        let trip = TripOwnership {
            trip_id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
        };
        assert!(authorize(Some(trip.owner_id), &trip, &[], AccessLevel::Write));
        assert!(!authorize(Some(Uuid::new_v4()), &trip, &[], AccessLevel::Read));
        assert!(!authorize(None, &trip, &[], AccessLevel::Read));
    }

    #[tokio::test]
    async fn test_owner_and_admin_can_write() {
        let f = Fixture::new().await;
        let guard = f.guard();

        let owner = guard
            .check(Some(f.trip.owner_id), f.trip.trip_id, AccessLevel::Write)
            .await
            .unwrap();
        assert_eq!(owner.role, EffectiveRole::Admin);

        let admin = guard
            .check(Some(f.admin), f.trip.trip_id, AccessLevel::Write)
            .await
            .unwrap();
        assert_eq!(admin.role, EffectiveRole::Admin);
    }

    #[tokio::test]
    async fn test_viewer_reads_but_cannot_write() {
        let f = Fixture::new().await;
        let guard = f.guard();

        let read = guard
            .check(Some(f.viewer), f.trip.trip_id, AccessLevel::Read)
            .await
            .unwrap();
        assert_eq!(read.role, EffectiveRole::Viewer);

        let write = guard
            .check(Some(f.viewer), f.trip.trip_id, AccessLevel::Write)
            .await
            .unwrap_err();
        assert!(matches!(write, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_stranger_sees_same_outcome_as_missing_trip() {
        let f = Fixture::new().await;
        let guard = f.guard();

        let stranger = guard
            .check(Some(Uuid::new_v4()), f.trip.trip_id, AccessLevel::Read)
            .await
            .unwrap_err();
        let missing = guard
            .check(Some(f.trip.owner_id), Uuid::new_v4(), AccessLevel::Read)
            .await
            .unwrap_err();

        assert_eq!(stranger.to_string(), missing.to_string());
        assert!(matches!(stranger, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_principal_fails_closed() {
        let f = Fixture::new().await;
        let result = f.guard().check(None, f.trip.trip_id, AccessLevel::Read).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_removed_member_loses_access() {
        let f = Fixture::new().await;
        f.memberships.remove(f.trip.trip_id, f.viewer).await.unwrap();

        let result = f
            .guard()
            .check(Some(f.viewer), f.trip.trip_id, AccessLevel::Read)
            .await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }
}
