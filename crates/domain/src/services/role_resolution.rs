//! Effective role resolution for a principal on a trip.
//!
//! Ownership dominates: the owner is an administrator whether or not a
//! membership row exists. Otherwise the principal's membership row decides,
//! and without one the principal has no access.

use uuid::Uuid;

use crate::models::{EffectiveRole, Membership, TripOwnership, TripRole};

/// Resolves the role governing `principal` on `trip`.
///
/// `memberships` may contain rows of other trips or principals; only the
/// row matching both is consulted. A missing principal resolves to
/// [`EffectiveRole::None`].
pub fn resolve_effective_role(
    principal: Option<Uuid>,
    trip: &TripOwnership,
    memberships: &[Membership],
) -> EffectiveRole {
    let member_role = principal.and_then(|user_id| {
        memberships
            .iter()
            .find(|m| m.trip_id == trip.trip_id && m.user_id == user_id)
            .map(|m| m.role)
    });

    resolve_with_member_role(principal, trip.owner_id, member_role)
}

/// Same rules, for callers that already hold the principal's membership
/// role (or its absence) for the trip.
pub fn resolve_with_member_role(
    principal: Option<Uuid>,
    owner_id: Uuid,
    member_role: Option<TripRole>,
) -> EffectiveRole {
    match principal {
        None => EffectiveRole::None,
        Some(user_id) if user_id == owner_id => EffectiveRole::Admin,
        Some(_) => member_role.map(EffectiveRole::from).unwrap_or(EffectiveRole::None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn trip() -> TripOwnership {
        TripOwnership {
            trip_id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
        }
    }

    fn membership(trip_id: Uuid, user_id: Uuid, role: TripRole) -> Membership {
        Membership {
            id: Uuid::new_v4(),
            trip_id,
            user_id,
            role,
            joined_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_without_row_is_admin() {
        let trip = trip();
        assert_eq!(
            resolve_effective_role(Some(trip.owner_id), &trip, &[]),
            EffectiveRole::Admin
        );
    }

    #[test]
    fn test_owner_with_viewer_row_is_still_admin() {
        let trip = trip();
        let rows = [membership(trip.trip_id, trip.owner_id, TripRole::Viewer)];
        assert_eq!(
            resolve_effective_role(Some(trip.owner_id), &trip, &rows),
            EffectiveRole::Admin
        );
    }

    #[test]
    fn test_member_roles() {
        let trip = trip();
        let (admin, viewer) = (Uuid::new_v4(), Uuid::new_v4());
        let rows = [
            membership(trip.trip_id, admin, TripRole::Admin),
            membership(trip.trip_id, viewer, TripRole::Viewer),
        ];

        assert_eq!(
            resolve_effective_role(Some(admin), &trip, &rows),
            EffectiveRole::Admin
        );
        assert_eq!(
            resolve_effective_role(Some(viewer), &trip, &rows),
            EffectiveRole::Viewer
        );
    }

    #[test]
    fn test_stranger_is_none() {
        let trip = trip();
        let rows = [membership(trip.trip_id, Uuid::new_v4(), TripRole::Admin)];
        assert_eq!(
            resolve_effective_role(Some(Uuid::new_v4()), &trip, &rows),
            EffectiveRole::None
        );
    }

    #[test]
    fn test_row_of_another_trip_is_ignored() {
        let trip = trip();
        let user = Uuid::new_v4();
        let rows = [membership(Uuid::new_v4(), user, TripRole::Admin)];
        assert_eq!(
            resolve_effective_role(Some(user), &trip, &rows),
            EffectiveRole::None
        );
    }

    #[test]
    fn test_resolve_with_member_role() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert_eq!(
            resolve_with_member_role(Some(owner), owner, None),
            EffectiveRole::Admin
        );
        assert_eq!(
            resolve_with_member_role(Some(other), owner, Some(TripRole::Viewer)),
            EffectiveRole::Viewer
        );
        assert_eq!(
            resolve_with_member_role(Some(other), owner, None),
            EffectiveRole::None
        );
        assert_eq!(
            resolve_with_member_role(None, owner, Some(TripRole::Admin)),
            EffectiveRole::None
        );
    }

    #[test]
    fn test_missing_principal_is_none() {
        let trip = trip();
        let rows = [membership(trip.trip_id, Uuid::new_v4(), TripRole::Admin)];
        assert_eq!(resolve_effective_role(None, &trip, &rows), EffectiveRole::None);
    }
}
