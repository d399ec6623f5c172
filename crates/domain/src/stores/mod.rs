//! Storage seams for the access-control core.
//!
//! PostgreSQL implementations live in the persistence crate; the in-memory
//! implementations in [`memory`] back unit tests and single-process use.

pub mod memory;

use uuid::Uuid;

use crate::errors::DomainError;
use crate::models::{InviteCode, Membership, NewInvite, Redemption, TripOwnership, TripRole};

pub use memory::{InMemoryInviteRegistry, InMemoryMembershipStore, InMemoryTripDirectory};

/// Looks up who owns a trip.
#[async_trait::async_trait]
pub trait TripDirectory: Send + Sync {
    async fn find_ownership(&self, trip_id: Uuid) -> Result<Option<TripOwnership>, DomainError>;
}

/// Holds (trip, principal, role) membership rows.
///
/// At most one row exists per (trip, principal). Each write is atomic per key.
#[async_trait::async_trait]
pub trait MembershipStore: Send + Sync {
    /// Creates the row if absent, else overwrites its role.
    async fn upsert(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
        role: TripRole,
    ) -> Result<Membership, DomainError>;

    async fn find(&self, trip_id: Uuid, user_id: Uuid) -> Result<Option<Membership>, DomainError>;

    async fn list_by_trip(&self, trip_id: Uuid) -> Result<Vec<Membership>, DomainError>;

    /// Removes every row of a trip. Returns the number removed.
    async fn delete_by_trip(&self, trip_id: Uuid) -> Result<u64, DomainError>;

    /// Removes one row. Returns false if there was none.
    async fn remove(&self, trip_id: Uuid, user_id: Uuid) -> Result<bool, DomainError>;
}

/// Holds invite codes and performs atomic redemption.
#[async_trait::async_trait]
pub trait InviteRegistry: Send + Sync {
    /// Creates a code unique within the registry.
    async fn issue(&self, invite: NewInvite) -> Result<InviteCode, DomainError>;

    /// Validates and consumes `code` for `user_id`, upserting the membership.
    ///
    /// Expiry, the use cap, the membership upsert and the increment form one
    /// atomic unit per code. A failure leaves no partial state behind.
    async fn redeem(&self, code: &str, user_id: Uuid) -> Result<Redemption, DomainError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, DomainError>;

    async fn list_by_trip(&self, trip_id: Uuid) -> Result<Vec<InviteCode>, DomainError>;
}
