//! Domain services for Trip Share.
//!
//! Services contain business logic that operates on domain models.

pub mod authorization;
pub mod invitations;
pub mod role_resolution;

pub use authorization::{authorize, AccessGrant, AccessLevel, TripGuard};
pub use invitations::{InvitationService, JoinOutcome};
pub use role_resolution::{resolve_effective_role, resolve_with_member_role};
