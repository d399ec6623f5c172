//! Domain models for Trip Share.

pub mod checklist;
pub mod invite;
pub mod itinerary_day;
pub mod membership;
pub mod trip;
pub mod user;

pub use checklist::ChecklistItem;
pub use invite::{InviteCode, InviteStatus, NewInvite, Redemption, UsageMode};
pub use itinerary_day::{ItineraryDay, NewItineraryDay};
pub use membership::{EffectiveRole, MemberInfo, Membership, TripRole};
pub use trip::{NewTrip, Trip, TripDetail, TripOwnership, TripPatch, TripSummary};
pub use user::User;
