//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod checklist;
pub mod invite;
pub mod itinerary_day;
pub mod membership;
pub mod trip;
pub mod user;

pub use checklist::ChecklistItemEntity;
pub use invite::TripInviteCodeEntity;
pub use itinerary_day::ItineraryDayEntity;
pub use membership::{TripMemberEntity, TripMemberWithUserEntity, TripRoleDb};
pub use trip::{TripEntity, TripWithCountsEntity};
pub use user::UserEntity;
