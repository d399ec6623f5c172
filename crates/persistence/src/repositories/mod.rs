//! Repository implementations for database operations.

pub mod checklist;
pub mod invite;
pub mod itinerary_day;
pub mod membership;
pub mod trip;
pub mod user;

pub use checklist::ChecklistRepository;
pub use invite::InviteRepository;
pub use itinerary_day::ItineraryDayRepository;
pub use membership::MembershipRepository;
pub use trip::TripRepository;
pub use user::UserRepository;
