//! Application services behind the HTTP handlers.

pub mod auth;
pub mod trips;

pub use auth::{AuthError, AuthService};
pub use trips::TripService;
