//! HTTP route handlers.

pub mod auth;
pub mod checklist;
pub mod days;
pub mod health;
pub mod invites;
pub mod members;
pub mod trips;
