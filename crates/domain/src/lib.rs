//! Domain layer for the Trip Share backend.
//!
//! This crate contains:
//! - Domain models (Trip, Membership, InviteCode, ItineraryDay, ChecklistItem, User)
//! - Role resolution and the trip authorization guard
//! - Store traits for memberships and invite codes, with in-memory implementations
//! - Domain error types

pub mod errors;
pub mod models;
pub mod services;
pub mod stores;

pub use errors::DomainError;
