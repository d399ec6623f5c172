//! Persistence layer for the Trip Share backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - PostgreSQL implementations of the domain store traits
//! - SQL migrations

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
