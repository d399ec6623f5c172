//! Shared utilities and common types for the Trip Share backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT access tokens (HS256)
//! - Password hashing with Argon2id
//! - Common validation and parsing helpers

pub mod jwt;
pub mod password;
pub mod validation;
