//! HTTP API for Trip Share: accounts, trips, itineraries, checklists and
//! invite-code based sharing.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod services;
