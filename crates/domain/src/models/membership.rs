//! Trip membership models and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::DomainError;

/// Role granted to a non-owning member of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripRole {
    Admin,
    Viewer,
}

impl TripRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripRole::Admin => "admin",
            TripRole::Viewer => "viewer",
        }
    }

    /// Parses a role from untrusted input.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        value.parse()
    }
}

impl FromStr for TripRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(TripRole::Admin),
            "viewer" => Ok(TripRole::Viewer),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl fmt::Display for TripRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role that governs a principal's access to a trip at request time.
///
/// Derived from ownership and membership, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveRole {
    Admin,
    Viewer,
    None,
}

impl EffectiveRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveRole::Admin => "admin",
            EffectiveRole::Viewer => "viewer",
            EffectiveRole::None => "none",
        }
    }

    /// Returns true if this role can see the trip detail
    pub fn can_read(&self) -> bool {
        !matches!(self, EffectiveRole::None)
    }

    /// Returns true if this role can modify the trip and its contents
    pub fn can_write(&self) -> bool {
        matches!(self, EffectiveRole::Admin)
    }
}

impl From<TripRole> for EffectiveRole {
    fn from(role: TripRole) -> Self {
        match role {
            TripRole::Admin => EffectiveRole::Admin,
            TripRole::Viewer => EffectiveRole::Viewer,
        }
    }
}

impl fmt::Display for EffectiveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted role for a non-owning principal on a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Membership {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub role: TripRole,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Member entry returned by the members listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberInfo {
    pub user_id: Uuid,
    pub role: TripRole,
    pub is_owner: bool,
    pub name: Option<String>,
    pub email: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
}

/// Response for listing trip members.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListMembersResponse {
    pub data: Vec<MemberInfo>,
}
