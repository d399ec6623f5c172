//! Invite code domain models for trip sharing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use super::membership::{Membership, TripRole};
use crate::errors::DomainError;

/// Length of generated invite codes.
pub const INVITE_CODE_LENGTH: usize = 8;

/// Alphabet of generated invite codes.
const INVITE_CODE_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Attempts at generating an unused code before giving up.
pub const MAX_CODE_GENERATION_ATTEMPTS: usize = 100;

lazy_static::lazy_static! {
    static ref INVITE_CODE_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9]{8}$").unwrap();
}

/// How many times a code may be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageMode {
    /// Capped at one redemption.
    Single,
    /// No cap; bounded only by the optional expiry.
    #[default]
    Link,
}

impl UsageMode {
    pub fn max_uses(&self) -> Option<i32> {
        match self {
            UsageMode::Single => Some(1),
            UsageMode::Link => None,
        }
    }

    pub fn from_max_uses(max_uses: Option<i32>) -> Self {
        match max_uses {
            Some(_) => UsageMode::Single,
            None => UsageMode::Link,
        }
    }
}

/// Lifecycle state of an invite code. `Exhausted` and `Expired` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Active,
    Exhausted,
    Expired,
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InviteStatus::Active => "active",
            InviteStatus::Exhausted => "exhausted",
            InviteStatus::Expired => "expired",
        };
        write!(f, "{}", s)
    }
}

/// A redeemable code granting a role on a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InviteCode {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub code: String,
    pub role: TripRole,
    /// `None` means unlimited.
    pub max_uses: Option<i32>,
    pub used_count: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl InviteCode {
    pub fn usage_mode(&self) -> UsageMode {
        UsageMode::from_max_uses(self.max_uses)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    pub fn is_exhausted(&self) -> bool {
        self.max_uses
            .is_some_and(|max_uses| self.used_count >= max_uses)
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> InviteStatus {
        if self.is_expired_at(now) {
            InviteStatus::Expired
        } else if self.is_exhausted() {
            InviteStatus::Exhausted
        } else {
            InviteStatus::Active
        }
    }

    /// Checks expiry, then the use cap, against `now`.
    pub fn ensure_redeemable_at(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        match self.status_at(now) {
            InviteStatus::Active => Ok(()),
            InviteStatus::Expired => Err(DomainError::InviteExpired),
            InviteStatus::Exhausted => Err(DomainError::InviteExhausted),
        }
    }
}

/// Fields for issuing a new invite code.
#[derive(Debug, Clone)]
pub struct NewInvite {
    pub trip_id: Uuid,
    pub role: TripRole,
    pub usage: UsageMode,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
}

/// Result of a successful redemption.
#[derive(Debug, Clone)]
pub struct Redemption {
    pub trip_id: Uuid,
    pub role: TripRole,
    pub used_count: i32,
    pub membership: Membership,
}

/// Request to create a new invite.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateInviteRequest {
    /// Role granted on redemption: `admin` or `viewer`.
    pub role: Option<String>,

    /// `single` or `link` (default).
    #[serde(rename = "type", default)]
    pub usage: UsageMode,

    /// Hours until expiry. No expiry when absent.
    #[validate(range(min = 1, message = "expires_in_hours must be at least 1"))]
    pub expires_in_hours: Option<i64>,
}

impl CreateInviteRequest {
    pub fn parsed_role(&self) -> Result<TripRole, DomainError> {
        TripRole::parse(self.role.as_deref().unwrap_or_default())
    }
}

/// Invite code as returned to trip administrators.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InviteResponse {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub code: String,
    pub role: TripRole,
    #[serde(rename = "type")]
    pub usage: UsageMode,
    pub max_uses: Option<i32>,
    pub used_count: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: InviteStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl InviteResponse {
    pub fn from_invite(invite: InviteCode, now: DateTime<Utc>) -> Self {
        Self {
            status: invite.status_at(now),
            usage: invite.usage_mode(),
            id: invite.id,
            trip_id: invite.trip_id,
            code: invite.code,
            role: invite.role,
            max_uses: invite.max_uses,
            used_count: invite.used_count,
            expires_at: invite.expires_at,
            created_by: invite.created_by,
            created_at: invite.created_at,
        }
    }
}

/// Response for listing invites.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListInvitesResponse {
    pub data: Vec<InviteResponse>,
}

/// Request to join a trip using an invite code.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct JoinTripRequest {
    #[validate(length(max = 64, message = "Invalid invite code format"))]
    pub code: Option<String>,
}

impl JoinTripRequest {
    /// Returns the trimmed code, or `MissingField` when absent or blank.
    pub fn normalized_code(&self) -> Result<String, DomainError> {
        self.code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .ok_or_else(|| DomainError::MissingField("code".to_string()))
    }
}

/// Returns true if `code` has the shape of a generated invite code.
pub fn is_well_formed_code(code: &str) -> bool {
    INVITE_CODE_REGEX.is_match(code)
}

/// Generate a random 8-character lowercase alphanumeric invite code.
pub fn generate_invite_code() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    (0..INVITE_CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..INVITE_CODE_CHARS.len());
            INVITE_CODE_CHARS[idx] as char
        })
        .collect()
}
