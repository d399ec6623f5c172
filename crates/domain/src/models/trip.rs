//! Trip domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use shared::validation::parse_trip_date;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::checklist::ChecklistItem;
use super::itinerary_day::ItineraryDay;
use super::membership::{EffectiveRole, Membership};

/// Status given to trips created without one.
pub const DEFAULT_TRIP_STATUS: &str = "ideia";

/// A shared trip plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Trip {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The part of a trip that access control depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripOwnership {
    pub trip_id: Uuid,
    pub owner_id: Uuid,
}

/// Fields for inserting a new trip.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Partial update of a trip. `None` leaves a field untouched; for nullable
/// fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
}

impl TripPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Request payload for creating a trip.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTripRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Status must be between 1 and 50 characters"))]
    pub status: Option<String>,

    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl CreateTripRequest {
    /// Builds the insert for `owner_id`. Returns `None` when the title is
    /// missing or blank. Unparseable dates are stored as empty.
    pub fn into_new_trip(self, owner_id: Uuid) -> Option<NewTrip> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;

        Some(NewTrip {
            owner_id,
            title,
            description: self.description,
            status: self
                .status
                .unwrap_or_else(|| DEFAULT_TRIP_STATUS.to_string()),
            start_date: lenient_date(self.start_date.as_deref()),
            end_date: lenient_date(self.end_date.as_deref()),
        })
    }
}

/// Request payload for updating a trip.
///
/// Absent fields are left untouched; `null` or `""` clears a date.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateTripRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,

    #[validate(length(min = 1, max = 50, message = "Status must be between 1 and 50 characters"))]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub start_date: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub end_date: Option<Option<String>>,
}

impl UpdateTripRequest {
    /// Converts the request into a patch, rejecting dates that do not parse.
    pub fn into_patch(self) -> Result<TripPatch, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let start_date = strict_date(self.start_date, "start_date", &mut errors);
        let end_date = strict_date(self.end_date, "end_date", &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TripPatch {
            title: self.title,
            description: self.description,
            status: self.status,
            start_date,
            end_date,
        })
    }
}

/// Trip entry in the trip listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TripSummary {
    #[serde(flatten)]
    pub trip: Trip,
    pub day_count: i64,
    pub checklist_count: i64,
    pub current_role: EffectiveRole,
}

/// Response for listing trips.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListTripsResponse {
    pub data: Vec<TripSummary>,
}

/// Full trip as seen by a principal with read access.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TripDetail {
    #[serde(flatten)]
    pub trip: Trip,
    pub days: Vec<ItineraryDay>,
    pub checklist: Vec<ChecklistItem>,
    pub members: Vec<Membership>,
    pub current_role: EffectiveRole,
    pub can_edit: bool,
}

/// Distinguishes an absent field from an explicit `null`.
/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn lenient_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|value| parse_trip_date(value).ok().flatten())
}

fn strict_date(
    raw: Option<Option<String>>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<Option<NaiveDate>> {
    match raw {
        None => None,
        Some(None) => Some(None),
        Some(Some(value)) => match parse_trip_date(&value) {
            Ok(date) => Some(date),
            Err(err) => {
                errors.add(field, err);
                None
            }
        },
    }
}
