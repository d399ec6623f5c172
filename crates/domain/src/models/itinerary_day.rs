//! Itinerary day models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One day of a trip itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ItineraryDay {
    pub id: Uuid,
    pub trip_id: Uuid,
    /// 1-based position in append order.
    pub position: i32,
    pub title: Option<String>,
    pub from_place: Option<String>,
    pub to_place: Option<String>,
    pub distance_km: Option<f64>,
    pub eta: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for appending a day to a trip.
#[derive(Debug, Clone, Default)]
pub struct NewItineraryDay {
    pub title: Option<String>,
    pub from_place: Option<String>,
    pub to_place: Option<String>,
    pub distance_km: Option<f64>,
    pub eta: Option<String>,
    pub notes: Option<String>,
}

/// Request payload for adding a day.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateDayRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    #[serde(alias = "from")]
    #[validate(length(max = 200, message = "Origin must be at most 200 characters"))]
    pub from_place: Option<String>,

    #[serde(alias = "to")]
    #[validate(length(max = 200, message = "Destination must be at most 200 characters"))]
    pub to_place: Option<String>,

    #[validate(range(min = 0.0, message = "Distance must be non-negative"))]
    pub distance_km: Option<f64>,

    #[validate(length(max = 50, message = "ETA must be at most 50 characters"))]
    pub eta: Option<String>,

    #[validate(length(max = 5000, message = "Notes must be at most 5000 characters"))]
    pub notes: Option<String>,
}

impl From<CreateDayRequest> for NewItineraryDay {
    fn from(req: CreateDayRequest) -> Self {
        Self {
            title: non_empty(req.title),
            from_place: non_empty(req.from_place),
            to_place: non_empty(req.to_place),
            distance_km: req.distance_km,
            eta: non_empty(req.eta),
            notes: non_empty(req.notes),
        }
    }
}

/// Request payload for updating a day's notes. An absent field keeps the
/// current notes; `null` clears them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateDayRequest {
    #[serde(default, deserialize_with = "super::trip::deserialize_present")]
    #[validate(length(max = 5000, message = "Notes must be at most 5000 characters"))]
    pub notes: Option<Option<String>>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
