//! Itinerary day route handlers. All require admin on the trip.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::itinerary_day::{CreateDayRequest, UpdateDayRequest};
use domain::models::ItineraryDay;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::TripService;

/// POST /api/v1/trips/:trip_id/days
pub async fn add_day(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(trip_id): Path<Uuid>,
    Json(request): Json<CreateDayRequest>,
) -> Result<(StatusCode, Json<ItineraryDay>), ApiError> {
    request.validate()?;

    let day = TripService::new(state.pool.clone())
        .add_day(user_auth.user_id, trip_id, request.into())
        .await?;

    Ok((StatusCode::CREATED, Json(day)))
}

/// PATCH /api/v1/trips/:trip_id/days/:day_id
pub async fn update_day(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((trip_id, day_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateDayRequest>,
) -> Result<Json<ItineraryDay>, ApiError> {
    request.validate()?;

    let day = TripService::new(state.pool.clone())
        .update_day_notes(user_auth.user_id, trip_id, day_id, request.notes)
        .await?;

    Ok(Json(day))
}

/// DELETE /api/v1/trips/:trip_id/days/:day_id
pub async fn delete_day(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((trip_id, day_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    TripService::new(state.pool.clone())
        .delete_day(user_auth.user_id, trip_id, day_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
