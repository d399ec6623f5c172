//! Trip management route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::trip::{CreateTripRequest, ListTripsResponse, UpdateTripRequest};
use domain::models::{Trip, TripDetail};
use domain::DomainError;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_trip_created;
use crate::services::TripService;

/// List trips the caller owns or belongs to.
///
/// GET /api/v1/trips
pub async fn list_trips(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<ListTripsResponse>, ApiError> {
    let trips = TripService::new(state.pool.clone())
        .list(user_auth.user_id)
        .await?;

    Ok(Json(ListTripsResponse { data: trips }))
}

/// Create a trip owned by the caller.
///
/// POST /api/v1/trips
pub async fn create_trip(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<Trip>), ApiError> {
    request.validate()?;

    let new_trip = request
        .into_new_trip(user_auth.user_id)
        .ok_or_else(|| DomainError::MissingField("title".to_string()))?;

    let trip = TripService::new(state.pool.clone()).create(new_trip).await?;
    record_trip_created();

    Ok((StatusCode::CREATED, Json(trip)))
}

/// Trip with its days, checklist and members.
///
/// GET /api/v1/trips/:trip_id
pub async fn get_trip(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<TripDetail>, ApiError> {
    let detail = TripService::new(state.pool.clone())
        .detail(user_auth.user_id, trip_id)
        .await?;

    Ok(Json(detail))
}

/// Partial update. Requires admin.
///
/// PATCH /api/v1/trips/:trip_id
pub async fn update_trip(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(trip_id): Path<Uuid>,
    Json(request): Json<UpdateTripRequest>,
) -> Result<Json<Trip>, ApiError> {
    request.validate()?;
    let patch = request.into_patch()?;

    let trip = TripService::new(state.pool.clone())
        .update(user_auth.user_id, trip_id, patch)
        .await?;

    Ok(Json(trip))
}

/// Delete a trip with everything attached to it. Requires admin.
///
/// DELETE /api/v1/trips/:trip_id
pub async fn delete_trip(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(trip_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    TripService::new(state.pool.clone())
        .delete(user_auth.user_id, trip_id)
        .await?;

    info!(trip_id = %trip_id, "Trip deleted via API");
    Ok(StatusCode::NO_CONTENT)
}
