//! Checklist route handlers. All require admin on the trip.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::checklist::ChecklistLabelRequest;
use domain::models::ChecklistItem;
use domain::DomainError;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::TripService;

fn label(request: ChecklistLabelRequest) -> Result<String, ApiError> {
    request.validate()?;
    request
        .into_label()
        .ok_or_else(|| DomainError::MissingField("label".to_string()).into())
}

/// POST /api/v1/trips/:trip_id/checklist
pub async fn add_checklist_item(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(trip_id): Path<Uuid>,
    Json(request): Json<ChecklistLabelRequest>,
) -> Result<(StatusCode, Json<ChecklistItem>), ApiError> {
    let label = label(request)?;

    let item = TripService::new(state.pool.clone())
        .add_checklist_item(user_auth.user_id, trip_id, label)
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/v1/trips/:trip_id/checklist/:item_id
pub async fn rename_checklist_item(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((trip_id, item_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ChecklistLabelRequest>,
) -> Result<Json<ChecklistItem>, ApiError> {
    let label = label(request)?;

    let item = TripService::new(state.pool.clone())
        .rename_checklist_item(user_auth.user_id, trip_id, item_id, label)
        .await?;

    Ok(Json(item))
}

/// PATCH /api/v1/trips/:trip_id/checklist/:item_id/toggle
pub async fn toggle_checklist_item(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((trip_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ChecklistItem>, ApiError> {
    let item = TripService::new(state.pool.clone())
        .toggle_checklist_item(user_auth.user_id, trip_id, item_id)
        .await?;

    Ok(Json(item))
}

/// DELETE /api/v1/trips/:trip_id/checklist/:item_id
pub async fn delete_checklist_item(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((trip_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    TripService::new(state.pool.clone())
        .delete_checklist_item(user_auth.user_id, trip_id, item_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
