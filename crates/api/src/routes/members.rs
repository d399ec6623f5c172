//! Trip member route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::membership::ListMembersResponse;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::TripService;

/// List the owner and members of a trip.
///
/// GET /api/v1/trips/:trip_id/members
pub async fn list_members(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<ListMembersResponse>, ApiError> {
    let members = TripService::new(state.pool.clone())
        .list_members(user_auth.user_id, trip_id)
        .await?;

    Ok(Json(ListMembersResponse { data: members }))
}

/// Remove a member from a trip. Requires admin; the owner cannot be removed.
///
/// DELETE /api/v1/trips/:trip_id/members/:user_id
pub async fn remove_member(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((trip_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    TripService::new(state.pool.clone())
        .remove_member(user_auth.user_id, trip_id, member_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
