//! Trip invite code route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use domain::models::invite::{
    CreateInviteRequest, InviteResponse, JoinTripRequest, ListInvitesResponse,
};
use domain::models::TripDetail;
use domain::services::JoinOutcome;
use domain::DomainError;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::{record_invite_issued, record_invite_redemption};
use crate::services::TripService;

/// Create a new invite code for a trip.
///
/// POST /api/v1/trips/:trip_id/invites
///
/// Requires admin on the trip.
pub async fn create_invite(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(trip_id): Path<Uuid>,
    Json(request): Json<CreateInviteRequest>,
) -> Result<(StatusCode, Json<InviteResponse>), ApiError> {
    request.validate()?;
    let role = request.parsed_role()?;

    let max_hours = state.config.invites.max_expiry_hours;
    let expires_at = match request.expires_in_hours {
        Some(hours) if hours > max_hours => {
            return Err(ApiError::Validation(format!(
                "expires_in_hours must be at most {}",
                max_hours
            )));
        }
        Some(hours) => Some(
            Duration::try_hours(hours)
                .and_then(|ttl| Utc::now().checked_add_signed(ttl))
                .ok_or_else(|| ApiError::Validation("expires_in_hours is out of range".to_string()))?,
        ),
        None => None,
    };

    let invite = TripService::new(state.pool.clone())
        .issue_invite(user_auth.user_id, trip_id, role, request.usage, expires_at)
        .await?;

    record_invite_issued(role.as_str());

    Ok((
        StatusCode::CREATED,
        Json(InviteResponse::from_invite(invite, Utc::now())),
    ))
}

/// List invite codes of a trip with their current state.
///
/// GET /api/v1/trips/:trip_id/invites
///
/// Requires admin on the trip.
pub async fn list_invites(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<ListInvitesResponse>, ApiError> {
    let invites = TripService::new(state.pool.clone())
        .list_invites(user_auth.user_id, trip_id)
        .await?;

    let now = Utc::now();
    Ok(Json(ListInvitesResponse {
        data: invites
            .into_iter()
            .map(|invite| InviteResponse::from_invite(invite, now))
            .collect(),
    }))
}

/// Join a trip with an invite code.
///
/// POST /api/v1/trips/join
///
/// Returns the trip as the caller now sees it.
pub async fn join_trip(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<JoinTripRequest>,
) -> Result<Json<TripDetail>, ApiError> {
    request.validate()?;
    let code = request.normalized_code()?;

    let result = TripService::new(state.pool.clone())
        .join(user_auth.user_id, &code)
        .await;

    match result {
        Ok((outcome, detail)) => {
            record_invite_redemption(match outcome {
                JoinOutcome::Joined(_) => "joined",
                JoinOutcome::AlreadyOwner { .. } => "owner",
            });
            Ok(Json(detail))
        }
        Err(e) => {
            record_invite_redemption(redemption_failure_label(&e));
            Err(e.into())
        }
    }
}

fn redemption_failure_label(err: &DomainError) -> &'static str {
    match err {
        DomainError::InviteNotFound => "invite_not_found",
        DomainError::InviteExpired => "invite_expired",
        DomainError::InviteExhausted => "invite_exhausted",
        _ => "error",
    }
}
