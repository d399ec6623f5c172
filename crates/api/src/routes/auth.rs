//! Authentication routes for registration, login and the current profile.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::User;
use domain::DomainError;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::auth::{AuthError, AuthResult, AuthService};

/// Request body for user registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub password: Option<String>,

    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Token plus the signed-in user.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

impl From<AuthResult> for AuthResponse {
    fn from(result: AuthResult) -> Self {
        Self {
            token: result.access_token,
            token_type: "Bearer".to_string(),
            expires_in: result.expires_in,
            user: result.user,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailAlreadyExists => ApiError::Conflict("Email already registered".into()),
            AuthError::WeakPassword(msg) => ApiError::Validation(msg),
            AuthError::InvalidCredentials => ApiError::Unauthorized("Invalid credentials".into()),
            AuthError::UserNotFound => ApiError::NotFound("User not found".into()),
            AuthError::DatabaseError(db_err) => ApiError::from(db_err),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| DomainError::MissingField(field.to_string()).into())
}

/// Register a new user with email and password.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let email = required(&request.email, "email")?;
    let password = required(&request.password, "password")?;
    request.validate()?;

    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)?;
    let name = request.name.as_deref().filter(|n| !n.trim().is_empty());
    let result = auth_service.register(email, password, name).await?;

    Ok((StatusCode::CREATED, Json(result.into())))
}

/// Login with email and password.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = required(&request.email, "email")?;
    let password = required(&request.password, "password")?;

    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)?;
    let result = auth_service.login(email, password).await?;

    Ok(Json(result.into()))
}

/// Current user profile.
///
/// GET /api/v1/me
pub async fn me(State(state): State<AppState>, user_auth: UserAuth) -> Result<Json<User>, ApiError> {
    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)?;
    let user = auth_service.me(user_auth.user_id).await?;
    Ok(Json(user))
}
