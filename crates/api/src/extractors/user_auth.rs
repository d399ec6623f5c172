//! Authenticated-user extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::{bearer_token, UserAuth as UserAuthData};

/// The caller of a protected route.
///
/// Reuses what [`require_user_auth`](crate::middleware::require_user_auth)
/// stored in the request extensions, or validates the Bearer token itself
/// when the route has no auth layer.
#[derive(Debug, Clone)]
pub struct UserAuth {
    pub user_id: Uuid,
    pub jti: String,
}

impl From<UserAuthData> for UserAuth {
    fn from(data: UserAuthData) -> Self {
        Self {
            user_id: data.user_id,
            jti: data.jti,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<UserAuthData>() {
            return Ok(auth.clone().into());
        }

        let token = bearer_token(&parts.headers).ok_or_else(|| {
            ApiError::Unauthorized("Missing or invalid Authorization header".to_string())
        })?;

        let jwt_config =
            UserAuthData::create_jwt_config(&state.config.jwt).map_err(ApiError::Internal)?;

        let auth_data = UserAuthData::validate(&jwt_config, token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(auth_data.into())
    }
}
