//! Per-user rate limiting for invite redemption.
//!
//! Slows down brute-force guessing of invite codes. Each authenticated user
//! gets an independent GCRA bucket.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, PoisonError, RwLock},
};
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::user_auth::UserAuth;

type UserRateLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter state shared across all requests, keyed by user id.
pub struct RateLimiterState {
    limiters: RwLock<HashMap<Uuid, Arc<UserRateLimiter>>>,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    pub fn new(rate_limit_per_minute: u32) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            rate_limit_per_minute,
        }
    }

    pub fn rate_limit_per_minute(&self) -> u32 {
        self.rate_limit_per_minute
    }

    fn get_or_create_limiter(&self, user_id: Uuid) -> Arc<UserRateLimiter> {
        {
            let limiters = self.limiters.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(limiter) = limiters.get(&user_id) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write().unwrap_or_else(PoisonError::into_inner);
        limiters
            .entry(user_id)
            .or_insert_with(|| {
                let per_minute =
                    NonZeroU32::new(self.rate_limit_per_minute).unwrap_or(NonZeroU32::MIN);
                Arc::new(GovRateLimiter::direct(Quota::per_minute(per_minute)))
            })
            .clone()
    }

    /// Returns `Err(retry_after_secs)` when the user is over the limit.
    pub fn check(&self, user_id: Uuid) -> Result<(), u64> {
        let limiter = self.get_or_create_limiter(user_id);

        limiter.check().map_err(|not_until| {
            let wait_time = not_until.wait_time_from(DefaultClock::default().now());
            wait_time.as_secs().max(1)
        })
    }

    fn active_limiters(&self) -> usize {
        self.limiters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("active_limiters", &self.active_limiters())
            .finish()
    }
}

/// Middleware that limits join attempts per user.
///
/// Must run after [`require_user_auth`](super::user_auth::require_user_auth)
/// so the caller is known.
pub async fn join_rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (Some(limiter), Some(auth)) = (
        state.join_limiter.as_ref(),
        req.extensions().get::<UserAuth>(),
    ) else {
        return next.run(req).await;
    };

    if let Err(retry_after) = limiter.check(auth.user_id) {
        tracing::warn!(user_id = %auth.user_id, retry_after, "Join rate limit exceeded");
        return rate_limited_response(limiter.rate_limit_per_minute(), retry_after);
    }

    next.run(req).await
}

fn rate_limited_response(limit: u32, retry_after: u64) -> Response {
    let body = json!({
        "error": "rate_limit_exceeded",
        "message": format!("Rate limit of {} requests/minute exceeded", limit),
        "retryAfter": retry_after
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}
