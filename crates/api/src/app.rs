use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    join_rate_limit_middleware, metrics_handler, metrics_middleware, require_user_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{auth, checklist, days, health, invites, members, trips};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    /// Per-user limiter for invite redemption. `None` when disabled.
    pub join_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let join_limiter = match config.security.join_rate_limit_per_minute {
        0 => None,
        limit => Some(Arc::new(RateLimiterState::new(limit))),
    };

    let state = AppState {
        pool,
        config: config.clone(),
        join_limiter,
    };

    let cors = if config.security.cors_origins.is_empty() {
        // Development: any origin
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login));

    let protected_routes = Router::new()
        .route("/api/v1/me", get(auth::me))
        .route(
            "/api/v1/trips",
            get(trips::list_trips).post(trips::create_trip),
        )
        .route(
            "/api/v1/trips/:trip_id",
            get(trips::get_trip)
                .patch(trips::update_trip)
                .delete(trips::delete_trip),
        )
        .route("/api/v1/trips/:trip_id/days", post(days::add_day))
        .route(
            "/api/v1/trips/:trip_id/days/:day_id",
            patch(days::update_day).delete(days::delete_day),
        )
        .route(
            "/api/v1/trips/:trip_id/checklist",
            post(checklist::add_checklist_item),
        )
        .route(
            "/api/v1/trips/:trip_id/checklist/:item_id",
            patch(checklist::rename_checklist_item).delete(checklist::delete_checklist_item),
        )
        .route(
            "/api/v1/trips/:trip_id/checklist/:item_id/toggle",
            patch(checklist::toggle_checklist_item),
        )
        .route(
            "/api/v1/trips/:trip_id/invites",
            get(invites::list_invites).post(invites::create_invite),
        )
        .route("/api/v1/trips/:trip_id/members", get(members::list_members))
        .route(
            "/api/v1/trips/:trip_id/members/:user_id",
            axum::routing::delete(members::remove_member),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Auth is the outer layer so the limiter can key on the caller.
    let join_routes = Router::new()
        .route("/api/v1/trips/join", post(invites::join_trip))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            join_rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(join_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
