use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::http::handlers::{self, AppState};
use crate::http::rate_limit::enforce_daily_quota;

/// Build the API router.
///
/// The daily request budget applies to `/api/*` only; `/health` stays open
/// so process monitors are never throttled.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/events/active", get(handlers::active_events))
        .route("/api/events/past", get(handlers::past_events))
        .route(
            "/api/events/location/:location",
            get(handlers::events_by_location),
        )
        .route(
            "/api/events/category/:category",
            get(handlers::events_by_category),
        )
        .route("/api/events/popular", get(handlers::popular_events))
        .route("/api/system/status", get(handlers::system_status))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_daily_quota,
        ));

    Router::new()
        .merge(api)
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
