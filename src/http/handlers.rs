//! Request handlers for the event query API.
//!
//! Every data route is a one-shot read query; an empty result set is a
//! normal 200 with an empty array, and any store failure becomes a 500 with
//! a generic `{error}` body.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use sqlx::postgres::PgPool;
use std::sync::Arc;
use tracing::error;

use crate::db::{self, Event};
use crate::http::error::HttpError;
use crate::http::rate_limit::DailyQuota;

/// Shared state for the HTTP API handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub quota: Arc<DailyQuota>,
    pub environment: String,
}

fn internal(operation: &str, err: anyhow::Error) -> HttpError {
    error!(error = %err, operation = %operation, "API query failed");
    HttpError::Internal(err.to_string())
}

/// GET /api/events/active
pub async fn active_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, HttpError> {
    let events = db::list_active(&state.pool, Utc::now())
        .await
        .map_err(|e| internal("list_active", e))?;
    Ok(Json(events))
}

/// GET /api/events/past
pub async fn past_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, HttpError> {
    let events = db::list_past(&state.pool, Utc::now())
        .await
        .map_err(|e| internal("list_past", e))?;
    Ok(Json(events))
}

/// GET /api/events/location/:location
pub async fn events_by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<Vec<Event>>, HttpError> {
    let events = db::list_by_location(&state.pool, &location)
        .await
        .map_err(|e| internal("list_by_location", e))?;
    Ok(Json(events))
}

/// GET /api/events/category/:category
pub async fn events_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Event>>, HttpError> {
    let events = db::list_by_category(&state.pool, &category)
        .await
        .map_err(|e| internal("list_by_category", e))?;
    Ok(Json(events))
}

/// GET /api/events/popular
pub async fn popular_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, HttpError> {
    let events = db::list_popular(&state.pool)
        .await
        .map_err(|e| internal("list_popular", e))?;
    Ok(Json(events))
}

#[derive(Debug, serde::Serialize)]
pub struct ServerStatus {
    pub status: String,
    pub environment: String,
    pub timestamp: String,
}

#[derive(Debug, serde::Serialize)]
pub struct DatabaseStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct SystemStatus {
    pub status: String,
    pub server: ServerStatus,
    pub database: DatabaseStatus,
}

/// GET /api/system/status
///
/// The server section always reports "running"; the overall status and the
/// HTTP code follow the database connectivity probe.
pub async fn system_status(State(state): State<AppState>) -> impl IntoResponse {
    let server = ServerStatus {
        status: "running".to_string(),
        environment: state.environment.clone(),
        timestamp: Utc::now().to_rfc3339(),
    };

    match db::check_database_health(&state.pool).await {
        Ok(()) => {
            let body = SystemStatus {
                status: "ok".to_string(),
                server,
                database: DatabaseStatus {
                    status: "connected".to_string(),
                    error: None,
                },
            };
            (StatusCode::OK, Json(body))
        }
        Err(e) => {
            error!(error = %e, "Database status check failed");
            let body = SystemStatus {
                status: "degraded".to_string(),
                server,
                database: DatabaseStatus {
                    status: "error".to_string(),
                    error: Some(e.to_string()),
                },
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}

/// GET /health: process liveness only; no external calls
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
