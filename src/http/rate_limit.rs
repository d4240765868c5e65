//! Per-client daily request budget for the `/api/*` routes.
//!
//! Counters live in process memory and are keyed by the `x-user-id` header
//! when present, else the forwarded client address, else a shared anonymous
//! bucket. Each key gets a fixed budget per rolling 24-hour window; the
//! window restarts on the first request after it elapses.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::warn;

use crate::http::error::HttpError;
use crate::http::handlers::AppState;

const WINDOW_HOURS: i64 = 24;

#[derive(Debug)]
struct QuotaWindow {
    started_at: DateTime<Utc>,
    used: u32,
}

/// Tracks request counts per client key over rolling 24-hour windows
#[derive(Debug)]
pub struct DailyQuota {
    budget: u32,
    windows: Mutex<HashMap<String, QuotaWindow>>,
}

impl DailyQuota {
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request for `key` at `now`; returns false once the budget
    /// for the current window is exhausted.
    pub fn try_acquire_at(&self, key: &str, now: DateTime<Utc>) -> bool {
        let mut windows = self.windows.lock();

        // Drop counters whose window has elapsed so the map cannot grow
        // without bound under spoofed client keys
        windows.retain(|_, window| now - window.started_at < Duration::hours(WINDOW_HOURS));

        let window = windows.entry(key.to_string()).or_insert(QuotaWindow {
            started_at: now,
            used: 0,
        });

        if window.used >= self.budget {
            return false;
        }

        window.used += 1;
        true
    }

    /// Record one request for `key` against the current wall clock
    pub fn try_acquire(&self, key: &str) -> bool {
        self.try_acquire_at(key, Utc::now())
    }

    /// Number of client keys currently holding a live window
    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().len()
    }
}

/// Derive the throttle key for a request from its headers
pub fn client_key(headers: &HeaderMap) -> String {
    if let Some(user_id) = headers.get("x-user-id").and_then(|v| v.to_str().ok()) {
        if !user_id.trim().is_empty() {
            return format!("user:{}", user_id.trim());
        }
    }

    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(addr) = forwarded.split(',').next() {
            let addr = addr.trim();
            if !addr.is_empty() {
                return format!("addr:{}", addr);
            }
        }
    }

    "anonymous".to_string()
}

/// Axum middleware enforcing the daily budget on the `/api/*` routes
pub async fn enforce_daily_quota(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let key = client_key(request.headers());

    if !state.quota.try_acquire(&key) {
        warn!(client = %key, "Daily request budget exceeded");
        return Err(HttpError::TooManyRequests);
    }

    Ok(next.run(request).await)
}
