use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use tracing::{debug, info};

/// Maximum number of rows returned by the capped list operations
pub const PAST_EVENTS_LIMIT: i64 = 5;
pub const POPULAR_EVENTS_LIMIT: i64 = 5;
pub const TEXT_SEARCH_LIMIT: i64 = 5;

/// Represents an event listing in the database.
///
/// Rows are sourced entirely from the hosted store; this crate never creates
/// or mutates them outside of test setup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration_hours: i32,
    pub registration_start: DateTime<Utc>,
    pub registration_end: DateTime<Utc>,
    pub is_free: bool,
    pub price: Option<f64>,
    pub team_size: Option<i32>,
    pub organizer_name: Option<String>,
    pub organizer_email: Option<String>,
    pub organizer_contact: Option<String>,
    pub like_count: i32,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Public detail-page URL derived from the event identifier
    pub fn detail_url(&self, public_base_url: &str) -> String {
        format!("{}/events/{}", public_base_url.trim_end_matches('/'), self.id)
    }
}

const EVENT_COLUMNS: &str = "id, title, description, category, location, start_date, end_date, \
     duration_hours, registration_start, registration_end, is_free, price, team_size, \
     organizer_name, organizer_email, organizer_contact, like_count, approved, created_at";

fn map_event_row(row: &PgRow) -> Event {
    Event {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        category: row.get("category"),
        location: row.get("location"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        duration_hours: row.get("duration_hours"),
        registration_start: row.get("registration_start"),
        registration_end: row.get("registration_end"),
        is_free: row.get("is_free"),
        price: row.get("price"),
        team_size: row.get("team_size"),
        organizer_name: row.get("organizer_name"),
        organizer_email: row.get("organizer_email"),
        organizer_contact: row.get("organizer_contact"),
        like_count: row.get("like_count"),
        approved: row.get("approved"),
        created_at: row.get("created_at"),
    }
}

/// Initialize the database schema.
///
/// The events table is owned by the hosting platform in production; this is
/// used by integration tests to provision a compatible local schema.
pub async fn init_database_schema(pool: &PgPool) -> Result<()> {
    info!("Initializing database schema");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS events (
            id BIGSERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            description TEXT NOT NULL,
            category VARCHAR(100) NOT NULL,
            location VARCHAR(255) NOT NULL,
            start_date TIMESTAMPTZ NOT NULL,
            end_date TIMESTAMPTZ NOT NULL,
            duration_hours INTEGER NOT NULL DEFAULT 0,
            registration_start TIMESTAMPTZ NOT NULL,
            registration_end TIMESTAMPTZ NOT NULL,
            is_free BOOLEAN NOT NULL DEFAULT TRUE,
            price DOUBLE PRECISION,
            team_size INTEGER,
            organizer_name VARCHAR(255),
            organizer_email VARCHAR(255),
            organizer_contact VARCHAR(255),
            like_count INTEGER NOT NULL DEFAULT 0,
            approved BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP,
            description_tsv tsvector GENERATED ALWAYS AS (to_tsvector('english', description)) STORED
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create events table")?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS events_description_tsv_idx ON events USING GIN (description_tsv)",
    )
    .execute(pool)
    .await
    .context("Failed to create FTS index")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS events_end_date_idx ON events(end_date)")
        .execute(pool)
        .await
        .context("Failed to create end_date index")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// List approved events that have not ended yet, newest listing first
pub async fn list_active(pool: &PgPool, now: DateTime<Utc>) -> Result<Vec<Event>> {
    debug!("Listing active events");

    let rows = sqlx::query(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE approved = TRUE AND end_date > $1
         ORDER BY created_at DESC"
    ))
    .bind(now)
    .fetch_all(pool)
    .await
    .context("Failed to list active events")?;

    Ok(rows.iter().map(map_event_row).collect())
}

/// List the most recently finished approved events, capped at 5
pub async fn list_past(pool: &PgPool, now: DateTime<Utc>) -> Result<Vec<Event>> {
    debug!("Listing past events");

    let rows = sqlx::query(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE approved = TRUE AND end_date < $1
         ORDER BY end_date DESC
         LIMIT $2"
    ))
    .bind(now)
    .bind(PAST_EVENTS_LIMIT)
    .fetch_all(pool)
    .await
    .context("Failed to list past events")?;

    Ok(rows.iter().map(map_event_row).collect())
}

/// List approved events whose location contains the given substring,
/// case-insensitive, uncapped
pub async fn list_by_location(pool: &PgPool, location: &str) -> Result<Vec<Event>> {
    debug!(location = %location, "Listing events by location");

    let rows = sqlx::query(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE approved = TRUE AND location ILIKE $1"
    ))
    .bind(format!("%{}%", location))
    .fetch_all(pool)
    .await
    .context("Failed to list events by location")?;

    Ok(rows.iter().map(map_event_row).collect())
}

/// List approved events whose category contains the given substring,
/// case-insensitive, uncapped
pub async fn list_by_category(pool: &PgPool, category: &str) -> Result<Vec<Event>> {
    debug!(category = %category, "Listing events by category");

    let rows = sqlx::query(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE approved = TRUE AND category ILIKE $1"
    ))
    .bind(format!("%{}%", category))
    .fetch_all(pool)
    .await
    .context("Failed to list events by category")?;

    Ok(rows.iter().map(map_event_row).collect())
}

/// List the most liked approved events, capped at 5
pub async fn list_popular(pool: &PgPool) -> Result<Vec<Event>> {
    debug!("Listing popular events");

    let rows = sqlx::query(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE approved = TRUE
         ORDER BY like_count DESC
         LIMIT $1"
    ))
    .bind(POPULAR_EVENTS_LIMIT)
    .fetch_all(pool)
    .await
    .context("Failed to list popular events")?;

    Ok(rows.iter().map(map_event_row).collect())
}

/// Full-text search over event descriptions, ranked, capped at 5.
///
/// Used by the AI-assisted flow; the caller passes the user's raw query
/// string unchanged.
pub async fn search_by_text(pool: &PgPool, query: &str) -> Result<Vec<Event>> {
    debug!(query_length = query.len(), "Searching events by text");

    let rows = sqlx::query(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE approved = TRUE AND description_tsv @@ plainto_tsquery('english', $1)
         ORDER BY ts_rank(description_tsv, plainto_tsquery('english', $1)) DESC
         LIMIT $2"
    ))
    .bind(query)
    .bind(TEXT_SEARCH_LIMIT)
    .fetch_all(pool)
    .await
    .context("Failed to search events by text")?;

    Ok(rows.iter().map(map_event_row).collect())
}

/// Check database connectivity and basic query capability
pub async fn check_database_health(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Database health check failed: {}", e))?;

    tracing::debug!("Database health check passed");
    Ok(())
}
