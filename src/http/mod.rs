//! HTTP API surface exposing the event read queries to non-chat clients.

pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod routes;

pub use error::HttpError;
pub use handlers::AppState;
pub use rate_limit::DailyQuota;
pub use routes::build_router;
