//! # Application Error Types
//!
//! This module defines the configuration error type used at startup and the
//! standardized error logging helpers used at the handler boundaries.
//! Runtime failures from the store, the chat platform, and the AI service
//! propagate as `anyhow::Error` and are logged through `error_logging`.

use std::fmt;

/// Application error type for configuration loading and validation
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities for consistent error reporting across the application
pub mod error_logging {
    use tracing::error;

    /// Log database operation errors with contextual information
    pub fn log_database_error(
        error: &impl std::fmt::Display,
        operation: &str,
        chat_id: Option<i64>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            chat_id = ?chat_id,
            "Database operation failed"
        );
    }

    /// Log Telegram delivery errors with chat context
    pub fn log_telegram_error(error: &impl std::fmt::Display, operation: &str, chat_id: i64) {
        error!(
            error = %error,
            operation = %operation,
            chat_id = %chat_id,
            "Telegram operation failed"
        );
    }

    /// Log AI completion service errors with query context
    pub fn log_ai_error(error: &impl std::fmt::Display, operation: &str, query_length: usize) {
        error!(
            error = %error,
            operation = %operation,
            query_length = %query_length,
            "AI completion request failed"
        );
    }

    /// Log configuration errors during startup/initialization
    pub fn log_config_error(error: &impl std::fmt::Display, config_key: &str) {
        error!(
            error = %error,
            config_key = %config_key,
            "Configuration error"
        );
    }
}
