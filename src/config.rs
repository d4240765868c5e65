//! # Unified Application Configuration
//!
//! This module provides a centralized configuration system that consolidates
//! all application settings into a single, structured configuration object.
//! It supports loading from environment variables, validation, and provides
//! a clean interface for accessing configuration throughout the application.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Bot-specific configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// HTTP client timeout in seconds for Telegram API calls
    pub http_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            http_timeout_secs: 30,
        }
    }
}

impl BotConfig {
    /// Validate bot configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.token.trim().is_empty() {
            return Err(AppError::Config("Bot token cannot be empty".to_string()));
        }

        // Basic bot token format validation
        if !self.token.contains(':') {
            return Err(AppError::Config(
                "Bot token format is invalid. Expected format: 'bot_id:bot_token'".to_string(),
            ));
        }

        let parts: Vec<&str> = self.token.split(':').collect();
        if parts.len() != 2 {
            return Err(AppError::Config(
                "Bot token format is invalid. Expected format: 'bot_id:bot_token'".to_string(),
            ));
        }

        // Validate bot ID is numeric
        if parts[0].parse::<u64>().is_err() {
            return Err(AppError::Config(
                "Bot token bot ID must be numeric".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 || self.http_timeout_secs > 300 {
            return Err(AppError::Config(
                "HTTP timeout must be between 1 and 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Database configuration settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: String,
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.url.trim().is_empty() {
            return Err(AppError::Config(
                "DATABASE_URL cannot be empty".to_string(),
            ));
        }

        if !self.url.starts_with("postgresql://") && !self.url.starts_with("postgres://") {
            return Err(AppError::Config(
                "DATABASE_URL must start with 'postgresql://' or 'postgres://'".to_string(),
            ));
        }

        Ok(())
    }
}

/// AI completion service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key for the completion service
    pub api_key: String,
    /// Model name to request
    pub model: String,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

impl AiConfig {
    /// Validate AI configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config("AI API key cannot be empty".to_string()));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("AI model cannot be empty".to_string()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(AppError::Config(
                "AI base URL must start with 'http://' or 'https://'".to_string(),
            ));
        }

        Ok(())
    }
}

/// HTTP API server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port the API server listens on
    pub port: u16,
    /// Public base URL used to build event detail links
    pub public_base_url: String,
    /// Daily request budget per API client
    pub daily_request_budget: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            public_base_url: "https://hackhub.example.com".to_string(),
            daily_request_budget: 100,
        }
    }
}

impl HttpConfig {
    /// Validate HTTP server configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.port == 0 {
            return Err(AppError::Config("PORT cannot be 0".to_string()));
        }

        if self.daily_request_budget == 0 {
            return Err(AppError::Config(
                "API daily request budget cannot be 0".to_string(),
            ));
        }

        if self.public_base_url.trim().is_empty() {
            return Err(AppError::Config(
                "Public base URL cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub ai: AiConfig,
    pub http: HttpConfig,
    /// Deployment environment tag (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let bot = BotConfig {
            token: env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
                AppError::Config(
                    "TELEGRAM_BOT_TOKEN environment variable is required but not set".to_string(),
                )
            })?,
            http_timeout_secs: parse_env_or("TELEGRAM_HTTP_TIMEOUT_SECS", 30)?,
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").map_err(|_| {
                AppError::Config(
                    "DATABASE_URL environment variable is required but not set".to_string(),
                )
            })?,
        };

        let ai = AiConfig {
            api_key: env::var("AI_API_KEY").unwrap_or_default(),
            model: env::var("AI_MODEL").unwrap_or_else(|_| AiConfig::default().model),
            base_url: env::var("AI_BASE_URL").unwrap_or_else(|_| AiConfig::default().base_url),
        };

        let http = HttpConfig {
            port: parse_env_or("PORT", 3000)?,
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| HttpConfig::default().public_base_url),
            daily_request_budget: parse_env_or("API_DAILY_BUDGET", 100)?,
        };

        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            bot,
            database,
            ai,
            http,
            environment,
        })
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> AppResult<()> {
        self.bot.validate()?;
        self.database.validate()?;
        self.ai.validate()?;
        self.http.validate()?;
        Ok(())
    }
}

fn parse_env_or<T: std::str::FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| AppError::Config(format!("{} must be a valid number", key))),
        Err(_) => Ok(default),
    }
}
