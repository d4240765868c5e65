use anyhow::Result;
use hackhub::ai::QueryInterpreter;
use hackhub::bot;
use hackhub::config::AppConfig;
use hackhub::db;
use hackhub::dialogue::{SearchDialogue, SearchDialogueState};
use hackhub::errors::error_logging;
use hackhub::http::{build_router, AppState, DailyQuota};
use sqlx::postgres::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load and validate configuration early; missing database URL or bot
    // token aborts startup here
    let config = AppConfig::from_env().map_err(|e| {
        error_logging::log_config_error(&e, "environment");
        e
    })?;
    config.validate().map_err(|e| {
        error_logging::log_config_error(&e, "environment");
        e
    })?;
    let config = Arc::new(config);

    info!(environment = %config.environment, "Configuration validated successfully");

    // Create database connection pool and verify connectivity before
    // accepting any traffic
    let pool = PgPool::connect(&config.database.url).await?;
    db::check_database_health(&pool).await?;
    let shared_pool = Arc::new(pool);

    info!("Database connection established");

    let interpreter = Arc::new(QueryInterpreter::new(&config.ai)?);

    // Start the HTTP API server alongside the bot dispatcher
    let state = AppState {
        pool: Arc::clone(&shared_pool),
        quota: Arc::new(DailyQuota::new(config.http.daily_request_budget)),
        environment: config.environment.clone(),
    };
    let router = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http.port));

    tokio::spawn(async move {
        info!(addr = %addr, "Starting HTTP API server");
        match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => {
                if let Err(e) = axum::serve(listener, router).await {
                    tracing::error!(error = %e, "HTTP API server exited");
                }
            }
            Err(e) => tracing::error!(error = %e, addr = %addr, "Failed to bind HTTP API server"),
        }
    });

    // Initialize the bot with custom client configuration for better reliability
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.bot.http_timeout_secs))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create Telegram HTTP client: {}", e))?;

    let tg_bot = Bot::with_client(config.bot.token.clone(), client);

    info!("Bot initialized, starting dispatcher");

    // Create shared dialogue storage for the pending search questions
    let dialogue_storage = InMemStorage::<SearchDialogueState>::new();

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let pool = Arc::clone(&shared_pool);
            let storage = dialogue_storage.clone();
            let interpreter = Arc::clone(&interpreter);
            let config = Arc::clone(&config);
            move |tg_bot: Bot, msg: Message| {
                let pool = Arc::clone(&pool);
                let interpreter = Arc::clone(&interpreter);
                let config = Arc::clone(&config);
                let dialogue = SearchDialogue::new(storage.clone(), msg.chat.id);
                async move {
                    bot::message_handler(tg_bot, msg, pool, dialogue, interpreter, config).await
                }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let pool = Arc::clone(&shared_pool);
            let storage = dialogue_storage.clone();
            let config = Arc::clone(&config);
            move |tg_bot: Bot, q: CallbackQuery| {
                let pool = Arc::clone(&pool);
                let config = Arc::clone(&config);
                // Use the chat ID from the original message that contained the inline keyboard
                let chat_id = match &q.message {
                    Some(msg) => msg.chat().id,
                    None => ChatId::from(q.from.id),
                };
                let dialogue = SearchDialogue::new(storage.clone(), chat_id);
                async move { bot::callback_handler(tg_bot, q, pool, dialogue, config).await }
            }
        }));

    Dispatcher::builder(tg_bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
