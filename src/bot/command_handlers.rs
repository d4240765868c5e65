//! Command Handlers module for processing bot commands

use anyhow::Result;
use sqlx::postgres::PgPool;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info};

use crate::ai::QueryInterpreter;
use crate::config::AppConfig;
use crate::db;
use crate::errors::error_logging;

use super::ui_builder::create_main_menu_keyboard;
use super::{send_event_results, send_failure_notice};

/// Handle the /start command
pub async fn handle_start_command(bot: &Bot, msg: &Message) -> Result<()> {
    debug!(chat_id = %msg.chat.id, "Handling /start command");

    let welcome_message = "👋 **Welcome to HackHub!**\n\n\
        I help you discover hackathons and tech events.\n\n\
        Browse with the menu below, or use:\n\
        /ask <question> - describe what you're looking for in plain words\n\
        /about - learn more about this bot";

    bot.send_message(msg.chat.id, welcome_message)
        .reply_markup(create_main_menu_keyboard())
        .await?;

    Ok(())
}

/// Handle the /about command
pub async fn handle_about_command(bot: &Bot, msg: &Message) -> Result<()> {
    debug!(chat_id = %msg.chat.id, "Handling /about command");

    let about_message = "ℹ️ **About HackHub**\n\n\
        HackHub tracks community-submitted hackathons and tech events. \
        Every listing is reviewed before it appears here.\n\n\
        **What I can do:**\n\
        🚀 Show active hackathons\n\
        🗓 Show recently finished events\n\
        📍 Search events by location\n\
        🏷 Search events by category\n\
        🔥 Rank events by popularity\n\
        🤖 Answer free-text questions via /ask\n\n\
        Event data is provided by organizers; details can change, so always \
        check the event page before registering.";

    bot.send_message(msg.chat.id, about_message).await?;

    Ok(())
}

/// Handle the /ask command: interpret the query, then run a full-text search.
///
/// The interpretation is shown to the user as an intermediate message only.
/// The store search always receives the raw query string unchanged; feeding
/// the interpretation back into the query is an explicit non-change.
pub async fn handle_ask_command(
    bot: &Bot,
    msg: &Message,
    query: &str,
    pool: Arc<PgPool>,
    interpreter: Arc<QueryInterpreter>,
    config: Arc<AppConfig>,
) -> Result<()> {
    let query = query.trim();

    if query.is_empty() {
        bot.send_message(
            msg.chat.id,
            "Usage: /ask <what you're looking for>\n\
             Example: /ask AI hackathons in Berlin next month",
        )
        .await?;
        return Ok(());
    }

    info!(chat_id = %msg.chat.id, query_length = query.len(), "Handling /ask command");

    let interpretation = match interpreter.interpret(query).await {
        Ok(text) => text,
        Err(e) => {
            error_logging::log_ai_error(&e, "handle_ask_command", query.len());
            send_failure_notice(bot, msg.chat.id).await?;
            return Ok(());
        }
    };

    bot.send_message(msg.chat.id, format!("🤖 {}", interpretation))
        .await?;

    match db::search_by_text(&pool, query).await {
        Ok(events) => {
            send_event_results(
                bot,
                msg.chat.id,
                &events,
                "🔍 No events matched your question.",
                &config.http.public_base_url,
            )
            .await?;
        }
        Err(e) => {
            error_logging::log_database_error(&e, "search_by_text", Some(msg.chat.id.0));
            send_failure_notice(bot, msg.chat.id).await?;
        }
    }

    Ok(())
}
