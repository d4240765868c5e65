//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use chrono::Utc;
use sqlx::postgres::PgPool;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::db;
use crate::dialogue::{SearchDialogue, SearchDialogueState};
use crate::errors::error_logging;

use super::ui_builder::callback_data;
use super::{send_event_results, send_failure_notice};

/// Handle callback queries from the main menu inline keyboard.
///
/// Each action acknowledges the callback, sends a status line, then either
/// runs the corresponding store query or transitions the search dialogue.
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    pool: Arc<PgPool>,
    dialogue: SearchDialogue,
    config: Arc<AppConfig>,
) -> Result<()> {
    let chat_id = match &q.message {
        Some(msg) => msg.chat().id,
        None => ChatId::from(q.from.id),
    };

    let data = q.data.as_deref().unwrap_or("");
    debug!(chat_id = %chat_id, data = %data, "Received callback query");

    // Remove the loading state on the button before doing any slow work
    bot.answer_callback_query(q.id.clone()).await?;

    match data {
        callback_data::ACTIVE_HACKATHONS => {
            bot.send_message(chat_id, "🚀 Fetching active hackathons...")
                .await?;
            run_listing(
                &bot,
                chat_id,
                &config,
                "list_active",
                "📭 No active hackathons right now. Check back soon!",
                db::list_active(&pool, Utc::now()).await,
            )
            .await?;
        }
        callback_data::PAST_EVENTS => {
            bot.send_message(chat_id, "🗓 Fetching past events...")
                .await?;
            run_listing(
                &bot,
                chat_id,
                &config,
                "list_past",
                "📭 No past events on record yet.",
                db::list_past(&pool, Utc::now()).await,
            )
            .await?;
        }
        callback_data::POPULAR_EVENTS => {
            bot.send_message(chat_id, "🔥 Fetching the most popular events...")
                .await?;
            run_listing(
                &bot,
                chat_id,
                &config,
                "list_popular",
                "📭 No events to rank yet.",
                db::list_popular(&pool).await,
            )
            .await?;
        }
        callback_data::SEARCH_LOCATION => {
            // Overwrites any previous pending question for this chat
            dialogue.update(SearchDialogueState::AwaitingLocation).await?;
            bot.send_message(
                chat_id,
                "📍 Send me a city or venue and I'll look for events there.",
            )
            .await?;
        }
        callback_data::SEARCH_CATEGORY => {
            dialogue.update(SearchDialogueState::AwaitingCategory).await?;
            bot.send_message(
                chat_id,
                "🏷 Send me a category (e.g. AI, web3, robotics) to search for.",
            )
            .await?;
        }
        other => {
            warn!(chat_id = %chat_id, data = %other, "Ignoring unknown callback data");
        }
    }

    Ok(())
}

/// Render a listing outcome: results, empty notice, or failure apology
async fn run_listing(
    bot: &Bot,
    chat_id: ChatId,
    config: &AppConfig,
    operation: &str,
    empty_notice: &str,
    outcome: Result<Vec<db::Event>>,
) -> Result<()> {
    match outcome {
        Ok(events) => {
            send_event_results(
                bot,
                chat_id,
                &events,
                empty_notice,
                &config.http.public_base_url,
            )
            .await?;
        }
        Err(e) => {
            error_logging::log_database_error(&e, operation, Some(chat_id.0));
            send_failure_notice(bot, chat_id).await?;
        }
    }

    Ok(())
}
