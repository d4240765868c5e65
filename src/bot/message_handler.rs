//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use sqlx::postgres::PgPool;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::debug;

use crate::ai::QueryInterpreter;
use crate::config::AppConfig;
use crate::db::{self, Event};
use crate::dialogue::{SearchDialogue, SearchDialogueState};
use crate::errors::error_logging;

use super::command_handlers::{handle_about_command, handle_ask_command, handle_start_command};
use super::{send_event_results, send_failure_notice};

/// Which search a pending dialogue state is waiting to answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Location,
    Category,
}

/// Map a chat's dialogue state to the search its next message answers.
///
/// Idle chats (explicit or absent entry) have nothing pending; their free
/// text triggers no query and no session mutation.
pub fn pending_search_kind(state: Option<&SearchDialogueState>) -> Option<SearchKind> {
    match state {
        Some(SearchDialogueState::AwaitingLocation) => Some(SearchKind::Location),
        Some(SearchDialogueState::AwaitingCategory) => Some(SearchKind::Category),
        Some(SearchDialogueState::Idle) | None => None,
    }
}

/// Consume a pending search question with the user's answer.
///
/// The pending entry is cleared before the query is issued, so the chat
/// leaves the waiting state whatever the query outcome is; a failed query
/// can never strand a chat mid-conversation.
pub async fn consume_pending_search(
    pool: &PgPool,
    dialogue: &SearchDialogue,
    kind: SearchKind,
    answer: &str,
) -> Result<Vec<Event>> {
    dialogue.exit().await?;

    match kind {
        SearchKind::Location => db::list_by_location(pool, answer).await,
        SearchKind::Category => db::list_by_category(pool, answer).await,
    }
}

/// Handle incoming text messages.
///
/// Any pending search question is checked first: the next text message from
/// a waiting chat answers it, regardless of content. Only then are commands
/// dispatched. Free text from an idle chat is a no-op.
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    pool: Arc<PgPool>,
    dialogue: SearchDialogue,
    interpreter: Arc<QueryInterpreter>,
    config: Arc<AppConfig>,
) -> Result<()> {
    let Some(text) = msg.text() else {
        debug!(chat_id = %msg.chat.id, "Ignoring non-text message");
        return Ok(());
    };

    debug!(chat_id = %msg.chat.id, message_length = text.len(), "Received text message");

    // Check dialogue state first
    let dialogue_state = dialogue.get().await?;
    if let Some(kind) = pending_search_kind(dialogue_state.as_ref()) {
        return handle_search_reply(&bot, &msg, text, pool, dialogue, config, kind).await;
    }

    if text == "/start" {
        handle_start_command(&bot, &msg).await?;
    } else if text == "/about" {
        handle_about_command(&bot, &msg).await?;
    } else if text == "/ask" || text.starts_with("/ask ") {
        let query = text.strip_prefix("/ask").unwrap_or_default();
        handle_ask_command(&bot, &msg, query, pool, interpreter, config).await?;
    } else {
        // Free text with no pending question: nothing for this component to do
        debug!(chat_id = %msg.chat.id, "No pending search question, ignoring free text");
    }

    Ok(())
}

/// Answer a pending search question and report the outcome to the user
async fn handle_search_reply(
    bot: &Bot,
    msg: &Message,
    answer: &str,
    pool: Arc<PgPool>,
    dialogue: SearchDialogue,
    config: Arc<AppConfig>,
    kind: SearchKind,
) -> Result<()> {
    let answer = answer.trim();
    debug!(chat_id = %msg.chat.id, kind = ?kind, "Handling search reply");

    let (operation, empty_notice) = match kind {
        SearchKind::Location => (
            "list_by_location",
            format!("📭 No events found around \"{}\".", answer),
        ),
        SearchKind::Category => (
            "list_by_category",
            format!("📭 No events found in the \"{}\" category.", answer),
        ),
    };

    match consume_pending_search(&pool, &dialogue, kind, answer).await {
        Ok(events) => {
            send_event_results(
                bot,
                msg.chat.id,
                &events,
                &empty_notice,
                &config.http.public_base_url,
            )
            .await?;
        }
        Err(e) => {
            error_logging::log_database_error(&e, operation, Some(msg.chat.id.0));
            send_failure_notice(bot, msg.chat.id).await?;
        }
    }

    Ok(())
}
