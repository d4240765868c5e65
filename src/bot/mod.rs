//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `command_handlers`: Handles the /start, /about and /ask commands
//! - `message_handler`: Handles incoming text messages and the search dialogue
//! - `ui_builder`: Creates keyboards and formats event messages

pub mod callback_handler;
pub mod command_handlers;
pub mod message_handler;
pub mod ui_builder;

use anyhow::Result;
use teloxide::prelude::*;

use crate::db::Event;
use crate::errors::error_logging;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

// Re-export UI helpers that are used across handler modules
pub use ui_builder::{create_main_menu_keyboard, format_event_details};

/// Send a rendered message per event, or a notice when nothing matched.
///
/// Messages go out in order within the handler turn; an empty result set is
/// a normal outcome, not an error.
pub async fn send_event_results(
    bot: &Bot,
    chat_id: ChatId,
    events: &[Event],
    empty_notice: &str,
    public_base_url: &str,
) -> Result<()> {
    if events.is_empty() {
        bot.send_message(chat_id, empty_notice).await?;
        return Ok(());
    }

    for event in events {
        bot.send_message(chat_id, format_event_details(event, public_base_url))
            .await?;
    }

    Ok(())
}

/// Generic apology sent when a query or external call fails.
///
/// If even the apology cannot be delivered, the delivery failure is logged
/// with its chat context before propagating.
pub async fn send_failure_notice(bot: &Bot, chat_id: ChatId) -> Result<()> {
    if let Err(e) = bot
        .send_message(
            chat_id,
            "😔 Sorry, something went wrong while fetching events. Please try again.",
        )
        .await
    {
        error_logging::log_telegram_error(&e, "send_failure_notice", chat_id.0);
        return Err(e.into());
    }
    Ok(())
}
