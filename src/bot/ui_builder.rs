//! UI Builder module for creating keyboards and formatting event messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::db::Event;

/// Callback data for the main menu actions
pub mod callback_data {
    pub const ACTIVE_HACKATHONS: &str = "active_hackathons";
    pub const PAST_EVENTS: &str = "past_events";
    pub const SEARCH_LOCATION: &str = "search_location";
    pub const SEARCH_CATEGORY: &str = "search_category";
    pub const POPULAR_EVENTS: &str = "popular_events";
}

/// Create the inline keyboard shown with the /start welcome message
pub fn create_main_menu_keyboard() -> InlineKeyboardMarkup {
    let buttons = vec![
        vec![InlineKeyboardButton::callback(
            "🚀 Active Hackathons",
            callback_data::ACTIVE_HACKATHONS,
        )],
        vec![InlineKeyboardButton::callback(
            "🗓 Past Events",
            callback_data::PAST_EVENTS,
        )],
        vec![InlineKeyboardButton::callback(
            "📍 Search by Location",
            callback_data::SEARCH_LOCATION,
        )],
        vec![InlineKeyboardButton::callback(
            "🏷 Search by Category",
            callback_data::SEARCH_CATEGORY,
        )],
        vec![InlineKeyboardButton::callback(
            "🔥 Most Popular Events",
            callback_data::POPULAR_EVENTS,
        )],
    ];

    InlineKeyboardMarkup::new(buttons)
}

/// Format one event as a display block.
///
/// Pure formatting only: no network or state access, and never fails for a
/// well-formed event. Optional fields that are absent simply omit their line.
pub fn format_event_details(event: &Event, public_base_url: &str) -> String {
    let mut lines = vec![
        format!("🏆 **{}**", event.title),
        String::new(),
        event.description.clone(),
        String::new(),
        format!("📍 Location: {}", event.location),
        format!(
            "🗓 Starts: {}",
            event.start_date.format("%d %b %Y, %H:%M UTC")
        ),
        format!("⏳ Duration: {} hours", event.duration_hours),
    ];

    if let Some(team_size) = event.team_size {
        lines.push(format!("👥 Team size: up to {}", team_size));
    }

    let price_line = if event.is_free {
        "💰 Entry: Free".to_string()
    } else {
        match event.price {
            Some(price) => format!("💰 Entry: ${:.2}", price),
            None => "💰 Entry: Paid".to_string(),
        }
    };
    lines.push(price_line);

    lines.push(format!(
        "📝 Registration: {} – {}",
        event.registration_start.format("%d %b %Y"),
        event.registration_end.format("%d %b %Y")
    ));

    if let Some(name) = &event.organizer_name {
        lines.push(format!("🧑‍💼 Organizer: {}", name));
    }
    if let Some(email) = &event.organizer_email {
        lines.push(format!("📧 Email: {}", email));
    }
    if let Some(contact) = &event.organizer_contact {
        lines.push(format!("📞 Contact: {}", contact));
    }

    lines.push(format!("🏷 Category: {}", event.category));
    lines.push(format!("❤️ Likes: {}", event.like_count));
    lines.push(format!("🔗 {}", event.detail_url(public_base_url)));

    lines.join("\n")
}
