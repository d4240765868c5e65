use chrono::{TimeZone, Utc};

use hackhub::bot::format_event_details;
use hackhub::db::Event;

const BASE_URL: &str = "https://hackhub.example.com";

fn sample_event() -> Event {
    Event {
        id: 42,
        title: "Rustacean Days".to_string(),
        description: "Two days of systems hacking.".to_string(),
        category: "systems".to_string(),
        location: "Berlin".to_string(),
        start_date: Utc.with_ymd_and_hms(2026, 9, 12, 9, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2026, 9, 13, 18, 0, 0).unwrap(),
        duration_hours: 33,
        registration_start: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
        registration_end: Utc.with_ymd_and_hms(2026, 9, 10, 0, 0, 0).unwrap(),
        is_free: true,
        price: None,
        team_size: Some(4),
        organizer_name: Some("Ferris e.V.".to_string()),
        organizer_email: Some("hello@ferris.example".to_string()),
        organizer_contact: Some("@ferris_events".to_string()),
        like_count: 17,
        approved: true,
        created_at: Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn test_free_event_shows_free_and_no_amount() {
    let event = sample_event();
    let block = format_event_details(&event, BASE_URL);

    assert!(block.contains("Free"));
    assert!(!block.contains('$'));
}

#[test]
fn test_paid_event_shows_currency_prefixed_price() {
    let mut event = sample_event();
    event.is_free = false;
    event.price = Some(25.0);

    let block = format_event_details(&event, BASE_URL);

    assert!(block.contains("$25.00"));
    assert!(!block.contains("Free"));
}

#[test]
fn test_all_core_fields_are_rendered() {
    let event = sample_event();
    let block = format_event_details(&event, BASE_URL);

    assert!(block.contains("Rustacean Days"));
    assert!(block.contains("Two days of systems hacking."));
    assert!(block.contains("Berlin"));
    assert!(block.contains("12 Sep 2026, 09:00 UTC"));
    assert!(block.contains("33 hours"));
    assert!(block.contains("up to 4"));
    assert!(block.contains("systems"));
    assert!(block.contains("Likes: 17"));
    assert!(block.contains("Ferris e.V."));
    assert!(block.contains("hello@ferris.example"));
    assert!(block.contains("@ferris_events"));
}

#[test]
fn test_registration_window_uses_dates_only() {
    let event = sample_event();
    let block = format_event_details(&event, BASE_URL);

    assert!(block.contains("01 Aug 2026 – 10 Sep 2026"));
    // Only the start line carries a time of day
    assert_eq!(block.matches("UTC").count(), 1);
}

#[test]
fn test_missing_optional_fields_omit_their_lines() {
    let mut event = sample_event();
    event.team_size = None;
    event.organizer_name = None;
    event.organizer_email = None;
    event.organizer_contact = None;

    let block = format_event_details(&event, BASE_URL);

    assert!(!block.contains("Team size"));
    assert!(!block.contains("Organizer"));
    assert!(!block.contains("Email"));
    assert!(!block.contains("Contact"));
}

#[test]
fn test_detail_url_is_built_from_identifier() {
    let event = sample_event();
    let block = format_event_details(&event, BASE_URL);

    assert!(block.contains("https://hackhub.example.com/events/42"));

    // Trailing slash on the base URL does not double up
    assert_eq!(
        event.detail_url("https://hackhub.example.com/"),
        "https://hackhub.example.com/events/42"
    );
}
