//! Search dialogue module for handling conversation state with users.
//!
//! A chat is either idle or waiting for exactly one follow-up answer. The
//! two search menu actions put the chat into a waiting state; the next text
//! message from the same chat consumes it. A newer selection overwrites any
//! prior pending state (latest intent wins), and entries carry no expiry.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Represents the conversation state for the multi-turn search flows
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchDialogueState {
    /// No follow-up question outstanding for this chat
    #[default]
    Idle,
    /// The bot asked for a location and expects the next message to answer it
    AwaitingLocation,
    /// The bot asked for a category and expects the next message to answer it
    AwaitingCategory,
}

/// Type alias for our search dialogue
pub type SearchDialogue = Dialogue<SearchDialogueState, InMemStorage<SearchDialogueState>>;
