//! # HackHub Telegram Bot
//!
//! A Telegram bot and companion HTTP API fronting a PostgreSQL table of
//! hackathon/event listings and an OpenAI-compatible completion service.
//! Chat users browse and search events through commands and inline-keyboard
//! callbacks; the HTTP API exposes the same read queries for other clients.

pub mod ai;
pub mod bot;
pub mod config;
pub mod db;
pub mod dialogue;
pub mod errors;
pub mod http;
