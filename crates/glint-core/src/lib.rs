//! Core Glint library (conversation store, dispatcher, Gemini provider, config).

pub mod chat;
pub mod config;
pub mod providers;
pub mod session;
