//! Twitch adapter
//!
//! Implementation of the chat platform port over the Twitch HTTP APIs.

pub mod client;

pub use client::{TwitchClientImpl, TwitchConfig};
