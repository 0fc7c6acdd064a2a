//! Domain ports (traits)
//!
//! Port traits define interfaces that the selection workflow requires.
//! Adapters provide concrete implementations of these traits.

pub mod jobs;
pub mod twitch;

pub use jobs::JobAssigner;
pub use twitch::{ChatPlatform, Chatters, TwitchUser};
