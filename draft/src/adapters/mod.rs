//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod jobs;
pub mod twitch;

pub use jobs::RandomJobAssigner;
pub use twitch::{TwitchClientImpl, TwitchConfig};
