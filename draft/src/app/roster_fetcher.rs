//! Roster fetcher
//!
//! Turns a channel name into the flat list of handles currently in chat.

use std::sync::Arc;

use crate::domain::entities::{ChatterRole, Roster};
use crate::domain::ports::{ChatPlatform, Chatters};
use crate::error::TwitchError;

/// Fetches and flattens a channel's chatters
pub struct RosterFetcher<CP>
where
    CP: ChatPlatform,
{
    platform: Arc<CP>,
}

impl<CP> RosterFetcher<CP>
where
    CP: ChatPlatform,
{
    pub fn new(platform: Arc<CP>) -> Self {
        Self { platform }
    }

    /// Fetch the roster for `channel`
    ///
    /// Issues exactly one request and never retries. An empty chat is a valid,
    /// empty roster.
    pub async fn fetch(&self, channel: &str) -> Result<Roster, TwitchError> {
        let chatters = self.platform.fetch_chatters(channel).await.map_err(|e| {
            tracing::warn!(channel, error = %e, "Failed to fetch chatters");
            e
        })?;

        tracing::debug!(
            channel,
            total = chatters.total(),
            by_role = %role_counts(&chatters),
            "Fetched chatters"
        );

        Ok(Roster::from(chatters))
    }
}

/// Per-category counts in extraction order, e.g. `moderators=1 staff=0 ...`
fn role_counts(chatters: &Chatters) -> String {
    ChatterRole::ALL
        .iter()
        .map(|role| format!("{}={}", role.key(), chatters.role(*role).len()))
        .collect::<Vec<_>>()
        .join(" ")
}
