//! Chat platform port trait
//!
//! Defines the two network calls the selection workflow makes against the
//! chat platform: listing a channel's chatters and resolving a display name.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entities::{ChatterRole, Roster};
use crate::error::TwitchError;

/// Helper to deserialize a list of handles, treating null as empty and
/// skipping elements that are not strings
fn deserialize_handles<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match v {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Chatters of a channel, grouped by role category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chatters {
    #[serde(default, deserialize_with = "deserialize_handles")]
    pub moderators: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_handles")]
    pub staff: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_handles")]
    pub admins: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_handles")]
    pub global_mods: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_handles")]
    pub viewers: Vec<String>,
}

impl Chatters {
    pub fn role(&self, role: ChatterRole) -> &[String] {
        match role {
            ChatterRole::Moderators => &self.moderators,
            ChatterRole::Staff => &self.staff,
            ChatterRole::Admins => &self.admins,
            ChatterRole::GlobalMods => &self.global_mods,
            ChatterRole::Viewers => &self.viewers,
        }
    }

    pub fn total(&self) -> usize {
        ChatterRole::ALL.iter().map(|r| self.role(*r).len()).sum()
    }
}

impl From<Chatters> for Roster {
    /// Concatenates the categories in `ChatterRole::ALL` order without
    /// deduplicating
    fn from(chatters: Chatters) -> Self {
        let mut roster = Roster::default();
        for role in ChatterRole::ALL {
            roster.extend(chatters.role(role).iter().cloned());
        }
        roster
    }
}

/// Chat platform user as returned by a login lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitchUser {
    pub display_name: String,
}

/// Port for the chat platform API
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// List everyone currently in `channel`'s chat
    async fn fetch_chatters(&self, channel: &str) -> Result<Chatters, TwitchError>;

    /// Resolve a lowercase login to the user's canonical display name
    async fn resolve_user(&self, login: &str) -> Result<TwitchUser, TwitchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_categories_are_empty() {
        let chatters: Chatters =
            serde_json::from_str(r#"{"moderators": ["mod1"], "staff": null}"#).unwrap();

        assert_eq!(chatters.moderators, vec!["mod1"]);
        assert!(chatters.staff.is_empty());
        assert!(chatters.viewers.is_empty());
        assert_eq!(chatters.total(), 1);
    }

    #[test]
    fn non_string_elements_are_skipped() {
        let chatters: Chatters =
            serde_json::from_str(r#"{"viewers": ["a", 3, null, "b", {"x": 1}]}"#).unwrap();

        assert_eq!(chatters.viewers, vec!["a", "b"]);
    }

    #[test]
    fn roster_concatenates_in_role_order() {
        let chatters = Chatters {
            moderators: vec!["mod1".to_string()],
            staff: vec!["staff1".to_string()],
            admins: vec![],
            global_mods: vec!["gm1".to_string()],
            viewers: vec!["viewer1".to_string(), "mod1".to_string()],
        };

        let roster = Roster::from(chatters);

        assert_eq!(
            roster.handles(),
            &["mod1", "staff1", "gm1", "viewer1", "mod1"]
        );
    }
}
