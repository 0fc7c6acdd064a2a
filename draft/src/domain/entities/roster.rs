//! Roster domain entity
//!
//! The flat list of chat participants fetched for a channel.

use serde::{Deserialize, Serialize};

/// Role category a chatter is listed under in the chatters feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatterRole {
    Moderators,
    Staff,
    Admins,
    GlobalMods,
    Viewers,
}

impl ChatterRole {
    /// Extraction order used when flattening a chatters response
    pub const ALL: [ChatterRole; 5] = [
        ChatterRole::Moderators,
        ChatterRole::Staff,
        ChatterRole::Admins,
        ChatterRole::GlobalMods,
        ChatterRole::Viewers,
    ];

    /// JSON key of this category
    pub fn key(&self) -> &'static str {
        match self {
            ChatterRole::Moderators => "moderators",
            ChatterRole::Staff => "staff",
            ChatterRole::Admins => "admins",
            ChatterRole::GlobalMods => "global_mods",
            ChatterRole::Viewers => "viewers",
        }
    }
}

impl std::fmt::Display for ChatterRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Ordered list of raw, lowercase chatter handles
///
/// Duplicates across role categories are kept as delivered by the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    handles: Vec<String>,
}

impl Roster {
    pub fn new(handles: Vec<String>) -> Self {
        Self { handles }
    }

    pub fn handles(&self) -> &[String] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Append one category's handles, preserving their order
    pub fn extend<I>(&mut self, handles: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.handles.extend(handles);
    }
}

impl FromIterator<String> for Roster {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            handles: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.handles.iter()
    }
}
