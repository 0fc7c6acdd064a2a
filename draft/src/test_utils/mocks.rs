//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing and that
//! record every call made through them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::app::CancellationToken;
use crate::domain::entities::Candidate;
use crate::domain::ports::{ChatPlatform, Chatters, JobAssigner, TwitchUser};
use crate::error::TwitchError;

// ============================================================================
// Mock Chat Platform
// ============================================================================

/// In-memory chat platform
///
/// Display names default to the uppercased login unless configured with
/// `with_display_name`.
#[derive(Default)]
pub struct MockChatPlatform {
    chatters: Arc<RwLock<Chatters>>,
    display_names: Arc<RwLock<HashMap<String, String>>>,
    chatters_should_fail: Arc<RwLock<bool>>,
    resolution_should_fail: Arc<RwLock<bool>>,
    cancel_on_chatters: Arc<RwLock<Option<CancellationToken>>>,
    cancel_on_resolve: Arc<RwLock<Option<CancellationToken>>>,
    chatters_calls: Arc<RwLock<Vec<String>>>,
    resolve_calls: Arc<RwLock<Vec<String>>>,
}

impl MockChatPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these chatters for every channel
    pub fn with_chatters(self, chatters: Chatters) -> Self {
        *self.chatters.write().unwrap() = chatters;
        self
    }

    /// Serve these handles as plain viewers
    pub fn with_viewers(self, viewers: &[&str]) -> Self {
        self.with_chatters(Chatters {
            viewers: viewers.iter().map(|v| v.to_string()).collect(),
            ..Chatters::default()
        })
    }

    pub fn with_display_name(self, login: &str, display_name: &str) -> Self {
        self.display_names
            .write()
            .unwrap()
            .insert(login.to_string(), display_name.to_string());
        self
    }

    /// Every chatters request fails with a 500
    pub fn failing_chatters(self) -> Self {
        *self.chatters_should_fail.write().unwrap() = true;
        self
    }

    /// Every user lookup fails with a 500
    pub fn failing_resolution(self) -> Self {
        *self.resolution_should_fail.write().unwrap() = true;
        self
    }

    /// Cancel `token` while the chatters request is in flight
    pub fn cancel_on_chatters(self, token: CancellationToken) -> Self {
        *self.cancel_on_chatters.write().unwrap() = Some(token);
        self
    }

    /// Cancel `token` while a user lookup is in flight
    pub fn cancel_on_resolve(self, token: CancellationToken) -> Self {
        *self.cancel_on_resolve.write().unwrap() = Some(token);
        self
    }

    pub fn chatters_calls(&self) -> Vec<String> {
        self.chatters_calls.read().unwrap().clone()
    }

    pub fn resolve_calls(&self) -> Vec<String> {
        self.resolve_calls.read().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.chatters_calls.read().unwrap().len() + self.resolve_calls.read().unwrap().len()
    }
}

#[async_trait]
impl ChatPlatform for MockChatPlatform {
    async fn fetch_chatters(&self, channel: &str) -> Result<Chatters, TwitchError> {
        self.chatters_calls
            .write()
            .unwrap()
            .push(channel.to_string());

        if let Some(token) = self.cancel_on_chatters.read().unwrap().as_ref() {
            token.cancel();
        }

        if *self.chatters_should_fail.read().unwrap() {
            return Err(TwitchError::Api {
                status: 500,
                message: "Mock failure".to_string(),
            });
        }

        Ok(self.chatters.read().unwrap().clone())
    }

    async fn resolve_user(&self, login: &str) -> Result<TwitchUser, TwitchError> {
        self.resolve_calls.write().unwrap().push(login.to_string());

        if let Some(token) = self.cancel_on_resolve.read().unwrap().as_ref() {
            token.cancel();
        }

        if *self.resolution_should_fail.read().unwrap() {
            return Err(TwitchError::Api {
                status: 500,
                message: "Mock failure".to_string(),
            });
        }

        let display_name = self
            .display_names
            .read()
            .unwrap()
            .get(login)
            .cloned()
            .unwrap_or_else(|| login.to_uppercase());

        Ok(TwitchUser { display_name })
    }
}

// ============================================================================
// Fixed Job Assigner
// ============================================================================

/// Assigns the same job to every candidate
pub struct FixedJobAssigner {
    job: String,
}

impl FixedJobAssigner {
    pub fn new(job: &str) -> Self {
        Self {
            job: job.to_string(),
        }
    }
}

impl JobAssigner for FixedJobAssigner {
    fn assign(&self, _candidate: &Candidate) -> String {
        self.job.clone()
    }
}
