//! Twitch API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use urlencoding::encode;

use crate::domain::ports::{ChatPlatform, Chatters, TwitchUser};
use crate::error::TwitchError;

pub const DEFAULT_TMI_URL: &str = "https://tmi.twitch.tv";
pub const DEFAULT_HELIX_URL: &str = "https://api.twitch.tv/helix";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the Twitch endpoints
#[derive(Debug, Clone)]
pub struct TwitchConfig {
    /// Base URL of the chatters (TMI) service
    pub tmi_url: String,
    /// Base URL of the users (Helix) API
    pub helix_url: String,
    /// Sent as `Client-ID` and appended to chatters requests
    pub client_id: Option<String>,
    /// OAuth token sent as a bearer token on user lookups
    pub oauth_token: Option<String>,
    pub timeout: Duration,
}

impl Default for TwitchConfig {
    fn default() -> Self {
        Self {
            tmi_url: DEFAULT_TMI_URL.to_string(),
            helix_url: DEFAULT_HELIX_URL.to_string(),
            client_id: None,
            oauth_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Implementation of the chat platform port against Twitch
pub struct TwitchClientImpl {
    http: Client,
    tmi_url: String,
    helix_url: String,
    client_id: Option<String>,
}

impl TwitchClientImpl {
    pub fn new(config: TwitchConfig) -> Result<Self, TwitchError> {
        let mut headers = HeaderMap::new();
        if let Some(client_id) = &config.client_id {
            headers.insert(HeaderName::from_static("client-id"), header_value(client_id)?);
        }
        if let Some(token) = &config.oauth_token {
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", token))?);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            tmi_url: config.tmi_url.trim_end_matches('/').to_string(),
            helix_url: config.helix_url.trim_end_matches('/').to_string(),
            client_id: config.client_id,
        })
    }

    fn chatters_url(&self, channel: &str) -> String {
        let mut url = format!("{}/group/user/{}/chatters", self.tmi_url, encode(channel));
        if let Some(client_id) = &self.client_id {
            url.push_str("?client_id=");
            url.push_str(&encode(client_id));
        }
        url
    }

    fn user_url(&self, login: &str) -> String {
        format!("{}/users?login={}", self.helix_url, encode(login))
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Value, TwitchError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| TwitchError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(TwitchError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(TwitchError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(TwitchError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue, TwitchError> {
    HeaderValue::from_str(value)
        .map_err(|e| TwitchError::InvalidConfig(format!("invalid header value: {}", e)))
}

/// Parse a chatters body, accepting both the nested TMI shape
/// (`{"chatters": {...}}`) and a flat object of categories
pub(crate) fn parse_chatters(body: Value) -> Result<Chatters, TwitchError> {
    let categories = match body {
        Value::Object(mut map) => match map.remove("chatters") {
            Some(nested @ Value::Object(_)) => nested,
            _ => Value::Object(map),
        },
        other => {
            return Err(TwitchError::Deserialization(format!(
                "expected a JSON object, got {}",
                other
            )))
        }
    };

    serde_json::from_value(categories).map_err(|e| TwitchError::Deserialization(e.to_string()))
}

/// Extract the display name from a user lookup body
///
/// Helix nests users under `data`; the legacy API returned the user object
/// at the top level.
pub(crate) fn parse_user(login: &str, body: &Value) -> Result<TwitchUser, TwitchError> {
    if let Some(data) = body.get("data").and_then(Value::as_array) {
        if data.is_empty() {
            return Err(TwitchError::UserNotFound(login.to_string()));
        }
    }

    let display_name = body
        .pointer("/data/0/display_name")
        .or_else(|| body.pointer("/display_name"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            TwitchError::Deserialization(format!("no display_name for user {}", login))
        })?;

    Ok(TwitchUser {
        display_name: display_name.to_string(),
    })
}

#[async_trait]
impl ChatPlatform for TwitchClientImpl {
    async fn fetch_chatters(&self, channel: &str) -> Result<Chatters, TwitchError> {
        let response = self.http.get(self.chatters_url(channel)).send().await?;
        let body = self.handle_response(response).await?;
        parse_chatters(body)
    }

    async fn resolve_user(&self, login: &str) -> Result<TwitchUser, TwitchError> {
        let response = self.http.get(self.user_url(login)).send().await?;
        let body = self.handle_response(response).await?;
        parse_user(login, &body)
    }
}
