//! Error types for the viewer draft core
//!
//! This module defines error types for each layer:
//! - `TwitchError`: Twitch API client errors
//! - `SelectionError`: Selection workflow failures reported to the caller

use thiserror::Error;

/// Twitch API client errors
#[derive(Debug, Error)]
pub enum TwitchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid client id or token")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// Reasons a selection call can fail
///
/// Every variant is terminal for the call that produced it. The `Display`
/// text is the human-readable reason handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please specify a channel!")]
    NoChannel,

    #[error("No viewers in chat.")]
    EmptyRoster,

    #[error("No more valid users.")]
    NoEligibleCandidate,

    #[error("No more valid users after {attempts} attempts.")]
    PoolExhausted { attempts: u32 },

    #[error("Too many attempts ({attempts}).")]
    RetryBudgetExhausted { attempts: u32 },

    /// The role constraint names a job the assigner never hands out
    #[error("Nobody can be assigned the job {0}.")]
    UnknownJob(String),

    #[error("Web error: {0}")]
    Transport(String),

    #[error("Selection cancelled.")]
    Cancelled,
}

impl From<TwitchError> for SelectionError {
    fn from(e: TwitchError) -> Self {
        SelectionError::Transport(e.to_string())
    }
}

impl SelectionError {
    /// Short machine-friendly tag for logs and structured output
    pub fn kind(&self) -> &'static str {
        match self {
            SelectionError::NoChannel => "no_channel",
            SelectionError::EmptyRoster => "empty_roster",
            SelectionError::NoEligibleCandidate => "no_eligible_candidate",
            SelectionError::PoolExhausted { .. } => "pool_exhausted",
            SelectionError::RetryBudgetExhausted { .. } => "retry_budget_exhausted",
            SelectionError::UnknownJob(_) => "unknown_job",
            SelectionError::Transport(_) => "transport_error",
            SelectionError::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twitch_error_becomes_transport_with_detail() {
        let err: SelectionError = TwitchError::Api {
            status: 503,
            message: "upstream down".to_string(),
        }
        .into();

        assert_eq!(
            err,
            SelectionError::Transport("API error: 503 - upstream down".to_string())
        );
        assert_eq!(err.to_string(), "Web error: API error: 503 - upstream down");
    }

    #[test]
    fn reasons_match_host_messages() {
        assert_eq!(SelectionError::NoChannel.to_string(), "Please specify a channel!");
        assert_eq!(
            SelectionError::NoEligibleCandidate.to_string(),
            "No more valid users."
        );
        assert!(SelectionError::RetryBudgetExhausted { attempts: 25 }
            .to_string()
            .starts_with("Too many attempts"));
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            SelectionError::NoChannel.kind(),
            SelectionError::EmptyRoster.kind(),
            SelectionError::NoEligibleCandidate.kind(),
            SelectionError::PoolExhausted { attempts: 1 }.kind(),
            SelectionError::RetryBudgetExhausted { attempts: 1 }.kind(),
            SelectionError::UnknownJob(String::new()).kind(),
            SelectionError::Transport(String::new()).kind(),
            SelectionError::Cancelled.kind(),
        ];
        let unique: std::collections::HashSet<_> = kinds.iter().collect();
        assert_eq!(unique.len(), kinds.len());
    }
}
