use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use viewer_draft::{
    EnrollmentCheck, Exclusions, JobConstraint, SelectionMode, SelectionRequest, TwitchConfig,
    DEFAULT_RETRY_BUDGET,
};

#[derive(Clone, Debug)]
pub struct Config {
    pub channel: String,
    pub mode: SelectionMode,
    pub job: JobConstraint,
    pub retry_budget: u32,
    /// Appended to drafted names, e.g. " Kerman"
    pub name_suffix: Option<String>,
    pub enrollment_check: EnrollmentCheck,
    pub bots: Vec<String>,
    pub drafted: Vec<String>,
    pub drawn: Vec<String>,
    pub enrolled: Vec<String>,
    pub twitch: TwitchConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = TwitchConfig::default();

        Ok(Self {
            channel: env::var("DRAFT_CHANNEL")
                .unwrap_or_default()
                .trim()
                .to_lowercase(),
            mode: parse_var("DRAFT_MODE", env::var("DRAFT_MODE").ok(), "draft")?,
            job: parse_var("DRAFT_JOB", env::var("DRAFT_JOB").ok(), "")?,
            retry_budget: match env::var("DRAFT_RETRY_BUDGET") {
                Ok(v) => v.parse().context("DRAFT_RETRY_BUDGET must be a number")?,
                Err(_) => DEFAULT_RETRY_BUDGET,
            },
            name_suffix: env::var("DRAFT_NAME_SUFFIX").ok().filter(|s| !s.is_empty()),
            enrollment_check: parse_var(
                "DRAFT_ENROLLMENT_CHECK",
                env::var("DRAFT_ENROLLMENT_CHECK").ok(),
                "prefilter",
            )?,
            bots: list_var("DRAFT_BOTS"),
            drafted: list_var("DRAFT_DRAFTED"),
            drawn: list_var("DRAFT_DRAWN"),
            enrolled: list_var("DRAFT_ENROLLED"),
            twitch: TwitchConfig {
                tmi_url: env::var("TWITCH_TMI_URL").unwrap_or(defaults.tmi_url),
                helix_url: env::var("TWITCH_HELIX_URL").unwrap_or(defaults.helix_url),
                client_id: env::var("TWITCH_CLIENT_ID").ok(),
                oauth_token: env::var("TWITCH_OAUTH_TOKEN").ok(),
                timeout: match env::var("DRAFT_HTTP_TIMEOUT_SECS") {
                    Ok(v) => Duration::from_secs(
                        v.parse().context("DRAFT_HTTP_TIMEOUT_SECS must be a number")?,
                    ),
                    Err(_) => defaults.timeout,
                },
            },
        })
    }

    /// Build the selection request described by this configuration
    pub fn request(&self) -> SelectionRequest {
        let exclusions = Exclusions::new()
            .with_bots(&self.bots)
            .with_drafted(&self.drafted)
            .with_drawn(&self.drawn)
            .with_enrolled(&self.enrolled);

        let mut request = SelectionRequest::new(self.channel.clone(), self.mode)
            .with_job_constraint(self.job.clone())
            .with_retry_budget(self.retry_budget)
            .with_enrollment_check(self.enrollment_check)
            .with_exclusions(exclusions);
        if let Some(suffix) = &self.name_suffix {
            request = request.with_name_suffix(suffix.clone());
        }
        request
    }
}

/// Parse a variable's raw value, falling back to `default` when unset
fn parse_var<T>(key: &str, raw: Option<String>, default: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    raw.as_deref()
        .unwrap_or(default)
        .parse()
        .map_err(|e: String| anyhow!(e))
        .with_context(|| format!("Invalid {}", key))
}

/// Comma-separated list variable; missing means empty
fn list_var(key: &str) -> Vec<String> {
    env::var(key)
        .map(|v| parse_list(&v))
        .unwrap_or_default()
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_skips_blanks() {
        assert_eq!(
            parse_list(" nightbot, ,streamelements,"),
            vec!["nightbot", "streamelements"]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn enrollment_check_rejects_unknown_values() {
        let parsed: EnrollmentCheck = parse_var(
            "DRAFT_ENROLLMENT_CHECK",
            Some("after_constraint".to_string()),
            "prefilter",
        )
        .unwrap();
        assert_eq!(parsed, EnrollmentCheck::AfterConstraint);

        let unset: EnrollmentCheck =
            parse_var("DRAFT_ENROLLMENT_CHECK", None, "prefilter").unwrap();
        assert_eq!(unset, EnrollmentCheck::Prefilter);

        let typo = parse_var::<EnrollmentCheck>(
            "DRAFT_ENROLLMENT_CHECK",
            Some("befor_constraint".to_string()),
            "prefilter",
        );
        let message = format!("{:#}", typo.unwrap_err());
        assert!(message.contains("DRAFT_ENROLLMENT_CHECK"));
        assert!(message.contains("befor_constraint"));
    }

    #[test]
    fn mode_defaults_to_draft() {
        let mode: SelectionMode = parse_var("DRAFT_MODE", None, "draft").unwrap();
        assert_eq!(mode, SelectionMode::Draft);
        assert!(parse_var::<SelectionMode>("DRAFT_MODE", Some("raffle".to_string()), "draft")
            .is_err());
    }

    #[test]
    fn request_carries_exclusions_and_suffix() {
        let config = Config {
            channel: "somechannel".to_string(),
            mode: SelectionMode::Draft,
            job: JobConstraint::Any,
            retry_budget: 10,
            name_suffix: Some(" Kerman".to_string()),
            enrollment_check: EnrollmentCheck::AfterConstraint,
            bots: vec!["NightBot".to_string()],
            drafted: vec!["jeb".to_string()],
            drawn: vec![],
            enrolled: vec!["Bill Kerman".to_string()],
            twitch: TwitchConfig::default(),
        };

        let request = config.request();

        assert_eq!(request.channel, "somechannel");
        assert_eq!(request.retry_budget, 10);
        assert_eq!(request.name_suffix.as_deref(), Some(" Kerman"));
        assert_eq!(request.enrollment_check, EnrollmentCheck::AfterConstraint);
        assert!(request.exclusions.bots.contains("nightbot"));
        assert!(request.exclusions.drafted.contains("jeb"));
        assert!(request.exclusions.enrolled.contains("bill kerman"));
    }
}
