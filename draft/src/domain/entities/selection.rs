//! Selection request and result types

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::exclusion::Exclusions;

/// Sampling attempts allowed per draft when the caller does not say otherwise
pub const DEFAULT_RETRY_BUDGET: u32 = 25;

/// Kind of selection being made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Pick a viewer that must satisfy a job constraint
    Draft,
    /// Pick any eligible viewer
    Drawing,
}

impl std::fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionMode::Draft => write!(f, "draft"),
            SelectionMode::Drawing => write!(f, "drawing"),
        }
    }
}

impl std::str::FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(SelectionMode::Draft),
            "drawing" | "draw" => Ok(SelectionMode::Drawing),
            _ => Err(format!("Unknown selection mode: {}", s)),
        }
    }
}

/// A sampled handle after display-name resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub handle: String,
    pub display_name: String,
    /// Job assigned to the candidate; only set in Draft mode
    pub job: Option<String>,
}

type CandidatePredicate = dyn Fn(&Candidate) -> bool + Send + Sync;

/// Requirement a resolved candidate must meet to be accepted in Draft mode
#[derive(Clone, Default)]
pub enum JobConstraint {
    /// Any candidate is accepted
    #[default]
    Any,
    /// The assigned job must equal this role (case-insensitive)
    ///
    /// When the assigner lists its jobs, a role outside that list fails the
    /// draft before any candidate is resolved.
    Role(String),
    /// Arbitrary caller-supplied predicate
    Predicate(Arc<CandidatePredicate>),
}

impl JobConstraint {
    pub fn role(name: impl Into<String>) -> Self {
        JobConstraint::Role(name.into())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Candidate) -> bool + Send + Sync + 'static,
    {
        JobConstraint::Predicate(Arc::new(f))
    }

    pub fn is_satisfied_by(&self, candidate: &Candidate) -> bool {
        match self {
            JobConstraint::Any => true,
            JobConstraint::Role(role) => candidate
                .job
                .as_deref()
                .is_some_and(|job| job.eq_ignore_ascii_case(role)),
            JobConstraint::Predicate(f) => f(candidate),
        }
    }
}

impl std::fmt::Debug for JobConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobConstraint::Any => write!(f, "Any"),
            JobConstraint::Role(role) => f.debug_tuple("Role").field(role).finish(),
            JobConstraint::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

impl std::str::FromStr for JobConstraint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("any") {
            Ok(JobConstraint::Any)
        } else {
            Ok(JobConstraint::Role(s.to_string()))
        }
    }
}

/// Where the enrolled-name collision check runs in Draft mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentCheck {
    /// Drop raw handles whose suffixed form is enrolled, before sampling
    #[default]
    Prefilter,
    /// Reject a resolved candidate before evaluating the job constraint
    BeforeConstraint,
    /// Reject a resolved candidate after it satisfied the job constraint
    AfterConstraint,
}

impl std::str::FromStr for EnrollmentCheck {
    type Err = String;

    /// Accepts `prefilter`, `before_constraint` and `after_constraint`,
    /// ignoring case and `_`/`-` separators; blank means the default
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "" | "prefilter" => Ok(EnrollmentCheck::Prefilter),
            "beforeconstraint" => Ok(EnrollmentCheck::BeforeConstraint),
            "afterconstraint" => Ok(EnrollmentCheck::AfterConstraint),
            _ => Err(format!("Unknown enrollment check: {}", s)),
        }
    }
}

/// Everything the selector needs for one call
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    pub channel: String,
    pub mode: SelectionMode,
    /// Ignored in Drawing mode
    pub job_constraint: JobConstraint,
    pub exclusions: Exclusions,
    pub retry_budget: u32,
    /// Appended to drafted display names by the host (e.g. " Kerman")
    pub name_suffix: Option<String>,
    pub enrollment_check: EnrollmentCheck,
}

impl SelectionRequest {
    pub fn new(channel: impl Into<String>, mode: SelectionMode) -> Self {
        Self {
            channel: channel.into(),
            mode,
            job_constraint: JobConstraint::Any,
            exclusions: Exclusions::default(),
            retry_budget: DEFAULT_RETRY_BUDGET,
            name_suffix: None,
            enrollment_check: EnrollmentCheck::default(),
        }
    }

    pub fn draft(channel: impl Into<String>) -> Self {
        Self::new(channel, SelectionMode::Draft)
    }

    pub fn drawing(channel: impl Into<String>) -> Self {
        Self::new(channel, SelectionMode::Drawing)
    }

    pub fn with_job_constraint(mut self, constraint: JobConstraint) -> Self {
        self.job_constraint = constraint;
        self
    }

    pub fn with_exclusions(mut self, exclusions: Exclusions) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_retry_budget(mut self, budget: u32) -> Self {
        self.retry_budget = budget;
        self
    }

    pub fn with_name_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.name_suffix = Some(suffix.into());
        self
    }

    pub fn with_enrollment_check(mut self, check: EnrollmentCheck) -> Self {
        self.enrollment_check = check;
        self
    }

    /// The sampling loop always runs at least once
    pub fn effective_budget(&self) -> u32 {
        self.retry_budget.max(1)
    }

    /// Host-facing name for a display name under this request's suffix
    pub fn host_name(&self, display_name: &str) -> String {
        display_name_with_suffix(display_name, self.name_suffix.as_deref())
    }
}

/// A successful selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub mode: SelectionMode,
    /// Raw lowercase handle; this is what callers record in exclusion lists
    pub handle: String,
    pub display_name: String,
    /// Display name as the host should show it
    pub name: String,
    pub job: Option<String>,
    /// Sampling attempts used, including the accepted one
    pub attempts: u32,
}

impl Selection {
    /// Key/value view handed to host collaborators
    ///
    /// Drawings carry a `winner` entry; drafts carry `name` and `job`.
    pub fn to_record(&self) -> BTreeMap<String, String> {
        let mut record = BTreeMap::new();
        match self.mode {
            SelectionMode::Drawing => {
                record.insert("winner".to_string(), self.name.clone());
            }
            SelectionMode::Draft => {
                record.insert("name".to_string(), self.name.clone());
                if let Some(job) = &self.job {
                    record.insert("job".to_string(), job.clone());
                }
            }
        }
        record
    }
}

/// Append the host suffix to a display name
pub fn display_name_with_suffix(display_name: &str, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => format!("{}{}", display_name, suffix),
        None => display_name.to_string(),
    }
}

/// Convert a host-facing name back to the raw handle it came from
///
/// Strips a trailing `suffix` if present and lowercases the rest, so callers
/// can record manually created entries as already drafted.
pub fn handle_from_name(name: &str, suffix: Option<&str>) -> String {
    let base = suffix
        .filter(|s| !s.is_empty())
        .and_then(|s| name.strip_suffix(s))
        .unwrap_or(name);
    base.trim().to_lowercase()
}
