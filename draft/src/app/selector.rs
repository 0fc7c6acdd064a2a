//! Viewer selector
//!
//! Fetches a channel's roster, removes excluded handles, then samples and
//! resolves candidates until one is accepted.
//!
//! Draft flow:
//! 1. Reject a blank channel before any request is made
//! 2. Fetch the roster (one request, never retried)
//! 3. Subtract bots, prior selections, enrolled names and obscene handles
//! 4. Sample without replacement, resolving each pick, until a candidate
//!    satisfies the job constraint, the pool runs dry, or the retry budget
//!    is spent
//!
//! A transport error on any request ends the call.

use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;

use crate::adapters::RandomJobAssigner;
use crate::app::{CancellationToken, ObscenityFilter, RosterFetcher};
use crate::domain::entities::{
    Candidate, EnrollmentCheck, JobConstraint, Roster, Selection, SelectionMode,
    SelectionRequest,
};
use crate::domain::ports::{ChatPlatform, JobAssigner};
use crate::error::SelectionError;

/// Why a handle or candidate was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Bot,
    PriorSelection,
    Enrolled,
    Obscene,
    JobConstraint,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Bot => write!(f, "bot"),
            Rejection::PriorSelection => write!(f, "prior_selection"),
            Rejection::Enrolled => write!(f, "enrolled"),
            Rejection::Obscene => write!(f, "obscene"),
            Rejection::JobConstraint => write!(f, "job_constraint"),
        }
    }
}

/// Service that draws one viewer per call
pub struct Selector<CP, JA = RandomJobAssigner>
where
    CP: ChatPlatform,
    JA: JobAssigner,
{
    platform: Arc<CP>,
    roster: RosterFetcher<CP>,
    jobs: Arc<JA>,
    filter: Arc<ObscenityFilter>,
}

impl<CP> Selector<CP, RandomJobAssigner>
where
    CP: ChatPlatform,
{
    /// Selector with random job assignment and the built-in obscenity rules
    pub fn with_defaults(platform: Arc<CP>) -> Self {
        Self::new(
            platform,
            Arc::new(RandomJobAssigner::default()),
            ObscenityFilter::builtin(),
        )
    }
}

impl<CP, JA> Selector<CP, JA>
where
    CP: ChatPlatform,
    JA: JobAssigner,
{
    pub fn new(platform: Arc<CP>, jobs: Arc<JA>, filter: Arc<ObscenityFilter>) -> Self {
        Self {
            roster: RosterFetcher::new(platform.clone()),
            platform,
            jobs,
            filter,
        }
    }

    /// Run one selection to completion
    pub async fn select(&self, request: &SelectionRequest) -> Result<Selection, SelectionError> {
        self.select_cancellable(request, &CancellationToken::new())
            .await
    }

    /// Run one selection, stopping between requests once `cancel` fires
    pub async fn select_cancellable(
        &self,
        request: &SelectionRequest,
        cancel: &CancellationToken,
    ) -> Result<Selection, SelectionError> {
        let result = self.run(request, cancel).await;

        match &result {
            Ok(selection) => tracing::info!(
                channel = %request.channel,
                mode = %selection.mode,
                handle = %selection.handle,
                name = %selection.name,
                attempts = selection.attempts,
                "Selection succeeded"
            ),
            Err(e) => tracing::info!(
                channel = %request.channel,
                mode = %request.mode,
                kind = e.kind(),
                reason = %e,
                "Selection failed"
            ),
        }

        result
    }

    async fn run(
        &self,
        request: &SelectionRequest,
        cancel: &CancellationToken,
    ) -> Result<Selection, SelectionError> {
        let channel = request.channel.trim();
        if channel.is_empty() {
            return Err(SelectionError::NoChannel);
        }
        if cancel.is_cancelled() {
            return Err(SelectionError::Cancelled);
        }

        let roster = self.roster.fetch(channel).await?;
        if roster.is_empty() {
            return Err(SelectionError::EmptyRoster);
        }

        let pool = candidate_pool(&roster, request, &self.filter);
        tracing::debug!(
            channel,
            roster = roster.len(),
            eligible = pool.len(),
            "Filtered roster"
        );
        if pool.is_empty() {
            return Err(SelectionError::NoEligibleCandidate);
        }

        match request.mode {
            SelectionMode::Drawing => self.draw(pool, request, cancel).await,
            SelectionMode::Draft => self.draft(pool, request, cancel).await,
        }
    }

    /// Drawing: the first resolved pick wins
    async fn draw(
        &self,
        pool: Vec<String>,
        request: &SelectionRequest,
        cancel: &CancellationToken,
    ) -> Result<Selection, SelectionError> {
        if cancel.is_cancelled() {
            return Err(SelectionError::Cancelled);
        }

        let handle = pool[pick_index(pool.len())].clone();
        let candidate = self.resolve(handle, request).await?;

        Ok(Selection {
            mode: SelectionMode::Drawing,
            name: candidate.display_name.clone(),
            handle: candidate.handle,
            display_name: candidate.display_name,
            job: None,
            attempts: 1,
        })
    }

    /// Draft: sample without replacement until the job constraint is met
    async fn draft(
        &self,
        mut pool: Vec<String>,
        request: &SelectionRequest,
        cancel: &CancellationToken,
    ) -> Result<Selection, SelectionError> {
        if let JobConstraint::Role(role) = &request.job_constraint {
            if let Some(jobs) = self.jobs.known_jobs() {
                if !jobs.iter().any(|job| job.eq_ignore_ascii_case(role)) {
                    tracing::debug!(%role, ?jobs, "Role is never assigned");
                    return Err(SelectionError::UnknownJob(role.clone()));
                }
            }
        }

        let budget = request.effective_budget();
        let mut attempts = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(SelectionError::Cancelled);
            }
            if attempts >= budget {
                return Err(SelectionError::RetryBudgetExhausted { attempts });
            }
            attempts += 1;

            if pool.is_empty() {
                return Err(SelectionError::PoolExhausted { attempts });
            }

            let index = pick_index(pool.len());
            let mut candidate = self.resolve(pool[index].clone(), request).await?;
            candidate.job = Some(self.jobs.assign(&candidate));

            match rejection(&candidate, request) {
                None => {
                    return Ok(Selection {
                        mode: SelectionMode::Draft,
                        name: request.host_name(&candidate.display_name),
                        handle: candidate.handle,
                        display_name: candidate.display_name,
                        job: candidate.job,
                        attempts,
                    });
                }
                Some(reason) => {
                    tracing::debug!(
                        handle = %candidate.handle,
                        job = candidate.job.as_deref().unwrap_or_default(),
                        %reason,
                        attempt = attempts,
                        "Candidate rejected"
                    );
                    pool.swap_remove(index);
                }
            }
        }
    }

    async fn resolve(
        &self,
        handle: String,
        request: &SelectionRequest,
    ) -> Result<Candidate, SelectionError> {
        let user = self.platform.resolve_user(&handle).await.map_err(|e| {
            tracing::warn!(
                channel = %request.channel,
                handle = %handle,
                error = %e,
                "Failed to resolve display name"
            );
            SelectionError::from(e)
        })?;

        Ok(Candidate {
            handle,
            display_name: user.display_name,
            job: None,
        })
    }
}

fn pick_index(len: usize) -> usize {
    rand::thread_rng().gen_range(0..len)
}

/// Handles eligible for sampling: the roster minus every exclusion
///
/// Exclusions apply to every occurrence of a handle. The result is
/// deduplicated in first-seen order so each distinct handle is equally likely
/// to be drawn.
pub fn candidate_pool(
    roster: &Roster,
    request: &SelectionRequest,
    filter: &ObscenityFilter,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut pool = Vec::new();

    for handle in roster {
        if !seen.insert(handle.as_str()) {
            continue;
        }
        match exclusion(handle, request, filter) {
            Some(Rejection::Obscene) => tracing::debug!(
                %handle,
                reason = %Rejection::Obscene,
                rule = filter.matching_rule(handle).unwrap_or_default(),
                "Excluded from pool"
            ),
            Some(reason) => tracing::debug!(%handle, %reason, "Excluded from pool"),
            None => pool.push(handle.clone()),
        }
    }

    pool
}

fn exclusion(
    handle: &str,
    request: &SelectionRequest,
    filter: &ObscenityFilter,
) -> Option<Rejection> {
    let exclusions = &request.exclusions;

    if exclusions.bots.contains(handle) {
        Some(Rejection::Bot)
    } else if exclusions.prior_selections(request.mode).contains(handle) {
        Some(Rejection::PriorSelection)
    } else if request.mode == SelectionMode::Draft
        && request.enrollment_check == EnrollmentCheck::Prefilter
        && exclusions.enrolled.contains(&request.host_name(handle))
    {
        Some(Rejection::Enrolled)
    } else if filter.is_match(handle) {
        Some(Rejection::Obscene)
    } else {
        None
    }
}

/// Post-resolution checks for Draft mode, in the configured order
fn rejection(candidate: &Candidate, request: &SelectionRequest) -> Option<Rejection> {
    let collides = || {
        request
            .exclusions
            .enrolled
            .contains(&request.host_name(&candidate.display_name))
    };
    let satisfies = || request.job_constraint.is_satisfied_by(candidate);

    match request.enrollment_check {
        EnrollmentCheck::Prefilter => (!satisfies()).then_some(Rejection::JobConstraint),
        EnrollmentCheck::BeforeConstraint => {
            if collides() {
                Some(Rejection::Enrolled)
            } else if !satisfies() {
                Some(Rejection::JobConstraint)
            } else {
                None
            }
        }
        EnrollmentCheck::AfterConstraint => {
            if !satisfies() {
                Some(Rejection::JobConstraint)
            } else if collides() {
                Some(Rejection::Enrolled)
            } else {
                None
            }
        }
    }
}
