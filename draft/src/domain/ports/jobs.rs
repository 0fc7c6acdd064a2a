//! Job assignment port trait
//!
//! In Draft mode every accepted viewer gets a job. The host decides how jobs
//! are derived; the selector only evaluates the job constraint against it.

use crate::domain::entities::Candidate;

/// Derives the job a resolved candidate would take on
pub trait JobAssigner: Send + Sync {
    fn assign(&self, candidate: &Candidate) -> String;

    /// Every job `assign` can return, when that set is fixed
    ///
    /// `None` means jobs are open-ended and a role constraint can only be
    /// checked against resolved candidates.
    fn known_jobs(&self) -> Option<&[String]> {
        None
    }
}
