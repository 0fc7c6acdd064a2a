//! Random job assignment
//!
//! Picks a job uniformly from a fixed list, like a freshly generated crew
//! member receiving a random trait.

use rand::Rng;

use crate::domain::entities::Candidate;
use crate::domain::ports::JobAssigner;

/// Jobs handed out when the caller does not supply its own list
pub const DEFAULT_JOBS: [&str; 3] = ["Pilot", "Engineer", "Scientist"];

pub struct RandomJobAssigner {
    jobs: Vec<String>,
}

impl RandomJobAssigner {
    /// Use `jobs` as the pool; an empty list falls back to `DEFAULT_JOBS`
    pub fn new<S: Into<String>>(jobs: impl IntoIterator<Item = S>) -> Self {
        let jobs: Vec<String> = jobs.into_iter().map(Into::into).collect();
        if jobs.is_empty() {
            Self::default()
        } else {
            Self { jobs }
        }
    }
}

impl Default for RandomJobAssigner {
    fn default() -> Self {
        Self {
            jobs: DEFAULT_JOBS.iter().map(|j| j.to_string()).collect(),
        }
    }
}

impl JobAssigner for RandomJobAssigner {
    fn assign(&self, _candidate: &Candidate) -> String {
        let index = rand::thread_rng().gen_range(0..self.jobs.len());
        self.jobs[index].clone()
    }

    fn known_jobs(&self) -> Option<&[String]> {
        Some(&self.jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Candidate {
        Candidate {
            handle: "valfan".to_string(),
            display_name: "ValFan".to_string(),
            job: None,
        }
    }

    #[test]
    fn assigns_from_default_jobs() {
        let assigner = RandomJobAssigner::default();
        for _ in 0..50 {
            let job = assigner.assign(&candidate());
            assert!(DEFAULT_JOBS.contains(&job.as_str()));
        }
    }

    #[test]
    fn custom_list_is_used() {
        let assigner = RandomJobAssigner::new(["Tourist"]);
        assert_eq!(assigner.assign(&candidate()), "Tourist");
    }

    #[test]
    fn empty_list_falls_back_to_defaults() {
        let assigner = RandomJobAssigner::new(Vec::<String>::new());
        assert_eq!(assigner.known_jobs().map(<[String]>::len), Some(DEFAULT_JOBS.len()));
    }
}
