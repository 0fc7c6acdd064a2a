//! Domain entities
//!
//! Pure domain models for rosters, exclusion lists and selections.

pub mod exclusion;
pub mod roster;
pub mod selection;

pub use exclusion::{ExclusionSet, Exclusions};
pub use roster::{ChatterRole, Roster};
pub use selection::{
    display_name_with_suffix, handle_from_name, Candidate, EnrollmentCheck, JobConstraint,
    Selection, SelectionMode, SelectionRequest, DEFAULT_RETRY_BUDGET,
};
