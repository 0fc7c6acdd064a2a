//! Test fixtures

use crate::domain::entities::Roster;

/// Roster from literal handles, in order
pub fn roster_of(handles: &[&str]) -> Roster {
    handles.iter().map(|h| h.to_string()).collect()
}
