//! Exclusion sets
//!
//! Read-only snapshots of handles that must never be selected. The core only
//! reads these; adding winners to them is the caller's job.

use std::collections::HashSet;

use super::selection::SelectionMode;

/// A set of lowercase handles subtracted from the roster before sampling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(HashSet<String>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check membership; `name` is compared in lowercase
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

/// All exclusion inputs for one selection call
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    /// Chat bots that are never eligible
    pub bots: ExclusionSet,
    /// Handles already drafted (Draft mode)
    pub drafted: ExclusionSet,
    /// Handles already drawn (Drawing mode)
    pub drawn: ExclusionSet,
    /// Names already present in the host, compared against the suffixed name
    pub enrolled: ExclusionSet,
}

impl Exclusions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bots<S: AsRef<str>>(mut self, bots: impl IntoIterator<Item = S>) -> Self {
        self.bots = bots.into_iter().collect();
        self
    }

    pub fn with_drafted<S: AsRef<str>>(mut self, drafted: impl IntoIterator<Item = S>) -> Self {
        self.drafted = drafted.into_iter().collect();
        self
    }

    pub fn with_drawn<S: AsRef<str>>(mut self, drawn: impl IntoIterator<Item = S>) -> Self {
        self.drawn = drawn.into_iter().collect();
        self
    }

    pub fn with_enrolled<S: AsRef<str>>(mut self, enrolled: impl IntoIterator<Item = S>) -> Self {
        self.enrolled = enrolled.into_iter().collect();
        self
    }

    /// The prior-selection list that applies to `mode`
    pub fn prior_selections(&self, mode: SelectionMode) -> &ExclusionSet {
        match mode {
            SelectionMode::Draft => &self.drafted,
            SelectionMode::Drawing => &self.drawn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_normalizes_case_and_drops_blanks() {
        let set: ExclusionSet = ["NightBot", " streamelements ", ""].into_iter().collect();

        assert_eq!(set.len(), 2);
        assert!(set.contains("nightbot"));
        assert!(set.contains("StreamElements"));
    }

    #[test]
    fn prior_selections_follow_mode() {
        let exclusions = Exclusions::new()
            .with_drafted(["jeb"])
            .with_drawn(["bill"]);

        assert!(exclusions.prior_selections(SelectionMode::Draft).contains("jeb"));
        assert!(!exclusions.prior_selections(SelectionMode::Draft).contains("bill"));
        assert!(exclusions.prior_selections(SelectionMode::Drawing).contains("bill"));
    }
}
