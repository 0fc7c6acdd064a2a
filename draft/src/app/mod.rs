//! Application layer
//!
//! Contains the selection workflow and the services it is built from.

pub mod obscenity_filter;
pub mod roster_fetcher;
pub mod selector;

pub use obscenity_filter::{ObscenityFilter, BUILTIN_RULES};
pub use roster_fetcher::RosterFetcher;
pub use selector::{candidate_pool, Selector};
pub use tokio_util::sync::CancellationToken;
