//! Viewer Draft
//!
//! Draws a random, filtered viewer from a live Twitch chat for a one-shot
//! "draft" or "drawing". Uses hexagonal (ports & adapters) architecture: the
//! selection workflow depends only on the `ChatPlatform` and `JobAssigner`
//! ports, with a reqwest-backed Twitch adapter for production use.
//!
//! ```no_run
//! use std::sync::Arc;
//! use viewer_draft::{Exclusions, Selector, SelectionRequest, TwitchClientImpl, TwitchConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let twitch = Arc::new(TwitchClientImpl::new(TwitchConfig::default())?);
//! let selector = Selector::with_defaults(twitch);
//!
//! let request = SelectionRequest::draft("somechannel")
//!     .with_name_suffix(" Kerman")
//!     .with_exclusions(Exclusions::new().with_bots(["nightbot"]));
//!
//! let selection = selector.select(&request).await?;
//! println!("{} ({:?})", selection.name, selection.job);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod app;
pub mod domain;
pub mod error;

#[cfg(test)]
mod test_utils;

pub use adapters::{RandomJobAssigner, TwitchClientImpl, TwitchConfig};
pub use app::{CancellationToken, ObscenityFilter, RosterFetcher, Selector};
pub use domain::entities::{
    display_name_with_suffix, handle_from_name, Candidate, ChatterRole, EnrollmentCheck,
    ExclusionSet, Exclusions, JobConstraint, Roster, Selection, SelectionMode, SelectionRequest,
    DEFAULT_RETRY_BUDGET,
};
pub use domain::ports::{ChatPlatform, Chatters, JobAssigner, TwitchUser};
pub use error::{SelectionError, TwitchError};
