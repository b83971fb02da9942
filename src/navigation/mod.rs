//! # Navigation loading
//!
//! Decides whether the blocking loading indicator is visible while the user
//! navigates. Three independent sources race each other:
//!
//! - the data layer's in-flight fetches and mutations ([pending_work]),
//! - the data loads pages register for the navigation that mounted them
//!   ([registry]),
//! - route changes, reported by the router and by raw history navigation
//!   ([detector]).
//!
//! They are folded into a single "work outstanding" input which the
//! [debouncer] turns into the indicator visibility: nothing shows for work
//! shorter than the show delay, and once shown the indicator stays up for a
//! minimum duration. Each navigation is an [episode] bounded by a deadline so
//! a load that never settles cannot keep the indicator up forever.
//!
//! Route enter/exit animations ([transition]) only depend on the current path
//! and run alongside.
//!
//! Everything here is single-threaded (`Rc`, `RefCell`) and free of UI
//! framework types; the Dioxus glue lives in `state_management`.

pub mod debouncer;
pub mod detector;
pub mod episode;
mod orchestrator;
pub mod pending_work;
pub mod registry;
pub mod transition;

pub mod prelude {
    pub use super::episode::{EpisodeId, NavigationSource};
    pub use super::orchestrator::{NavigationLoading, NavigationStatus};
    pub use super::pending_work::{PendingWorkCounter, WorkKind};
    pub use super::registry::RouteLoadRegistry;
    pub use super::transition::{RouteLayer, TransitionPhase, TransitionPresenter};
}
