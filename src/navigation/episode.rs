use std::{collections::HashSet, time::Duration};

use tokio::time::Instant;

use crate::utils::CCStr;

/// Identifies one navigation. Ids are strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EpisodeId(pub(super) u64);
impl core::fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "episode#{}", self.0)
    }
}

/// Identifies one data load registered against an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadId(pub(super) u64);

/// Which producer reported the navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationSource {
    /// The router's own change signal (links, programmatic pushes)
    Router,
    /// Raw history navigation (browser back/forward)
    History,
}

/// How an episode went back to idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeEnd {
    /// Every registered load settled and the network went quiet
    DataArrived,
    /// The episode stopped waiting; unsettled loads are detached
    DeadlineElapsed,
}

/// The bounded loading window of one navigation
#[derive(Debug)]
pub struct Episode {
    id: EpisodeId,
    path: CCStr,
    source: NavigationSource,
    started_at: Instant,
    deadline: Instant,
    pending: HashSet<LoadId>,
    settled: Option<EpisodeEnd>,
    mounting: bool,
}

impl Episode {
    pub(super) fn new(
        id: EpisodeId,
        path: CCStr,
        source: NavigationSource,
        started_at: Instant,
        max_wait: Duration,
    ) -> Self {
        Self {
            id,
            path,
            source,
            started_at,
            deadline: started_at + max_wait,
            pending: HashSet::new(),
            settled: None,
            mounting: true,
        }
    }

    pub fn id(&self) -> EpisodeId {
        self.id
    }
    pub fn path(&self) -> &CCStr {
        &self.path
    }
    pub fn source(&self) -> NavigationSource {
        self.source
    }
    pub fn started_at(&self) -> Instant {
        self.started_at
    }
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }
    pub fn settled(&self) -> Option<EpisodeEnd> {
        self.settled
    }
    pub fn is_settled(&self) -> bool {
        self.settled.is_some()
    }
    pub fn deadline_elapsed(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// True until the pages mounted by this navigation had a chance to
    /// register their loads
    pub fn is_mounting(&self) -> bool {
        self.mounting
    }

    /// True while the episode still waits for its pages or their loads
    pub fn awaiting_data(&self) -> bool {
        !self.is_settled() && (self.mounting || !self.pending.is_empty())
    }

    /// Ends the mounting window, returns whether it was open
    pub(super) fn finish_mounting(&mut self) -> bool {
        std::mem::replace(&mut self.mounting, false)
    }

    /// Adds `load` to the pending set.
    ///
    /// An episode that went idle because its data arrived is re-opened: the
    /// deadline still bounds it. Returns `false` once the deadline elapsed.
    pub(super) fn admit(&mut self, load: LoadId, now: Instant) -> bool {
        if self.settled == Some(EpisodeEnd::DeadlineElapsed) || self.deadline_elapsed(now) {
            return false;
        }
        if self.settled.take().is_some() {
            log::debug!("{} - re-opened by a late registration", self.id);
        }
        self.pending.insert(load);
        true
    }

    /// Removes `load` from the pending set, returns whether it was pending
    pub(super) fn release(&mut self, load: LoadId) -> bool {
        self.pending.remove(&load)
    }

    pub(super) fn settle(&mut self, end: EpisodeEnd) {
        self.mounting = false;
        if end == EpisodeEnd::DeadlineElapsed && !self.pending.is_empty() {
            log::debug!(
                "{} - deadline elapsed, detaching {} unsettled load(s)",
                self.id,
                self.pending.len()
            );
            self.pending.clear();
        }
        self.settled = Some(end);
    }
}
