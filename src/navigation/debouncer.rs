//! Debounced visibility of the loading indicator.
//!
//! ```text
//!           work              show_at reached
//!   Idle ----------> PendingShow -----------> Shown
//!    ^  <----------      |                    |  ^
//!    |     no work       |                    |  | work
//!    |                   |        no work     v  |
//!    +--------------------------------- PendingHide
//!          hide_at reached (or floor already met)
//! ```
//!
//! `PendingShow` owns the show timer and `PendingHide` owns the hide timer.
//! Entering one of them replaces whatever timer of the same kind existed,
//! leaving it cancels it.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityPhase {
    /// Hidden, nothing scheduled
    Idle,
    /// Hidden, shows at `show_at` unless the work finishes first
    PendingShow { show_at: Instant },
    /// Visible
    Shown { shown_since: Instant },
    /// Visible, hides at `hide_at` unless work comes back first
    PendingHide {
        shown_since: Instant,
        hide_at: Instant,
    },
}

#[derive(Debug)]
pub struct VisibilityDebouncer {
    show_delay: Duration,
    min_visible: Duration,
    phase: VisibilityPhase,
}

impl VisibilityDebouncer {
    pub fn new(show_delay: Duration, min_visible: Duration) -> Self {
        Self {
            show_delay,
            min_visible,
            phase: VisibilityPhase::Idle,
        }
    }

    pub fn phase(&self) -> VisibilityPhase {
        self.phase
    }

    pub fn should_show(&self) -> bool {
        matches!(
            self.phase,
            VisibilityPhase::Shown { .. } | VisibilityPhase::PendingHide { .. }
        )
    }

    pub fn shown_since(&self) -> Option<Instant> {
        match self.phase {
            VisibilityPhase::Shown { shown_since }
            | VisibilityPhase::PendingHide { shown_since, .. } => Some(shown_since),
            _ => None,
        }
    }

    /// The instant at which [Self::advance] has something to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            VisibilityPhase::PendingShow { show_at } => Some(show_at),
            VisibilityPhase::PendingHide { hide_at, .. } => Some(hide_at),
            _ => None,
        }
    }

    /// Feeds the current "is work outstanding" value
    pub fn set_input(&mut self, work_outstanding: bool, now: Instant) {
        let next = match (self.phase, work_outstanding) {
            (VisibilityPhase::Idle, true) => VisibilityPhase::PendingShow {
                show_at: now + self.show_delay,
            },
            (VisibilityPhase::PendingShow { .. }, false) => {
                log::debug!("VisibilityDebouncer - work finished before show delay, show cancelled");
                VisibilityPhase::Idle
            }
            (VisibilityPhase::Shown { shown_since }, false) => {
                let hide_at = shown_since + self.min_visible;
                if now >= hide_at {
                    VisibilityPhase::Idle
                } else {
                    VisibilityPhase::PendingHide {
                        shown_since,
                        hide_at,
                    }
                }
            }
            (VisibilityPhase::PendingHide { shown_since, .. }, true) => {
                VisibilityPhase::Shown { shown_since }
            }
            (phase, _) => phase,
        };
        self.transition(next);
        // A zero delay must not wait for a timer
        self.advance(now);
    }

    /// Fires the scheduled show or hide if its time has come
    pub fn advance(&mut self, now: Instant) {
        let next = match self.phase {
            VisibilityPhase::PendingShow { show_at } if now >= show_at => {
                VisibilityPhase::Shown { shown_since: now }
            }
            VisibilityPhase::PendingHide { hide_at, .. } if now >= hide_at => {
                VisibilityPhase::Idle
            }
            phase => phase,
        };
        self.transition(next);
    }

    fn transition(&mut self, next: VisibilityPhase) {
        if next != self.phase {
            log::debug!("VisibilityDebouncer - {:?} -> {next:?}", self.phase);
            self.phase = next;
        }
    }
}
