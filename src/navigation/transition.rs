use tokio::time::Instant;

use crate::{config::TransitionConfig, utils::CCStr};

/// Animation phase of one route layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Enter,
    In,
    Exit,
}
impl TransitionPhase {
    pub fn css_class(self) -> &'static str {
        match self {
            TransitionPhase::Enter => "route-enter",
            TransitionPhase::In => "route-in",
            TransitionPhase::Exit => "route-exit",
        }
    }
}

/// A route layer to render, keyed by its path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLayer {
    pub path: CCStr,
    pub phase: TransitionPhase,
}

#[derive(Debug, Clone)]
struct Mounted {
    path: CCStr,
    since: Instant,
}

/// Enter/exit phases keyed by route identity.
///
/// Knows nothing about loading: it only looks at the current path and the
/// clock, so it can run while the indicator is up.
#[derive(Debug, Clone)]
pub struct TransitionPresenter {
    config: TransitionConfig,
    current: Option<Mounted>,
    leaving: Option<Mounted>,
}

impl TransitionPresenter {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            current: None,
            leaving: None,
        }
    }

    /// Reports the current path, returns whether it changed.
    ///
    /// The very first path does not animate in.
    pub fn set_path(&mut self, path: &str, now: Instant) -> bool {
        match &self.current {
            Some(current) if current.path.as_ref() == path => false,
            Some(_) => {
                // One layer per path: coming back to the leaving route drops it
                self.leaving = self
                    .current
                    .take()
                    .map(|left| Mounted {
                        path: left.path,
                        since: now,
                    })
                    .filter(|left| left.path.as_ref() != path);
                self.current = Some(Mounted {
                    path: path.into(),
                    since: now,
                });
                true
            }
            None => {
                self.current = Some(Mounted {
                    path: path.into(),
                    since: now.checked_sub(self.config.enter()).unwrap_or(now),
                });
                true
            }
        }
    }

    /// Phase of `path` at `now`, `None` once it is gone
    pub fn phase_of(&self, path: &str, now: Instant) -> Option<TransitionPhase> {
        if let Some(current) = self.current.as_ref().filter(|m| m.path.as_ref() == path) {
            return Some(if now.duration_since(current.since) < self.config.enter() {
                TransitionPhase::Enter
            } else {
                TransitionPhase::In
            });
        }
        self.leaving
            .as_ref()
            .filter(|m| m.path.as_ref() == path)
            .filter(|m| now.duration_since(m.since) < self.config.exit())
            .map(|_| TransitionPhase::Exit)
    }

    /// Layers to render at `now`, the leaving one first
    pub fn layers(&self, now: Instant) -> Vec<RouteLayer> {
        self.leaving
            .iter()
            .chain(self.current.iter())
            .filter_map(|m| {
                self.phase_of(&m.path, now).map(|phase| RouteLayer {
                    path: m.path.clone(),
                    phase,
                })
            })
            .collect()
    }

    /// Next instant at which [Self::layers] changes on its own
    pub fn next_change(&self, now: Instant) -> Option<Instant> {
        let enter_done = self
            .current
            .as_ref()
            .map(|m| m.since + self.config.enter());
        let exit_done = self.leaving.as_ref().map(|m| m.since + self.config.exit());
        enter_done
            .into_iter()
            .chain(exit_done)
            .filter(|at| *at > now)
            .min()
    }
}
