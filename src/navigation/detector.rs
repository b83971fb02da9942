//! Route-change detection.
//!
//! ```text
//!            path change                 data arrived / deadline
//!    Idle -----------------> Loading -------------------------------> Idle
//!                             |   ^
//!                             +---+ path change (episode superseded)
//! ```
//!
//! Both navigation producers (router and raw history) report through
//! [RouteChangeDetector::begin_episode]. A report for the path that is already
//! current is dropped, so a navigation seen by both creates a single episode.
//!
//! A fresh episode is mounting: its pages have not registered their loads
//! yet, so it cannot settle on data until [RouteChangeDetector::finish_mounting]
//! is called. The deadline applies from the start.

use std::time::Duration;

use tokio::time::Instant;

use super::episode::{Episode, EpisodeEnd, EpisodeId, NavigationSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    Idle,
    Loading,
}

#[derive(Debug)]
pub struct RouteChangeDetector {
    max_wait: Duration,
    last_id: u64,
    current: Option<Episode>,
}

impl RouteChangeDetector {
    pub fn new(max_wait: Duration) -> Self {
        Self {
            max_wait,
            last_id: 0,
            current: None,
        }
    }

    /// Starts a new episode for `path`, superseding the current one.
    ///
    /// Returns `None` when `path` is already the current path.
    pub fn begin_episode(
        &mut self,
        path: &str,
        source: NavigationSource,
        now: Instant,
    ) -> Option<EpisodeId> {
        if let Some(current) = &self.current {
            if current.path().as_ref() == path {
                log::debug!(
                    "RouteChangeDetector - {source:?} reported {path} again, already {}",
                    current.id()
                );
                return None;
            }
            if !current.is_settled() {
                log::debug!(
                    "RouteChangeDetector - {} superseded with {} load(s) outstanding",
                    current.id(),
                    current.pending_loads()
                );
            }
        }
        self.last_id += 1;
        let id = EpisodeId(self.last_id);
        log::debug!("RouteChangeDetector - {id} started for {path} ({source:?})");
        self.current = Some(Episode::new(id, path.into(), source, now, self.max_wait));
        Some(id)
    }

    pub fn state(&self) -> DetectorState {
        match &self.current {
            Some(episode) if !episode.is_settled() => DetectorState::Loading,
            _ => DetectorState::Idle,
        }
    }

    pub fn current(&self) -> Option<&Episode> {
        self.current.as_ref()
    }

    pub(super) fn current_mut(&mut self) -> Option<&mut Episode> {
        self.current.as_mut()
    }

    /// Deadline of the current episode, while it is loading
    pub fn deadline(&self) -> Option<Instant> {
        self.current
            .as_ref()
            .filter(|episode| !episode.is_settled())
            .map(Episode::deadline)
    }

    /// Closes the mounting window of the current episode, returns whether it
    /// was open
    pub fn finish_mounting(&mut self) -> bool {
        self.current.as_mut().is_some_and(Episode::finish_mounting)
    }

    /// True while the current episode waits for its pages or registered loads
    pub fn data_outstanding(&self) -> bool {
        self.current.as_ref().is_some_and(Episode::awaiting_data)
    }

    /// Applies the Loading → Idle transitions, returns the one taken if any
    pub fn update(&mut self, network_idle: bool, now: Instant) -> Option<EpisodeEnd> {
        let episode = self.current.as_mut().filter(|e| !e.is_settled())?;
        let end = if episode.deadline_elapsed(now) {
            EpisodeEnd::DeadlineElapsed
        } else if !episode.is_mounting() && episode.pending_loads() == 0 && network_idle {
            EpisodeEnd::DataArrived
        } else {
            return None;
        };
        episode.settle(end);
        log::debug!(
            "RouteChangeDetector - {} idle after {:?} ({end:?})",
            episode.id(),
            now.saturating_duration_since(episode.started_at())
        );
        Some(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::episode::LoadId;

    const MAX_WAIT: Duration = Duration::from_millis(2500);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn starts_idle_without_episode() {
        let detector = RouteChangeDetector::new(MAX_WAIT);
        assert_eq!(detector.state(), DetectorState::Idle);
        assert!(detector.current().is_none());
        assert!(detector.deadline().is_none());
    }

    #[test]
    fn path_change_enters_loading() {
        let t0 = Instant::now();
        let mut detector = RouteChangeDetector::new(MAX_WAIT);
        let id = detector
            .begin_episode("/products", NavigationSource::Router, t0)
            .unwrap();
        assert_eq!(detector.state(), DetectorState::Loading);
        assert_eq!(detector.current().unwrap().id(), id);
        assert_eq!(detector.deadline(), Some(t0 + MAX_WAIT));
    }

    #[test]
    fn same_path_from_second_producer_is_deduplicated() {
        let t0 = Instant::now();
        let mut detector = RouteChangeDetector::new(MAX_WAIT);
        let id = detector.begin_episode("/cart", NavigationSource::Router, t0);
        assert!(id.is_some());
        assert_eq!(
            detector.begin_episode("/cart", NavigationSource::History, t0 + ms(3)),
            None
        );
        assert_eq!(detector.current().unwrap().id(), id.unwrap());
        assert_eq!(detector.current().unwrap().source(), NavigationSource::Router);
    }

    #[test]
    fn history_producer_alone_starts_episode() {
        let t0 = Instant::now();
        let mut detector = RouteChangeDetector::new(MAX_WAIT);
        detector.begin_episode("/", NavigationSource::Router, t0);
        let back = detector.begin_episode("/products", NavigationSource::History, t0 + ms(40));
        assert!(back.is_some());
        assert_eq!(detector.current().unwrap().source(), NavigationSource::History);
    }

    #[test]
    fn new_path_supersedes_with_increasing_ids() {
        let t0 = Instant::now();
        let mut detector = RouteChangeDetector::new(MAX_WAIT);
        let first = detector
            .begin_episode("/a", NavigationSource::Router, t0)
            .unwrap();
        detector
            .current_mut()
            .unwrap()
            .admit(LoadId(1), t0 + ms(1));
        let second = detector
            .begin_episode("/b", NavigationSource::Router, t0 + ms(50))
            .unwrap();
        assert!(second > first);
        // Loads of the superseded episode are not carried over
        assert_eq!(detector.current().unwrap().pending_loads(), 0);
    }

    #[test]
    fn idle_when_data_arrived_and_network_quiet() {
        let t0 = Instant::now();
        let mut detector = RouteChangeDetector::new(MAX_WAIT);
        detector.begin_episode("/products", NavigationSource::Router, t0);
        detector.current_mut().unwrap().admit(LoadId(1), t0);
        assert!(detector.finish_mounting());

        assert_eq!(detector.update(true, t0 + ms(100)), None);
        detector.current_mut().unwrap().release(LoadId(1));
        // Network still busy
        assert_eq!(detector.update(false, t0 + ms(120)), None);
        assert_eq!(
            detector.update(true, t0 + ms(130)),
            Some(EpisodeEnd::DataArrived)
        );
        assert_eq!(detector.state(), DetectorState::Idle);
        assert!(detector.deadline().is_none());
    }

    #[test]
    fn deadline_wins_over_unsettled_load() {
        let t0 = Instant::now();
        let mut detector = RouteChangeDetector::new(MAX_WAIT);
        detector.begin_episode("/products", NavigationSource::Router, t0);
        detector.current_mut().unwrap().admit(LoadId(1), t0 + ms(10));
        assert!(detector.data_outstanding());

        assert_eq!(detector.update(false, t0 + ms(2499)), None);
        assert_eq!(
            detector.update(false, t0 + ms(2500)),
            Some(EpisodeEnd::DeadlineElapsed)
        );
        assert_eq!(detector.state(), DetectorState::Idle);
        assert!(!detector.data_outstanding());
        // Already idle, nothing more to do
        assert_eq!(detector.update(true, t0 + ms(3000)), None);
    }

    #[test]
    fn zero_registrations_settle_once_mounted() {
        let t0 = Instant::now();
        let mut detector = RouteChangeDetector::new(MAX_WAIT);
        detector.begin_episode("/", NavigationSource::Router, t0);
        // The page has not registered yet
        assert!(detector.data_outstanding());
        assert_eq!(detector.update(true, t0), None);
        assert_eq!(detector.state(), DetectorState::Loading);

        assert!(detector.finish_mounting());
        assert!(!detector.data_outstanding());
        assert_eq!(detector.update(true, t0), Some(EpisodeEnd::DataArrived));
    }

    #[test]
    fn deadline_applies_while_mounting() {
        let t0 = Instant::now();
        let mut detector = RouteChangeDetector::new(MAX_WAIT);
        detector.begin_episode("/", NavigationSource::Router, t0);
        assert_eq!(
            detector.update(true, t0 + MAX_WAIT),
            Some(EpisodeEnd::DeadlineElapsed)
        );
        assert!(!detector.finish_mounting());
    }
}
