use std::{cell::RefCell, rc::Rc};

use tokio::{
    sync::{watch, Notify},
    time::Instant,
};

use super::{
    debouncer::VisibilityDebouncer,
    detector::{DetectorState, RouteChangeDetector},
    episode::{EpisodeId, LoadId, NavigationSource},
    pending_work::PendingWorkCounter,
    registry::{RegistrationRejected, RouteLoadRegistry},
};
use crate::{config::LoadingConfig, utils::CCStr};

/// What the navigation loading core is currently doing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavigationStatus {
    #[default]
    Idle,
    Loading {
        episode: EpisodeId,
        path: CCStr,
    },
}

#[derive(Debug)]
pub(super) struct LoadingCore {
    pub(super) detector: RouteChangeDetector,
    pub(super) debouncer: VisibilityDebouncer,
    pub(super) work: PendingWorkCounter,
    pub(super) last_load: u64,
    visible: watch::Sender<bool>,
    status: watch::Sender<NavigationStatus>,
}

impl LoadingCore {
    /// Recomputes every derived state from the inputs and publishes the outputs
    pub(super) fn reevaluate(&mut self, now: Instant) {
        let counts = self.work.counts();
        self.detector.update(counts.is_idle(), now);
        let work_outstanding = !counts.is_idle() || self.detector.data_outstanding();
        self.debouncer.set_input(work_outstanding, now);
        self.publish();
    }

    fn next_wakeup(&self) -> Option<Instant> {
        match (self.detector.deadline(), self.debouncer.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn current_status(&self) -> NavigationStatus {
        match (self.detector.state(), self.detector.current()) {
            (DetectorState::Loading, Some(episode)) => NavigationStatus::Loading {
                episode: episode.id(),
                path: episode.path().clone(),
            },
            _ => NavigationStatus::Idle,
        }
    }

    fn publish(&self) {
        let shown = self.debouncer.should_show();
        self.visible.send_if_modified(|visible| {
            let changed = *visible != shown;
            *visible = shown;
            changed
        });
        let status = self.current_status();
        self.status.send_if_modified(|current| {
            let changed = *current != status;
            if changed {
                *current = status;
            }
            changed
        });
    }
}

/// Handle on the navigation loading core.
///
/// Cheap to clone, all clones drive the same state. Mutations are applied
/// synchronously; timers (show delay, minimum visible floor, episode
/// deadline) are serviced by [NavigationLoading::run], which must be spawned
/// once on the UI thread.
#[derive(Debug, Clone)]
pub struct NavigationLoading {
    core: Rc<RefCell<LoadingCore>>,
    wake: Rc<Notify>,
}

impl NavigationLoading {
    pub fn new(config: &LoadingConfig, work: PendingWorkCounter) -> Self {
        let (visible, _) = watch::channel(false);
        let (status, _) = watch::channel(NavigationStatus::Idle);
        let core = LoadingCore {
            detector: RouteChangeDetector::new(config.max_wait()),
            debouncer: VisibilityDebouncer::new(config.show_delay(), config.min_visible()),
            work,
            last_load: 0,
            visible,
            status,
        };
        Self {
            core: Rc::new(RefCell::new(core)),
            wake: Rc::new(Notify::new()),
        }
    }

    /// Single entry point for both navigation producers
    pub fn begin_episode(&self, path: &str, source: NavigationSource) -> Option<EpisodeId> {
        let now = Instant::now();
        let mut core = self.core.borrow_mut();
        let id = core.detector.begin_episode(path, source, now);
        if id.is_some() {
            core.reevaluate(now);
            self.wake.notify_one();
        }
        id
    }

    /// The narrow handle pages use to register their data loads
    pub fn registry(&self) -> RouteLoadRegistry {
        RouteLoadRegistry::new(self.clone())
    }

    pub(super) fn admit_load(&self) -> Result<(EpisodeId, LoadId), RegistrationRejected> {
        let admitted = self.core.borrow_mut().admit(Instant::now());
        if admitted.is_ok() {
            self.wake.notify_one();
        }
        admitted
    }

    pub(super) fn release_load(&self, episode: EpisodeId, load: LoadId) {
        match self.core.try_borrow_mut() {
            Ok(mut core) => {
                core.release(episode, load, Instant::now());
                self.wake.notify_one();
            }
            // Only reachable if a load is dropped from inside the core; the
            // episode deadline still bounds the wait
            Err(_) => log::warn!("NavigationLoading - could not release a load of {episode}"),
        }
    }

    pub fn should_show(&self) -> bool {
        self.core.borrow().debouncer.should_show()
    }

    pub fn status(&self) -> NavigationStatus {
        self.core.borrow().current_status()
    }

    /// Number of registered loads the current episode still waits for
    pub fn pending_loads(&self) -> usize {
        self.core
            .borrow()
            .detector
            .current()
            .filter(|episode| !episode.is_settled())
            .map(|episode| episode.pending_loads())
            .unwrap_or_default()
    }

    pub fn subscribe_visibility(&self) -> watch::Receiver<bool> {
        self.core.borrow().visible.subscribe()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<NavigationStatus> {
        self.core.borrow().status.subscribe()
    }

    /// Services the timers and follows the pending-work counter. Never returns
    /// while the counter is alive.
    pub async fn run(&self) {
        log::info!("navigation_loading (driver) - start");
        let mut work = self.core.borrow().work.subscribe();
        self.core.borrow_mut().reevaluate(Instant::now());
        loop {
            let wakeup = self.core.borrow().next_wakeup();
            tokio::select! {
                _ = sleep_until(wakeup) => (),
                changed = work.changed() => {
                    if changed.is_err() {
                        log::warn!("navigation_loading (driver) - pending-work counter gone, stopping");
                        return;
                    }
                }
                _ = self.wake.notified() => (),
            }
            // Tasks queued by the render that reported a route (the resources
            // of the pages it mounted) register their loads first
            tokio::task::yield_now().await;
            let mut core = self.core.borrow_mut();
            if core.detector.finish_mounting() {
                log::debug!("navigation_loading (driver) - pages mounted");
            }
            core.reevaluate(Instant::now());
        }
    }
}

async fn sleep_until(wakeup: Option<Instant>) {
    match wakeup {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, time::Duration};

    use tokio::{
        task::{spawn_local, LocalSet},
        time::{sleep, sleep_until},
    };

    use super::*;
    use crate::navigation::pending_work::WorkKind;

    type Transitions = Rc<RefCell<Vec<(u64, bool)>>>;

    /// A running core plus a record of every visibility change, in ms since start
    struct Harness {
        loading: NavigationLoading,
        work: PendingWorkCounter,
        t0: Instant,
        transitions: Transitions,
    }

    impl Harness {
        /// Must be called from inside a `LocalSet`
        fn start() -> Self {
            let t0 = Instant::now();
            let work = PendingWorkCounter::new();
            let loading = NavigationLoading::new(&LoadingConfig::default(), work.clone());
            let transitions = Transitions::default();

            let mut visible = loading.subscribe_visibility();
            let sink = transitions.clone();
            spawn_local(async move {
                while visible.changed().await.is_ok() {
                    let shown = *visible.borrow_and_update();
                    let at = Instant::now().duration_since(t0).as_millis() as u64;
                    sink.borrow_mut().push((at, shown));
                }
            });
            let driver = loading.clone();
            spawn_local(async move { driver.run().await });

            Self {
                loading,
                work,
                t0,
                transitions,
            }
        }

        async fn at(&self, ms: u64) {
            sleep_until(self.t0 + Duration::from_millis(ms)).await
        }

        fn navigate(&self, path: &str) -> Option<EpisodeId> {
            self.loading.begin_episode(path, NavigationSource::Router)
        }

        /// Registers a load on the current episode that settles after `ms`
        fn register_load(&self, ms: u64) {
            let load = self
                .loading
                .registry()
                .register_data_load(sleep(Duration::from_millis(ms)));
            spawn_local(load);
        }

        /// Runs a fetch lasting `ms`
        fn fetch(&self, ms: u64) {
            let work = self.work.clone();
            spawn_local(async move {
                work.track_fetch(sleep(Duration::from_millis(ms))).await;
            });
        }

        fn transitions(&self) -> Vec<(u64, bool)> {
            self.transitions.borrow().clone()
        }
    }

    fn assert_transitions(actual: Vec<(u64, bool)>, expected: &[(u64, bool)]) {
        assert_eq!(
            actual.len(),
            expected.len(),
            "transitions {actual:?}, expected {expected:?}"
        );
        for ((at, shown), (exp_at, exp_shown)) in actual.iter().zip(expected) {
            assert_eq!(shown, exp_shown, "transitions {actual:?}");
            assert!(
                at.abs_diff(*exp_at) <= 1,
                "transitions {actual:?}, expected {expected:?}"
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_shorter_than_show_delay_never_shows() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                h.fetch(150);
                h.at(1000).await;
                assert!(h.transitions().is_empty());
                assert!(!h.loading.should_show());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn floor_counts_from_show_not_from_work_start() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                h.fetch(250);
                h.at(1000).await;
                assert_transitions(h.transitions(), &[(200, true), (400, false)]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn mutation_counts_as_pending_work() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                let work = h.work.clone();
                spawn_local(async move {
                    work.track_mutation(sleep(Duration::from_millis(700))).await;
                });
                h.at(1000).await;
                assert_transitions(h.transitions(), &[(200, true), (700, false)]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn registration_without_episode_leaves_indicator_alone() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                h.register_load(1000);
                h.at(1500).await;
                assert!(h.transitions().is_empty());
                assert_eq!(h.loading.status(), NavigationStatus::Idle);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_reaches_idle_despite_unsettled_load() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                let episode = h.navigate("/products").unwrap();
                h.at(10).await;
                h.register_load(3000);

                h.at(2400).await;
                assert_eq!(
                    h.loading.status(),
                    NavigationStatus::Loading {
                        episode,
                        path: "/products".into()
                    }
                );
                h.at(2501).await;
                assert_eq!(h.loading.status(), NavigationStatus::Idle);
                assert_eq!(h.loading.pending_loads(), 0);
                assert_transitions(h.transitions(), &[(210, true), (2500, false)]);

                // The late settlement changes nothing
                h.at(3500).await;
                assert_eq!(h.transitions().len(), 2);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn two_quick_navigations_with_short_fetches_never_show() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                h.navigate("/products");
                h.fetch(100);
                h.at(50).await;
                h.navigate("/cart");
                h.fetch(100);
                h.at(1000).await;
                assert!(h.transitions().is_empty());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn failed_load_releases_indicator() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                h.navigate("/products/unknown");
                let load = h.loading.registry().register_data_load(async {
                    sleep(Duration::from_millis(300)).await;
                    Err::<(), _>("product not found")
                });
                spawn_local(async move {
                    assert!(load.await.is_err());
                });
                h.at(301).await;
                assert_eq!(h.loading.status(), NavigationStatus::Idle);
                h.at(1000).await;
                assert_transitions(h.transitions(), &[(200, true), (400, false)]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_load_is_detached() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                h.navigate("/a");
                h.register_load(1000);
                h.at(100).await;
                // Nothing registered for /b, the slow /a load is ignored
                h.navigate("/b");
                h.at(150).await;
                assert_eq!(h.loading.status(), NavigationStatus::Idle);
                h.at(2000).await;
                assert!(h.transitions().is_empty());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_navigation_keeps_indicator_up() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                h.navigate("/a");
                h.register_load(600);
                h.at(300).await;
                h.navigate("/b");
                h.register_load(400);
                h.at(2000).await;
                // No blink between the two episodes
                assert_transitions(h.transitions(), &[(200, true), (700, false)]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn navigation_after_floor_does_not_blink() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                h.navigate("/a");
                h.register_load(2000);
                h.at(1000).await;
                // Floor long met, the new page registers right away
                h.navigate("/b");
                h.register_load(2000);
                h.at(4000).await;
                assert_transitions(h.transitions(), &[(200, true), (3000, false)]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn navigation_during_show_delay_keeps_show_instant() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                h.navigate("/a");
                h.register_load(2000);
                h.at(150).await;
                h.navigate("/b");
                h.register_load(2000);
                h.at(3000).await;
                assert_transitions(h.transitions(), &[(200, true), (2150, false)]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn page_registering_from_its_own_task_keeps_indicator_up() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                h.navigate("/a");
                h.register_load(2000);
                h.at(1000).await;
                h.navigate("/b");
                // Like a page resource: registers on its first poll, after
                // the route was reported
                let registry = h.loading.registry();
                spawn_local(async move {
                    registry
                        .register_data_load(sleep(Duration::from_millis(2000)))
                        .await;
                });
                h.at(4000).await;
                assert_transitions(h.transitions(), &[(200, true), (3000, false)]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn navigation_right_after_show_keeps_floor() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                h.navigate("/a");
                h.register_load(220);
                h.at(230).await;
                // Data arrived 20ms after the indicator appeared, a new
                // navigation with no data must not cut the floor short
                h.navigate("/b");
                h.at(1000).await;
                assert_transitions(h.transitions(), &[(200, true), (400, false)]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn late_registration_after_deadline_does_not_reshow() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                h.navigate("/products");
                h.at(2600).await;
                h.register_load(1000);
                assert_eq!(h.loading.pending_loads(), 0);
                h.at(4000).await;
                assert!(h.transitions().is_empty());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn status_follows_episodes() {
        LocalSet::new()
            .run_until(async {
                let h = Harness::start();
                let mut status = h.loading.subscribe_status();
                let episode = h.navigate("/products").unwrap();
                h.register_load(100);
                assert_eq!(
                    *status.borrow_and_update(),
                    NavigationStatus::Loading {
                        episode,
                        path: "/products".into()
                    }
                );
                h.at(101).await;
                assert_eq!(*status.borrow_and_update(), NavigationStatus::Idle);
            })
            .await;
    }
}
