use std::future::Future;

use tokio::time::Instant;

use super::{
    episode::{EpisodeId, LoadId},
    orchestrator::{LoadingCore, NavigationLoading},
};

/// Why a data load was not attached to an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationRejected {
    #[error("no navigation has started yet")]
    NoEpisode,
    #[error("{0} stopped waiting for data")]
    DeadlineElapsed(EpisodeId),
}

impl LoadingCore {
    pub(super) fn admit(&mut self, now: Instant) -> Result<(EpisodeId, LoadId), RegistrationRejected> {
        self.last_load += 1;
        let load = LoadId(self.last_load);
        let episode = self
            .detector
            .current_mut()
            .ok_or(RegistrationRejected::NoEpisode)?;
        if !episode.admit(load, now) {
            return Err(RegistrationRejected::DeadlineElapsed(episode.id()));
        }
        let id = episode.id();
        log::debug!(
            "RouteLoadRegistry - load registered on {id} ({} pending)",
            episode.pending_loads()
        );
        self.reevaluate(now);
        Ok((id, load))
    }

    pub(super) fn release(&mut self, episode: EpisodeId, load: LoadId, now: Instant) {
        match self.detector.current_mut() {
            Some(current) if current.id() == episode => {
                if current.release(load) {
                    log::debug!(
                        "RouteLoadRegistry - load settled on {episode} ({} pending)",
                        current.pending_loads()
                    );
                    self.reevaluate(now);
                }
            }
            _ => log::debug!("RouteLoadRegistry - load of superseded {episode} settled, ignored"),
        }
    }
}

/// Held by a registered load until it settles
#[derive(Debug)]
struct LoadTicket {
    loading: NavigationLoading,
    episode: EpisodeId,
    load: LoadId,
}
impl Drop for LoadTicket {
    fn drop(&mut self) {
        self.loading.release_load(self.episode, self.load);
    }
}

/// The registration point handed to pages.
///
/// A page registers the futures its first meaningful render depends on. The
/// current navigation keeps the loading indicator up until they settle (or
/// until it gives up waiting).
#[derive(Debug, Clone)]
pub struct RouteLoadRegistry {
    loading: NavigationLoading,
}

impl RouteLoadRegistry {
    pub(super) fn new(loading: NavigationLoading) -> Self {
        Self { loading }
    }

    /// Attaches `load` to the current navigation and returns it, wrapped.
    ///
    /// The registration happens right away, not on first poll. The returned
    /// future yields the output of `load` untouched, errors included: a failed
    /// load counts as arrived for the indicator. Dropping the returned future
    /// also counts as arrived.
    ///
    /// When no navigation started yet, or the current one already stopped
    /// waiting, `load` is still returned but nobody waits for it.
    pub fn register_data_load<F: Future>(&self, load: F) -> impl Future<Output = F::Output> {
        let ticket = match self.loading.admit_load() {
            Ok((episode, load)) => Some(LoadTicket {
                loading: self.loading.clone(),
                episode,
                load,
            }),
            Err(reason) => {
                log::debug!("RouteLoadRegistry - registration ignored: {reason}");
                None
            }
        };
        async move {
            let output = load.await;
            drop(ticket);
            output
        }
    }
}
