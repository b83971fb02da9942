use std::{future::Future, rc::Rc};

use tokio::sync::watch;

/// Kind of network operation tracked by the [PendingWorkCounter]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkKind {
    Fetch,
    Mutation,
}

/// Snapshot of the in-flight network operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkCounts {
    pub fetches: usize,
    pub mutations: usize,
}
impl WorkCounts {
    pub fn is_idle(&self) -> bool {
        self.fetches == 0 && self.mutations == 0
    }
    fn slot(&mut self, kind: WorkKind) -> &mut usize {
        match kind {
            WorkKind::Fetch => &mut self.fetches,
            WorkKind::Mutation => &mut self.mutations,
        }
    }
}

/// Counts the fetches and mutations the data layer currently has in flight.
///
/// The data layer owns the counter and is the only one starting work on it.
/// Every started operation is represented by a [WorkGuard]: dropping the guard
/// is what decrements the count, so an operation that fails or is cancelled
/// is accounted for exactly like one that succeeds.
///
/// Everyone else (the navigation loading core) only reads the counts or
/// subscribes to their changes.
#[derive(Debug, Clone)]
pub struct PendingWorkCounter {
    counts: Rc<watch::Sender<WorkCounts>>,
}

impl Default for PendingWorkCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingWorkCounter {
    pub fn new() -> Self {
        let (counts, _) = watch::channel(WorkCounts::default());
        Self {
            counts: Rc::new(counts),
        }
    }

    pub fn active_fetch_count(&self) -> usize {
        self.counts.borrow().fetches
    }

    pub fn active_mutation_count(&self) -> usize {
        self.counts.borrow().mutations
    }

    pub fn counts(&self) -> WorkCounts {
        *self.counts.borrow()
    }

    /// Returns a receiver notified every time one of the counts changes
    pub fn subscribe(&self) -> watch::Receiver<WorkCounts> {
        self.counts.subscribe()
    }

    /// Marks the start of an operation. The operation ends when the returned guard is dropped.
    #[must_use = "the operation is considered finished as soon as the guard is dropped"]
    pub fn begin(&self, kind: WorkKind) -> WorkGuard {
        self.counts.send_modify(|counts| *counts.slot(kind) += 1);
        log::debug!("PendingWorkCounter - {kind:?} started ({:?})", self.counts());
        WorkGuard {
            counter: self.clone(),
            kind,
        }
    }

    /// Runs `fut` counted as a fetch
    pub async fn track_fetch<F: Future>(&self, fut: F) -> F::Output {
        let _guard = self.begin(WorkKind::Fetch);
        fut.await
    }

    /// Runs `fut` counted as a mutation
    pub async fn track_mutation<F: Future>(&self, fut: F) -> F::Output {
        let _guard = self.begin(WorkKind::Mutation);
        fut.await
    }

    fn finish(&self, kind: WorkKind) {
        self.counts.send_modify(|counts| {
            let slot = counts.slot(kind);
            // A guard is only handed out after an increment
            debug_assert!(*slot > 0);
            *slot = slot.saturating_sub(1);
        });
        log::debug!("PendingWorkCounter - {kind:?} finished ({:?})", self.counts());
    }
}

/// Proof that an operation is in flight; see [PendingWorkCounter::begin]
#[derive(Debug)]
pub struct WorkGuard {
    counter: PendingWorkCounter,
    kind: WorkKind,
}
impl WorkGuard {
    pub fn kind(&self) -> WorkKind {
        self.kind
    }
}
impl Drop for WorkGuard {
    fn drop(&mut self) {
        self.counter.finish(self.kind);
    }
}
