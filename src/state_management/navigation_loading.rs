use dioxus::prelude::*;

use crate::{config::APP_CONFIG, navigation::prelude::*};

/// Reactive copy of the navigation loading outputs, provided as a context
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationLoadingSignals {
    pub show_indicator: ReadOnlySignal<bool>,
    pub status: ReadOnlySignal<NavigationStatus>,
}

/// Navigation loading service
///
/// Provides the [NavigationLoading] handle and its [NavigationLoadingSignals]
/// to the whole tree, spawns the timer driver and mirrors the core outputs
/// into signals.
pub(super) fn use_navigation_loading_service(work: PendingWorkCounter) -> NavigationLoading {
    let loading =
        use_context_provider(|| NavigationLoading::new(&APP_CONFIG.peek().loading, work));

    let mut show_indicator = use_signal(|| false);
    let mut status = use_signal(NavigationStatus::default);
    use_context_provider(|| NavigationLoadingSignals {
        show_indicator: show_indicator.into(),
        status: status.into(),
    });

    let driver = loading.clone();
    use_future(move || {
        let driver = driver.clone();
        async move { driver.run().await }
    });

    let bridged = loading.clone();
    use_future(move || {
        let mut visible = bridged.subscribe_visibility();
        let mut nav_status = bridged.subscribe_status();
        async move {
            log::info!("navigation_loading (bridge) - start");
            loop {
                tokio::select! {
                    changed = visible.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let shown = *visible.borrow_and_update();
                        show_indicator.set(shown);
                    }
                    changed = nav_status.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let current = nav_status.borrow_and_update().clone();
                        status.set(current);
                    }
                }
            }
            log::debug!("navigation_loading (bridge) - stopped");
        }
    });

    use_drop(|| log::debug!("navigation_loading service Dropped"));

    loading
}
