use crate::prelude::*;

use std::{future::Future, str::FromStr};

use crate::Route;

const MISSING_PROVIDER: &str = "navigation loading context is missing: \
    state_management::use_init_services() must run in the App component, \
    above the Router, before any layout or page uses it";

/// Returns the navigation loading handle provided by the App root.
///
/// # Panics
///
/// Panics when the provider is missing. Without it the loading indicator
/// would silently never show, so this is treated as a programming error.
pub fn use_navigation_loading() -> NavigationLoading {
    try_use_context::<NavigationLoading>().unwrap_or_else(|| panic!("{MISSING_PROVIDER}"))
}

pub fn use_navigation_loading_signals() -> NavigationLoadingSignals {
    try_use_context::<NavigationLoadingSignals>().unwrap_or_else(|| panic!("{MISSING_PROVIDER}"))
}

pub fn use_pending_work_counter() -> PendingWorkCounter {
    try_use_context::<PendingWorkCounter>().unwrap_or_else(|| panic!("{MISSING_PROVIDER}"))
}

pub fn use_route_load_registry() -> RouteLoadRegistry {
    let loading = use_navigation_loading();
    use_hook(move || loading.registry())
}

pub fn use_loading_indicator() -> ReadOnlySignal<bool> {
    use_navigation_loading_signals().show_indicator
}

/// Like [use_resource], the future is also registered as a data load of the
/// navigation that mounted the calling page.
///
/// Re-runs of the resource register again; once the navigation stopped
/// waiting they are simply not tracked anymore.
pub fn use_registered_resource<T, F>(mut future: impl FnMut() -> F + 'static) -> Resource<T>
where
    T: 'static,
    F: Future<Output = T> + 'static,
{
    let registry = use_route_load_registry();
    use_resource(move || registry.register_data_load(future()))
}

/// Router producer: reports the current route on every render of the caller.
///
/// Must be called by the layout wrapping the pages, so the episode exists
/// before the pages mount and register their loads.
pub fn use_route_change_detection() {
    let loading = use_navigation_loading();
    let route = use_route::<Route>();
    loading.begin_episode(&route.to_string(), NavigationSource::Router);
}

const POPSTATE_LISTENER: &str = r#"
    window.addEventListener("popstate", () => {
        dioxus.send(window.location.pathname);
    });
"#;

/// History producer: reports back/forward navigation the router may not see.
pub fn use_history_navigation_detection() {
    let loading = use_navigation_loading();
    use_future(move || {
        let loading = loading.clone();
        async move {
            log::info!("history_listener (future) - start");
            let mut listener = document::eval(POPSTATE_LISTENER);
            loop {
                match listener.recv::<String>().await {
                    Ok(path) => {
                        log::debug!("history_listener (future) - popstate to {path}");
                        loading.begin_episode(&route_path(&path), NavigationSource::History);
                    }
                    Err(e) => {
                        log::warn!("history_listener (future) - stopped: {e}");
                        break;
                    }
                }
            }
        }
    });
}

/// Renders a raw location path the way the router producer reports it, so
/// both producers agree on the path of a page
fn route_path(path: &str) -> String {
    match Route::from_str(path) {
        Ok(route) => route.to_string(),
        Err(e) => {
            log::debug!("history_listener - {path} is not a route ({e}), kept as is");
            path.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_path_matches_router_path() {
        let product = Route::ProductView {
            slug: "oak-board".into(),
        };
        assert_eq!(route_path("/products/oak-board"), product.to_string());
        assert_eq!(route_path(&Route::CartView {}.to_string()), Route::CartView {}.to_string());
        let listing = Route::ProductListView {}.to_string();
        assert_eq!(route_path(&listing), listing);
    }

    #[test]
    fn unknown_history_path_maps_to_not_found_route() {
        let not_found = Route::PageNotFound {
            route: vec!["nowhere".to_owned()],
        };
        assert_eq!(route_path("/nowhere"), not_found.to_string());
    }

    #[test]
    #[should_panic(expected = "navigation loading context is missing")]
    fn missing_provider_fails_fast() {
        fn orphan_page() -> Element {
            let _ = use_navigation_loading();
            rsx! {}
        }
        let mut dom = VirtualDom::new(orphan_page);
        dom.rebuild_in_place();
    }
}
