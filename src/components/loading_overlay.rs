use crate::prelude::*;

/// Blocking overlay shown while the debounced loading indicator is up
#[component]
pub fn LoadingOverlay() -> Element {
    let signals = helper_hooks::use_navigation_loading_signals();
    let show = signals.show_indicator;

    let label = match &*signals.status.read() {
        NavigationStatus::Loading { path, .. } => format!("Loading {path}"),
        NavigationStatus::Idle => "Loading".to_owned(),
    };

    rsx! {
        if show() {
            div {
                class: "loading-overlay fixed inset-0 z-40 flex items-center justify-center bg-base-100/60",
                role: "progressbar",
                "aria-busy": "true",
                "aria-label": "{label}",
                span { class: "loading loading-spinner loading-lg text-primary" }
            }
        }
    }
}
