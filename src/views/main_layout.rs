use crate::prelude::*;

use crate::{components::route_transition::RouteTransition, Route};

/// Shell around every page.
///
/// Hosts both navigation producers: the layout renders on every route change
/// and before the new page mounts, so the episode is open by the time the
/// page registers its loads.
#[component]
pub fn MainLayout() -> Element {
    log::debug!("MainLayout reload");

    helper_hooks::use_route_change_detection();
    helper_hooks::use_history_navigation_detection();

    use_drop(|| log::debug!("MainLayout Dropped"));

    rsx! {
        div { class: "relative min-h-dvh",
            header { class: "bg-base-100 fixed top-0 w-full z-20 shadow-lg shadow-base-content/10",
                NavBar {}
            }
            main { class: "pt-16 pb-16 mx-8", RouteTransition {} }
            footer { class: "absolute bottom-px w-full h-12 px-8 z-0",
                div { class: "h-px border-t border-solid border-gray-500" }
                Footer {}
            }
        }
    }
}

#[component]
fn NavBar() -> Element {
    log::debug!("NavBar reload");

    let item_count = use_memo(move || state_management::cart_item_count(&state_management::CART.read()));

    use_drop(|| log::debug!("NavBar Dropped"));

    rsx! {
        nav { class: "h-12 px-2 flex flex-row gap-2",
            div { class: "h-full flex flex-none content-center",
                div { class: "self-center text-lg font-black text-nowrap", "Storefront" }
            }
            div { class: "basis-10" }
            NavLink { route: Route::HomeView {}, "Home" }
            NavLink { route: Route::ProductListView {}, "Products" }
            div { class: "grow" }
            NavLink { route: Route::CartView {},
                "Cart"
                if item_count() > 0 {
                    span { class: "badge badge-primary ml-2", "{item_count}" }
                }
            }
        }
    }
}

#[component]
fn NavLink(route: Route, children: Element) -> Element {
    rsx! {
        div { class: "basis-10 content-center flex",
            Link {
                class: "h-full px-4 content-center text-lg text-nowrap font-bold uppercase hover:bg-primary/10",
                active_class: "bg-primary/10 text-primary",
                to: route,
                {children}
            }
        }
    }
}

#[component]
fn Footer() -> Element {
    rsx! {
        div { class: "h-full flex flex-row gap-4 justify-end content-center text-sm",
            for name in ["shipping", "returns", "privacy"] {
                Link {
                    key: "{name}",
                    class: "self-center text-primary hover:underline capitalize",
                    to: Route::PolicyView { name: name.into() },
                    "{name}"
                }
            }
        }
    }
}
