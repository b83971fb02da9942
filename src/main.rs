#![windows_subsystem = "windows"]
mod components;
mod config;
mod helper_hooks;
mod navigation;
mod state_management;
mod utils;
mod views;

mod prelude {
    pub use super::helper_hooks::prelude::*;
    pub use super::navigation::prelude::*;
    pub use super::state_management::prelude::*;
    pub use dioxus::prelude::*;
}

use serde::{Deserialize, Serialize};

use components::loading_overlay::LoadingOverlay;
use prelude::*;

use utils::CCStr;
use views::{
    cart::CartView,
    home::HomeView,
    main_layout::MainLayout,
    policy::PolicyView,
    products::{ProductListView, ProductView},
};

#[derive(Clone, Routable, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[rustfmt::skip]
pub enum Route {
    #[layout(MainLayout)]
        #[route("/")]
        HomeView {},
        #[nest("/products")]
            #[route("/")]
            ProductListView {},
            #[route("/:slug")]
            ProductView { slug: CCStr },
        #[end_nest]
        #[route("/cart")]
        CartView {},
        #[route("/policies/:name")]
        PolicyView { name: CCStr },
    #[end_layout]
    #[route("/:..route")]
    PageNotFound { route: Vec<String> },
}

static TITLE: &str = "Storefront";

#[allow(non_snake_case)]
fn App() -> Element {
    log::debug!("App reload");

    crate::state_management::use_init_services();

    use_drop(|| log::debug!("App Dropped"));

    rsx! {
        document::Title { "{TITLE}" }
        document::Stylesheet { href: asset!("/assets/storefront.css") }

        div { id: "app", class: "text-base",
            LoadingOverlay {}
            Router::<Route> {}
        }
    }
}

#[component]
fn PageNotFound(route: Vec<String>) -> Element {
    rsx! {
        h1 { "Page not found" }
        p { "We are terribly sorry, but the page you requested doesn't exist." }
        pre { color: "red", "log:\nattemped to navigate to: {route:?}" }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    log::info!("starting app");

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, WindowBuilder};
        LaunchBuilder::desktop()
            .with_cfg(
                Config::new().with_menu(None).with_window(
                    WindowBuilder::new()
                        .with_title(TITLE)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1280, 800))
                        .with_resizable(true),
                ),
            )
            .launch(App)
    }

    #[cfg(not(feature = "desktop"))]
    dioxus::launch(App)
}
