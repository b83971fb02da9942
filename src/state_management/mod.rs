mod cart;
mod catalog;
mod navigation_loading;

use dioxus::prelude::*;

use crate::navigation::prelude::PendingWorkCounter;

pub fn use_init_services() {
    log::debug!("init_services - start");
    // The data layer owns the counter, everyone else reads it
    let work = use_context_provider(PendingWorkCounter::new);
    let _ = navigation_loading::use_navigation_loading_service(work.clone());
    let _ = cart::use_cart_service(work);
    log::debug!("init_services - finished");
}

pub mod prelude {
    pub use super::cart::{CartCommand, CartLine};
    pub use super::catalog::Product;
    pub use super::navigation_loading::NavigationLoadingSignals;

    pub mod state_management {
        pub use super::super::cart::{cart_item_count, cart_total_cents, CART};
        pub use super::super::catalog::{fetch_product, fetch_products};

        use dioxus::prelude::*;

        pub fn use_cart_service() -> Coroutine<super::CartCommand> {
            use_coroutine_handle()
        }
    }
}
