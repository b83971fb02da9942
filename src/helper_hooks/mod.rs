mod catalog;
mod navigation;
mod utils;

pub mod prelude {
    pub use super::utils::{FResource, LResult, LoadableFaillibleMapper};
    pub mod helper_hooks {
        pub use super::super::catalog::{use_resource_product, use_resource_products};
        pub use super::super::navigation::{
            use_history_navigation_detection, use_loading_indicator, use_navigation_loading,
            use_navigation_loading_signals, use_pending_work_counter, use_registered_resource,
            use_route_change_detection, use_route_load_registry,
        };
    }
}
