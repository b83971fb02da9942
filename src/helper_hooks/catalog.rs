use crate::prelude::*;

use crate::{config::APP_CONFIG, utils::CCStr};

pub fn use_resource_products() -> FResource<Vec<Product>> {
    let work = helper_hooks::use_pending_work_counter();
    helper_hooks::use_registered_resource(move || {
        let work = work.clone();
        let latency_ms = APP_CONFIG.peek().backend.latency_ms;
        async move {
            log::debug!("use_resource_products - start");
            let products = state_management::fetch_products(&work, latency_ms).await;
            log::debug!("use_resource_products - loaded");
            products
        }
    })
}

pub fn use_resource_product(slug: CCStr) -> FResource<Product> {
    let work = helper_hooks::use_pending_work_counter();
    helper_hooks::use_registered_resource(move || {
        let work = work.clone();
        let slug = slug.clone();
        let latency_ms = APP_CONFIG.peek().backend.latency_ms;
        async move {
            log::debug!("use_resource_product - start");
            let product = state_management::fetch_product(&work, &slug, latency_ms).await;
            log::debug!("use_resource_product - loaded");
            product
        }
    })
}
