use crate::prelude::*;

use crate::{
    components::{
        misc::{Divider, LoadError},
        product_card::{ProductCard, ProductCardSkeleton},
    },
    Route,
};

const FEATURED_COUNT: usize = 3;

#[component]
pub fn HomeView() -> Element {
    log::debug!("HomeView Rendered");

    let products = helper_hooks::use_resource_products();

    use_drop(|| log::debug!("HomeView Dropped"));

    rsx! {
        div { class: "hero bg-base-200 rounded-box my-4",
            div { class: "hero-content text-center flex-col",
                h1 { class: "text-4xl font-black", "Goods for slow living" }
                p { class: "text-lg", "Small batch homeware, shipped from our workshop." }
                Link { class: "btn btn-primary", to: Route::ProductListView {}, "Browse the shop" }
            }
        }
        Divider { "Featured" }
        div { class: "flex flex-wrap justify-center gap-8",
            match products.lrmap(|products| products.iter().take(FEATURED_COUNT).cloned().collect::<Vec<_>>()) {
                None => rsx! {
                    for i in 0..FEATURED_COUNT {
                        ProductCardSkeleton { key: "{i}" }
                    }
                },
                Some(Ok(featured)) => rsx! {
                    for product in featured {
                        ProductCard { key: "{product.slug}", product }
                    }
                },
                Some(Err(e)) => rsx! {
                    LoadError { message: e }
                },
            }
        }
    }
}
