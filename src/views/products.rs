use crate::prelude::*;

use crate::{
    components::{
        misc::{BackButton, LoadError},
        product_card::{ProductCard, ProductCardSkeleton},
    },
    utils::{format_price, CCStr},
    Route,
};

#[component]
pub fn ProductListView() -> Element {
    log::debug!("ProductListView Rendered");

    let products = helper_hooks::use_resource_products();

    use_drop(|| log::debug!("ProductListView Dropped"));

    rsx! {
        h1 { class: "text-2xl font-black my-4", "All products" }
        div { class: "flex flex-wrap gap-8",
            match products.lrmap(Clone::clone) {
                None => rsx! {
                    for i in 0..4 {
                        ProductCardSkeleton { key: "{i}" }
                    }
                },
                Some(Ok(products)) => rsx! {
                    for product in products {
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

#[component]
pub fn ProductView(slug: CCStr) -> Element {
    log::debug!("ProductView Rendered");

    let product = helper_hooks::use_resource_product(slug.clone());
    let cart_service = state_management::use_cart_service();
    let mut quantity = use_signal(|| 1u32);

    use_drop(|| log::debug!("ProductView Dropped"));

    let add_to_cart = move |_| {
        if let Some(product) = product.lrmap_ok(Clone::clone) {
            cart_service.send(CartCommand::Add {
                product,
                quantity: quantity(),
            });
        }
    };

    rsx! {
        div { class: "flex flex-row gap-4 my-4",
            BackButton { route: Route::ProductListView {} }
            h1 { class: "text-2xl font-black self-center", "{slug}" }
        }
        match product.lrmap(Clone::clone) {
            None => rsx! {
                div { class: "flex flex-col gap-4 max-w-xl",
                    div { class: "skeleton h-8 w-64" }
                    div { class: "skeleton h-4 w-96" }
                }
            },
            Some(Ok(Product { name, summary, price_cents, .. })) => rsx! {
                div { class: "flex flex-col gap-4 max-w-xl",
                    h2 { class: "text-3xl font-bold", "{name}" }
                    p { class: "text-lg", "{summary}" }
                    div { class: "text-2xl font-mono", {format_price(price_cents)} }
                    div { class: "flex flex-row gap-2",
                        input {
                            r#type: "number",
                            class: "input input-bordered w-24",
                            min: "1",
                            value: "{quantity}",
                            oninput: move |evt| {
                                if let Ok(q) = evt.parsed::<u32>() {
                                    quantity.set(q.max(1));
                                }
                            },
                        }
                        button { class: "btn btn-primary", onclick: add_to_cart, "Add to cart" }
                    }
                }
            },
            Some(Err(e)) => rsx! {
                LoadError { message: e }
            },
        }
    }
}
