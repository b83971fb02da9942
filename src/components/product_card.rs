use crate::prelude::*;

use crate::{utils::format_price, Route};

#[component]
pub fn ProductCard(product: Product) -> Element {
    let Product {
        slug,
        name,
        summary,
        price_cents,
    } = product;

    rsx! {
        Link {
            class: "card card-compact w-64 bg-base-100 shadow-xl hover:bg-primary/10",
            to: Route::ProductView { slug },
            div { class: "card-body",
                h2 { class: "card-title", "{name}" }
                p { class: "text-sm text-base-content/70", "{summary}" }
                div { class: "card-actions justify-end font-mono text-lg", {format_price(price_cents)} }
            }
        }
    }
}

/// Placeholder card shown while the catalog loads
#[component]
pub fn ProductCardSkeleton() -> Element {
    rsx! {
        div { class: "card card-compact w-64 bg-base-100 shadow-xl",
            div { class: "card-body",
                div { class: "skeleton h-6 w-32" }
                div { class: "skeleton h-4 w-48" }
                div { class: "skeleton h-6 w-16 self-end" }
            }
        }
    }
}
